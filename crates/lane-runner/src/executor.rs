// Seam between the run logic and the operating system: executable lookup and
// child process execution.

use async_trait::async_trait;
use lane_sdk::path_util::PATH_VARIABLE;
use lane_sdk::{ProcessInvoker, ProcessStartInfo, TraceWriter, WhichUtil};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Find `program` on `search_path`, relative to `working_directory`.
    fn locate(&self, program: &str, search_path: &str, working_directory: &Path) -> Option<PathBuf>;

    /// Run a process to completion and return its exit code.
    async fn execute(&self, start_info: &ProcessStartInfo) -> anyhow::Result<i32>;
}

/// Runs real processes through [`ProcessInvoker`].
pub struct ProcessExecutor {
    invoker: ProcessInvoker,
}

impl ProcessExecutor {
    pub fn new(trace: Arc<dyn TraceWriter>) -> Self {
        Self {
            invoker: ProcessInvoker::new(trace),
        }
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    fn locate(&self, program: &str, search_path: &str, working_directory: &Path) -> Option<PathBuf> {
        WhichUtil::which(program, search_path, working_directory, false)
            .ok()
            .flatten()
    }

    async fn execute(&self, start_info: &ProcessStartInfo) -> anyhow::Result<i32> {
        // Resolve against the PATH the child will see, not the host's.
        let mut resolved = start_info.clone();
        if let Some(search_path) = start_info.environment.get(PATH_VARIABLE) {
            if let Some(found) = WhichUtil::which(
                &start_info.file_name,
                search_path,
                &start_info.working_directory,
                true,
            )? {
                resolved.file_name = found.to_string_lossy().to_string();
            }
        }
        self.invoker.execute(&resolved).await
    }
}
