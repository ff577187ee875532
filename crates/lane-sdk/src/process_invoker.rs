use crate::trace::TraceWriter;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;

/// Error type for non-zero process exit codes.
#[derive(Debug, thiserror::Error)]
#[error(
    "Exit code {exit_code} returned from process: file name '{file_name}', arguments '{arguments}'."
)]
pub struct ProcessExitCodeError {
    pub exit_code: i32,
    pub file_name: String,
    pub arguments: String,
}

/// Everything needed to start one child process.
///
/// Arguments are passed as an array and never go through a shell, so values
/// containing spaces or quotes reach the program untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStartInfo {
    pub file_name: String,
    pub arguments: Vec<String>,
    pub working_directory: PathBuf,
    pub environment: HashMap<String, String>,
    pub require_exit_code_zero: bool,
}

impl ProcessStartInfo {
    pub fn new(file_name: impl Into<String>, working_directory: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            arguments: Vec::new(),
            working_directory: working_directory.into(),
            environment: HashMap::new(),
            require_exit_code_zero: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn require_exit_code_zero(mut self, require: bool) -> Self {
        self.require_exit_code_zero = require;
        self
    }

    /// Arguments joined with spaces, for diagnostics only.
    pub fn arguments_display(&self) -> String {
        self.arguments.join(" ")
    }
}

/// Spawns a child process that shares the host's stdio and waits for it.
pub struct ProcessInvoker {
    trace: Arc<dyn TraceWriter>,
}

impl ProcessInvoker {
    pub fn new(trace: Arc<dyn TraceWriter>) -> Self {
        Self { trace }
    }

    /// Execute a process and return its exit code.
    ///
    /// A process killed by a signal reports `-1`. When
    /// `require_exit_code_zero` is set, a non-zero code becomes a
    /// [`ProcessExitCodeError`].
    pub async fn execute(&self, start_info: &ProcessStartInfo) -> Result<i32> {
        anyhow::ensure!(!start_info.file_name.is_empty(), "file_name must not be empty");

        let arguments = start_info.arguments_display();
        self.trace.debug("Starting process:");
        self.trace
            .debug(&format!("  File name: '{}'", start_info.file_name));
        self.trace.debug(&format!("  Arguments: '{arguments}'"));
        self.trace.debug(&format!(
            "  Working directory: '{}'",
            start_info.working_directory.display()
        ));
        self.trace.debug(&format!(
            "  Require exit code zero: '{}'",
            start_info.require_exit_code_zero
        ));

        if !Path::new(&start_info.working_directory).is_dir() {
            anyhow::bail!(
                "Working directory '{}' does not exist",
                start_info.working_directory.display()
            );
        }

        let mut cmd = Command::new(&start_info.file_name);
        cmd.args(&start_info.arguments)
            .current_dir(&start_info.working_directory)
            .envs(&start_info.environment)
            .stdin(std::process::Stdio::inherit())
            .stdout(std::process::Stdio::inherit())
            .stderr(std::process::Stdio::inherit());

        let start = std::time::Instant::now();
        let mut child = cmd.spawn().with_context(|| {
            format!(
                "Failed to start process '{}' with arguments '{arguments}'",
                start_info.file_name
            )
        })?;

        let pid = child.id().unwrap_or(0);
        self.trace
            .debug(&format!("Process started with process id {pid}, waiting for process exit."));

        let status = child.wait().await.context("Failed to wait for process")?;
        let exit_code = status.code().unwrap_or(-1);

        let elapsed = start.elapsed();
        self.trace.debug(&format!(
            "Finished process {pid} with exit code {exit_code}, and elapsed time {elapsed:.2?}."
        ));

        if exit_code != 0 && start_info.require_exit_code_zero {
            return Err(ProcessExitCodeError {
                exit_code,
                file_name: start_info.file_name.clone(),
                arguments,
            }
            .into());
        }

        Ok(exit_code)
    }
}
