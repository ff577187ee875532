// Recording fakes shared by the unit tests of this crate.

use crate::executor::CommandExecutor;
use crate::telemetry::{UsageEvent, UsageTracker};
use async_trait::async_trait;
use lane_sdk::ProcessStartInfo;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Executor that records every invocation instead of starting processes.
///
/// Programs listed in `available` are "on PATH" for any search path that
/// contains one of `path_dirs`, or for every search path when `path_dirs` is
/// empty. Exit codes default to 0 and can be set per program.
#[derive(Default)]
pub struct RecordingExecutor {
    available: Mutex<HashSet<String>>,
    path_dirs: Mutex<HashMap<String, String>>,
    exit_codes: Mutex<HashMap<String, i32>>,
    executed: Mutex<Vec<ProcessStartInfo>>,
}

impl RecordingExecutor {
    pub fn with_programs(programs: &[&str]) -> Self {
        let exec = Self::default();
        for program in programs {
            exec.install(program);
        }
        exec
    }

    pub fn install(&self, program: &str) {
        self.available.lock().insert(program.to_string());
    }

    /// Make `program` resolvable only when `dir` is on the search path.
    pub fn install_in(&self, program: &str, dir: &str) {
        self.path_dirs
            .lock()
            .insert(program.to_string(), dir.to_string());
    }

    pub fn set_exit_code(&self, program: &str, exit_code: i32) {
        self.exit_codes.lock().insert(program.to_string(), exit_code);
    }

    pub fn executed(&self) -> Vec<ProcessStartInfo> {
        self.executed.lock().clone()
    }

    /// Each execution rendered as `program arg1 arg2`.
    pub fn command_lines(&self) -> Vec<String> {
        self.executed
            .lock()
            .iter()
            .map(|info| {
                std::iter::once(info.file_name.as_str())
                    .chain(info.arguments.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

#[async_trait]
impl CommandExecutor for RecordingExecutor {
    fn locate(&self, program: &str, search_path: &str, _working_directory: &Path) -> Option<PathBuf> {
        if self.available.lock().contains(program) {
            return Some(PathBuf::from("/fake/bin").join(program));
        }
        let dirs = self.path_dirs.lock();
        let dir = dirs.get(program)?;
        search_path
            .split(lane_sdk::PathUtil::path_separator())
            .any(|entry| entry == dir.as_str())
            .then(|| PathBuf::from(dir).join(program))
    }

    async fn execute(&self, start_info: &ProcessStartInfo) -> anyhow::Result<i32> {
        self.executed.lock().push(start_info.clone());

        // An install makes the program available for later lookups.
        if start_info.file_name == "gem" && start_info.arguments.first().map(String::as_str) == Some("install") {
            if let Some(gem) = start_info.arguments.get(1) {
                let program = if gem == "bundler" { "bundle" } else { gem.as_str() };
                self.install(program);
            }
        }

        let code = self
            .exit_codes
            .lock()
            .get(&start_info.file_name)
            .copied()
            .unwrap_or(0);
        if code != 0 && start_info.require_exit_code_zero {
            return Err(lane_sdk::ProcessExitCodeError {
                exit_code: code,
                file_name: start_info.file_name.clone(),
                arguments: start_info.arguments_display(),
            }
            .into());
        }
        Ok(code)
    }
}

/// Tracker that only counts and stores events.
#[derive(Default)]
pub struct RecordingTracker {
    events: Mutex<Vec<UsageEvent>>,
}

impl RecordingTracker {
    pub fn events(&self) -> Vec<UsageEvent> {
        self.events.lock().clone()
    }
}

impl UsageTracker for RecordingTracker {
    fn track(&self, event: UsageEvent) {
        self.events.lock().push(event);
    }
}
