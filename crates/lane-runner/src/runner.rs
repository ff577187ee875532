// LaneRunner: the linear run of one lane.
//
// Validate -> Track -> Select directory -> Parse options -> Resolve tooling
// -> Execute -> Report. Each step completes before the next starts; only the
// usage event is dispatched without waiting.

use crate::command_line::CommandLine;
use crate::config::{HostEnvironment, InvocationConfig};
use crate::error::LaneError;
use crate::executor::CommandExecutor;
use crate::options::LaneOptions;
use crate::telemetry::{UsageEvent, UsageTracker};
use crate::tooling::ToolingResolver;
use crate::workspace::resolve_working_directory;
use lane_sdk::path_util::PATH_VARIABLE;
use lane_sdk::{ActionInputs, ProcessStartInfo, TraceWriter};
use std::path::PathBuf;
use std::sync::Arc;

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub command_line: CommandLine,
    pub working_directory: PathBuf,
    pub exit_code: i32,
}

/// Runs one fastlane lane from action inputs.
pub struct LaneRunner {
    host: HostEnvironment,
    executor: Arc<dyn CommandExecutor>,
    tracker: Arc<dyn UsageTracker>,
    trace: Arc<dyn TraceWriter>,
}

impl LaneRunner {
    pub fn new(
        host: HostEnvironment,
        executor: Arc<dyn CommandExecutor>,
        tracker: Arc<dyn UsageTracker>,
        trace: Arc<dyn TraceWriter>,
    ) -> Self {
        Self {
            host,
            executor,
            tracker,
            trace,
        }
    }

    /// Validate the inputs and run the lane.
    ///
    /// A missing `lane` fails before anything else happens, including
    /// tracking.
    pub async fn run(&self, inputs: &ActionInputs) -> Result<RunOutcome, LaneError> {
        let config = InvocationConfig::from_inputs(inputs)?;
        self.run_config(&config).await
    }

    pub async fn run_config(&self, config: &InvocationConfig) -> Result<RunOutcome, LaneError> {
        tracing::debug!(lane = %config.lane, "Starting lane run");

        if config.skip_tracking {
            self.trace.debug("Usage tracking skipped");
        } else {
            self.tracker.track(self.usage_event(config));
        }

        let working_directory = resolve_working_directory(
            &self.host.current_directory,
            config.subdirectory.as_deref(),
        )?;
        if config.subdirectory.is_some() {
            self.trace.info(&format!(
                "Running in subdirectory {}",
                working_directory.display()
            ));
        }

        let options = LaneOptions::parse(config.options.as_deref())?;

        let tooling = ToolingResolver::new(
            self.executor.as_ref(),
            self.trace.as_ref(),
            self.host.search_path.clone(),
        )
        .with_tool_cache(self.host.tool_cache.clone())
        .with_github_path_file(self.host.github_path_file.clone())
        .resolve(&working_directory, config.bundle_install_path.as_deref())
        .await?;

        let command_line = CommandLine::new(tooling.prefix, config.lane.clone(), options);
        self.trace.info(&format!("Running {command_line}"));

        let start_info = ProcessStartInfo::new(command_line.program(), &working_directory)
            .args(command_line.args())
            .env(PATH_VARIABLE, tooling.search_path);
        let exit_code = self.executor.execute(&start_info).await?;

        if exit_code != 0 {
            return Err(LaneError::LaneFailed {
                lane: config.lane.clone(),
                exit_code,
            });
        }

        tracing::debug!(lane = %config.lane, "Lane finished");
        Ok(RunOutcome {
            command_line,
            working_directory,
            exit_code,
        })
    }

    fn usage_event(&self, config: &InvocationConfig) -> UsageEvent {
        UsageEvent {
            repository: self.host.repository.clone(),
            runner_os: self.host.runner_os.clone(),
            uses_options: config.options.is_some(),
            uses_subdirectory: config.subdirectory.is_some(),
            uses_bundle_install_path: config.bundle_install_path.is_some(),
        }
    }
}
