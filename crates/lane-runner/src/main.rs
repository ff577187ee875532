// Entry point for the lane runner.
//
// Reads the action inputs (with CLI flag overrides), runs the lane, and turns
// any error into an `::error::` workflow command plus a non-zero exit code.

use clap::Parser;
use lane_runner::cli::Args;
use lane_runner::{
    logging, DisabledUsageTracker, HostEnvironment, HttpUsageTracker, LaneRunner,
    ProcessExecutor, UsageTracker,
};
use lane_sdk::build_constants::{LanePackage, Source};
use lane_sdk::{ActionCommand, ActionInputs, TraceWriter, TracingTraceWriter, WorkflowTraceWriter};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let args = Args::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return set_failed(&format!("Failed to build Tokio runtime: {e}")),
    };

    let exit_code = runtime.block_on(run(args));

    // A usage event still in flight is abandoned rather than awaited.
    runtime.shutdown_background();
    exit_code
}

async fn run(args: Args) -> ExitCode {
    let host = match HostEnvironment::capture() {
        Ok(host) => host,
        Err(e) => return set_failed(&format!("{e:#}")),
    };

    let debug = args.verbose || host.debug;
    logging::init(debug);

    tracing::info!("{} {} ({})", LanePackage::PRODUCT_NAME, LanePackage::VERSION, Source::COMMIT_HASH);
    tracing::debug!("  Working directory = {}", host.current_directory.display());

    let mut inputs = ActionInputs::from_env();
    args.apply_to(&mut inputs);

    let tracker: Arc<dyn UsageTracker> =
        match HttpUsageTracker::from_override(host.tracking_url.as_deref()) {
            Ok(tracker) => {
                tracing::debug!("  Tracking endpoint = {}", tracker.endpoint());
                Arc::new(tracker)
            }
            Err(e) => {
                tracing::debug!("Usage tracking unavailable: {e:#}");
                Arc::new(DisabledUsageTracker)
            }
        };
    let executor = Arc::new(ProcessExecutor::new(Arc::new(TracingTraceWriter)));
    let trace: Arc<dyn TraceWriter> = Arc::new(WorkflowTraceWriter::new(debug));

    let runner = LaneRunner::new(host, executor, tracker, trace);
    match runner.run(&inputs).await {
        Ok(outcome) => {
            tracing::info!(
                "Lane '{}' finished with exit code {}",
                outcome.command_line.lane,
                outcome.exit_code
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "Run failed");
            set_failed(&e.to_string())
        }
    }
}

/// Report a failed run to the actions host.
fn set_failed(message: &str) -> ExitCode {
    tracing::error!("{message}");
    failure_command(message).issue();
    ExitCode::FAILURE
}

/// The `::error::` annotation that fails the step.
fn failure_command(message: &str) -> ActionCommand {
    ActionCommand::error(message).with_property("title", LanePackage::PRODUCT_NAME)
}
