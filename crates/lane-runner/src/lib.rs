// lane-runner: runs a fastlane lane on behalf of a GitHub Actions step.
// Depends on `lane-sdk` for input access, workflow commands, and processes.

pub mod cli;
pub mod command_line;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod options;
pub mod runner;
pub mod telemetry;
pub mod tooling;
pub mod workspace;

#[cfg(test)]
mod testing;

// ---------------------------------------------------------------------------
// Re-exports for convenient access
// ---------------------------------------------------------------------------

pub use command_line::{CommandLine, ToolPrefix};
pub use config::{HostEnvironment, InvocationConfig};
pub use error::{ErrorKind, LaneError};
pub use executor::{CommandExecutor, ProcessExecutor};
pub use options::LaneOptions;
pub use runner::{LaneRunner, RunOutcome};
pub use telemetry::{DisabledUsageTracker, HttpUsageTracker, UsageEvent, UsageTracker};
pub use tooling::{ResolvedTooling, ToolingResolver};
