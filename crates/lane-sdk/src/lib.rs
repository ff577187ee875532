// lane-sdk: Foundation layer for the lane runner.
// This crate has ZERO dependencies on other workspace crates and provides
// action input access, workflow commands, tracing, and process utilities.

pub mod action_command;
pub mod action_inputs;
pub mod build_constants;
pub mod path_util;
pub mod process_invoker;
pub mod string_util;
pub mod trace;
pub mod which_util;

// Re-export commonly used items at crate root
pub use action_command::ActionCommand;
pub use action_inputs::ActionInputs;
pub use build_constants::{LanePackage, Source};
pub use path_util::PathUtil;
pub use process_invoker::{ProcessExitCodeError, ProcessInvoker, ProcessStartInfo};
pub use string_util::StringUtil;
pub use trace::{TraceWriter, TracingTraceWriter, WorkflowTraceWriter};
pub use which_util::WhichUtil;
