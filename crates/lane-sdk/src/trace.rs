use crate::action_command::ActionCommand;

/// Diagnostic output sink used by every component of the runner.
pub trait TraceWriter: Send + Sync {
    /// Log an informational message.
    fn info(&self, message: &str);

    /// Log a debug message.
    fn debug(&self, message: &str);

    /// Log a warning message.
    fn warning(&self, message: &str) {
        self.info(&format!("Warning: {message}"));
    }

    /// Log an error message.
    fn error(&self, message: &str) {
        self.info(&format!("Error: {message}"));
    }

    /// Start a named section of related output.
    fn group(&self, title: &str) {
        self.info(title);
    }

    /// Close the section opened by the last `group` call.
    fn end_group(&self) {}
}

/// Forwards messages to the `tracing` crate at matching levels.
#[derive(Debug, Clone)]
pub struct TracingTraceWriter;

impl TraceWriter for TracingTraceWriter {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    fn group(&self, title: &str) {
        tracing::info!(group = title, "begin");
    }
}

/// Writes messages to stdout as workflow commands so the actions log renders
/// them as annotations and collapsible groups.
///
/// Debug lines are only emitted when step debugging is enabled; the host
/// hides `::debug::` output otherwise anyway.
#[derive(Debug, Clone)]
pub struct WorkflowTraceWriter {
    debug_enabled: bool,
}

impl WorkflowTraceWriter {
    pub fn new(debug_enabled: bool) -> Self {
        Self { debug_enabled }
    }
}

impl TraceWriter for WorkflowTraceWriter {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn debug(&self, message: &str) {
        if self.debug_enabled {
            for line in message.replace("\r\n", "\n").split('\n') {
                ActionCommand::debug(line).issue();
            }
        }
    }

    fn warning(&self, message: &str) {
        ActionCommand::warning(message).issue();
    }

    fn error(&self, message: &str) {
        ActionCommand::error(message).issue();
    }

    fn group(&self, title: &str) {
        ActionCommand::group(title).issue();
    }

    fn end_group(&self) {
        ActionCommand::end_group().issue();
    }
}

/// A no-op trace writer that discards all messages. Useful for tests.
#[derive(Debug, Clone)]
pub struct NullTraceWriter;

impl TraceWriter for NullTraceWriter {
    fn info(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// The level of a collected trace message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceLevel {
    Info,
    Debug,
    Warning,
    Error,
    Group,
}

/// A trace writer that collects all messages into a `Vec`.
#[derive(Debug, Default)]
pub struct CollectingTraceWriter {
    messages: parking_lot::Mutex<Vec<(TraceLevel, String)>>,
}

impl CollectingTraceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all collected messages.
    pub fn messages(&self) -> Vec<(TraceLevel, String)> {
        self.messages.lock().clone()
    }

    /// Whether any message at `level` contains `needle`.
    pub fn contains(&self, level: TraceLevel, needle: &str) -> bool {
        self.messages
            .lock()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    fn push(&self, level: TraceLevel, message: &str) {
        self.messages.lock().push((level, message.to_string()));
    }
}

impl TraceWriter for CollectingTraceWriter {
    fn info(&self, message: &str) {
        self.push(TraceLevel::Info, message);
    }

    fn debug(&self, message: &str) {
        self.push(TraceLevel::Debug, message);
    }

    fn warning(&self, message: &str) {
        self.push(TraceLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.push(TraceLevel::Error, message);
    }

    fn group(&self, title: &str) {
        self.push(TraceLevel::Group, title);
    }
}
