// Workflow commands written to stdout in the `::command key=val::data` form.
// The actions host parses these lines to annotate the log and fail the step.

use std::collections::BTreeMap;
use std::fmt;

/// The command delimiter (`::`) used both as prefix and as separator.
pub const COMMAND_KEY: &str = "::";

struct EscapeMapping {
    token: &'static str,
    replacement: &'static str,
}

// `%` must come first so replacements are not escaped twice.
const ESCAPE_DATA_MAPPINGS: &[EscapeMapping] = &[
    EscapeMapping { token: "%",  replacement: "%25" },
    EscapeMapping { token: "\r", replacement: "%0D" },
    EscapeMapping { token: "\n", replacement: "%0A" },
];

const ESCAPE_PROPERTY_MAPPINGS: &[EscapeMapping] = &[
    EscapeMapping { token: "%",  replacement: "%25" },
    EscapeMapping { token: "\r", replacement: "%0D" },
    EscapeMapping { token: "\n", replacement: "%0A" },
    EscapeMapping { token: ":",  replacement: "%3A" },
    EscapeMapping { token: ",",  replacement: "%2C" },
];

/// A workflow command ready to be written to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCommand {
    /// The command name (e.g. "error", "group").
    pub command: String,
    /// Properties attached to the command, emitted in key order.
    pub properties: BTreeMap<String, String>,
    /// The command data / body text.
    pub data: String,
}

impl ActionCommand {
    /// Create a new command with no properties and no data.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            properties: BTreeMap::new(),
            data: String::new(),
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// `::error::<message>`
    pub fn error(message: &str) -> Self {
        Self::new("error").with_data(message)
    }

    /// `::warning::<message>`
    pub fn warning(message: &str) -> Self {
        Self::new("warning").with_data(message)
    }

    /// `::debug::<message>`
    pub fn debug(message: &str) -> Self {
        Self::new("debug").with_data(message)
    }

    /// `::group::<title>` opens a collapsible log section.
    pub fn group(title: &str) -> Self {
        Self::new("group").with_data(title)
    }

    /// `::endgroup::` closes the innermost log section.
    pub fn end_group() -> Self {
        Self::new("endgroup")
    }

    /// Write the command to stdout.
    pub fn issue(&self) {
        println!("{self}");
    }

    fn escape(value: &str, mappings: &[EscapeMapping]) -> String {
        let mut escaped = value.to_string();
        for mapping in mappings {
            escaped = escaped.replace(mapping.token, mapping.replacement);
        }
        escaped
    }

    fn escape_data(value: &str) -> String {
        Self::escape(value, ESCAPE_DATA_MAPPINGS)
    }

    fn escape_property(value: &str) -> String {
        Self::escape(value, ESCAPE_PROPERTY_MAPPINGS)
    }
}

impl fmt::Display for ActionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{COMMAND_KEY}{}", self.command)?;
        let props: Vec<String> = self
            .properties
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{k}={}", Self::escape_property(v)))
            .collect();
        if !props.is_empty() {
            write!(f, " {}", props.join(","))?;
        }
        write!(f, "{COMMAND_KEY}{}", Self::escape_data(&self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_command_format() {
        assert_eq!(
            ActionCommand::error("Lane 'build' failed").to_string(),
            "::error::Lane 'build' failed"
        );
    }

    #[test]
    fn end_group_has_no_data() {
        assert_eq!(ActionCommand::end_group().to_string(), "::endgroup::");
    }

    #[test]
    fn data_escaping() {
        assert_eq!(
            ActionCommand::warning("50% done\r\nnext").to_string(),
            "::warning::50%25 done%0D%0Anext"
        );
    }

    #[test]
    fn property_escaping() {
        let cmd = ActionCommand::new("error")
            .with_property("title", "a:b,c")
            .with_property("file", "Fastfile")
            .with_data("boom");
        assert_eq!(cmd.to_string(), "::error file=Fastfile,title=a%3Ab%2Cc::boom");
    }

    #[test]
    fn empty_properties_are_omitted() {
        let cmd = ActionCommand::new("error")
            .with_property("title", "")
            .with_data("boom");
        assert_eq!(cmd.to_string(), "::error::boom");

        let cmd = ActionCommand::error("boom")
            .with_property("file", "")
            .with_property("title", "lane-runner");
        assert_eq!(cmd.to_string(), "::error title=lane-runner::boom");
    }

    #[test]
    fn escape_percent_first() {
        assert_eq!(ActionCommand::escape_data("%0A"), "%250A");
    }
}
