// The final fastlane invocation.

use crate::options::LaneOptions;
use lane_sdk::StringUtil;
use std::fmt;

/// Name of the automation tool executable.
pub const FASTLANE: &str = "fastlane";
/// Name of the dependency manager executable.
pub const BUNDLE: &str = "bundle";

/// How fastlane is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolPrefix {
    /// `bundle exec fastlane`, for projects with a Gemfile.
    Bundler,
    /// `fastlane` from a global install.
    Direct,
}

impl ToolPrefix {
    /// Program and leading arguments, in argument-array form.
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            ToolPrefix::Bundler => &[BUNDLE, "exec", FASTLANE],
            ToolPrefix::Direct => &[FASTLANE],
        }
    }
}

impl fmt::Display for ToolPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens().join(" "))
    }
}

/// `<prefix> <lane> [key:"value" ...]`
///
/// `Display` renders the shell-style form with double-quoted values. The
/// process itself is started from [`CommandLine::program`] and
/// [`CommandLine::args`], where each option is a single `key:value` argument
/// exactly as a shell would have passed it. Values are never re-parsed, so
/// embedded quotes or spaces cannot split or inject arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub prefix: ToolPrefix,
    pub lane: String,
    pub options: LaneOptions,
}

impl CommandLine {
    pub fn new(prefix: ToolPrefix, lane: impl Into<String>, options: LaneOptions) -> Self {
        Self {
            prefix,
            lane: lane.into(),
            options,
        }
    }

    pub fn program(&self) -> &'static str {
        self.prefix.tokens()[0]
    }

    pub fn args(&self) -> Vec<String> {
        self.prefix.tokens()[1..]
            .iter()
            .map(|t| t.to_string())
            .chain(std::iter::once(self.lane.clone()))
            .chain(self.options.iter().map(|(k, v)| format!("{k}:{v}")))
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.prefix, self.lane)?;
        for (key, value) in self.options.iter() {
            write!(f, " {key}:{}", StringUtil::double_quote(value))?;
        }
        Ok(())
    }
}
