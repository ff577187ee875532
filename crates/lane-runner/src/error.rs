// Error taxonomy for a lane run.

use std::path::PathBuf;

/// Broad category of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid inputs. Raised before any tool is installed or run.
    Configuration,
    /// A tool or the lane itself could not be run or exited non-zero.
    Execution,
}

/// Every error a run can surface to the actions host.
///
/// Telemetry failures are not represented here; they never fail a run.
#[derive(Debug, thiserror::Error)]
pub enum LaneError {
    #[error("Input required and not supplied: {name}")]
    MissingInput { name: String },

    #[error("Options input '{raw}' cannot be parsed into a JSON object: {reason}")]
    InvalidOptions { raw: String, reason: String },

    #[error("Subdirectory '{subdirectory}' must be a relative path")]
    SubdirectoryNotRelative { subdirectory: String },

    #[error("Subdirectory '{subdirectory}' does not exist (resolved to {})", .resolved.display())]
    SubdirectoryNotFound { subdirectory: String, resolved: PathBuf },

    #[error("Subdirectory '{subdirectory}' is not a directory (resolved to {})", .resolved.display())]
    SubdirectoryNotDirectory { subdirectory: String, resolved: PathBuf },

    #[error("'{tool}' is not available and no Ruby installation was found to install it with")]
    ToolingUnavailable { tool: String },

    #[error("'{command}' failed with exit code {exit_code}")]
    InstallFailed { command: String, exit_code: i32 },

    #[error("Lane '{lane}' failed with exit code {exit_code}")]
    LaneFailed { lane: String, exit_code: i32 },

    #[error(transparent)]
    Process(#[from] anyhow::Error),
}

impl LaneError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LaneError::MissingInput { .. }
            | LaneError::InvalidOptions { .. }
            | LaneError::SubdirectoryNotRelative { .. }
            | LaneError::SubdirectoryNotFound { .. }
            | LaneError::SubdirectoryNotDirectory { .. } => ErrorKind::Configuration,
            LaneError::ToolingUnavailable { .. }
            | LaneError::InstallFailed { .. }
            | LaneError::LaneFailed { .. }
            | LaneError::Process(_) => ErrorKind::Execution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors() {
        let err = LaneError::MissingInput { name: "lane".into() };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "Input required and not supplied: lane");

        let err = LaneError::SubdirectoryNotRelative { subdirectory: "/ios".into() };
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn invalid_options_message() {
        let err = LaneError::InvalidOptions {
            raw: "{invalid".into(),
            reason: "key must be a string".into(),
        };
        assert!(err.to_string().contains("cannot be parsed into a JSON object"));
    }

    #[test]
    fn lane_failed_names_lane() {
        let err = LaneError::LaneFailed { lane: "beta".into(), exit_code: 3 };
        assert_eq!(err.kind(), ErrorKind::Execution);
        assert_eq!(err.to_string(), "Lane 'beta' failed with exit code 3");
    }

    #[test]
    fn not_found_includes_resolved_path() {
        let err = LaneError::SubdirectoryNotFound {
            subdirectory: "ios".into(),
            resolved: PathBuf::from("/work/ios"),
        };
        assert_eq!(
            err.to_string(),
            "Subdirectory 'ios' does not exist (resolved to /work/ios)"
        );
    }

    #[test]
    fn process_errors_are_execution() {
        let err: LaneError = anyhow::anyhow!("spawn failed").into();
        assert_eq!(err.kind(), ErrorKind::Execution);
        assert_eq!(err.to_string(), "spawn failed");
    }
}
