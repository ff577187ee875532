// Run configuration: the declared action inputs plus a one-time snapshot of
// the host environment. Both are read once at startup and passed explicitly.

use crate::error::LaneError;
use lane_sdk::path_util::PATH_VARIABLE;
use lane_sdk::{ActionInputs, StringUtil};
use std::path::PathBuf;

/// Names of the inputs declared by the action.
pub mod inputs {
    pub const LANE: &str = "lane";
    pub const OPTIONS: &str = "options";
    pub const SUBDIRECTORY: &str = "subdirectory";
    pub const BUNDLE_INSTALL_PATH: &str = "bundle-install-path";
    pub const SKIP_TRACKING: &str = "skip-tracking";
}

/// Host environment variables consumed by the runner.
pub mod variables {
    pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
    pub const RUNNER_OS: &str = "RUNNER_OS";
    pub const RUNNER_TOOL_CACHE: &str = "RUNNER_TOOL_CACHE";
    pub const AGENT_TOOLSDIRECTORY: &str = "AGENT_TOOLSDIRECTORY";
    pub const GITHUB_PATH: &str = "GITHUB_PATH";
    pub const RUNNER_DEBUG: &str = "RUNNER_DEBUG";
    pub const ACTIONS_STEP_DEBUG: &str = "ACTIONS_STEP_DEBUG";
    pub const TRACKING_URL: &str = "LANE_RUNNER_TRACKING_URL";
}

/// The inputs of one lane invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationConfig {
    pub lane: String,
    /// Raw JSON text of the `options` input; parsed later in the run.
    pub options: Option<String>,
    pub subdirectory: Option<String>,
    pub bundle_install_path: Option<String>,
    pub skip_tracking: bool,
}

impl InvocationConfig {
    /// Build the configuration from the action inputs.
    ///
    /// Only `lane` is required. Blank optional inputs count as absent, and
    /// tracking is skipped only when `skip-tracking` is exactly `"true"`.
    pub fn from_inputs(action_inputs: &ActionInputs) -> Result<Self, LaneError> {
        let lane = match action_inputs.get_input(inputs::LANE, true) {
            Ok(Some(lane)) => lane,
            _ => {
                return Err(LaneError::MissingInput {
                    name: inputs::LANE.to_string(),
                })
            }
        };
        let optional = |name: &str| action_inputs.get_input(name, false);

        Ok(Self {
            lane,
            options: optional(inputs::OPTIONS)?,
            subdirectory: optional(inputs::SUBDIRECTORY)?,
            bundle_install_path: optional(inputs::BUNDLE_INSTALL_PATH)?,
            skip_tracking: optional(inputs::SKIP_TRACKING)?.as_deref() == Some("true"),
        })
    }
}

/// Snapshot of the host environment taken at startup.
#[derive(Debug, Clone, Default)]
pub struct HostEnvironment {
    pub repository: Option<String>,
    pub runner_os: Option<String>,
    /// Executable search path used for every lookup and child process.
    pub search_path: String,
    /// Root of the pre-fetched tool cache, if the host has one.
    pub tool_cache: Option<PathBuf>,
    /// File the host reads to extend `PATH` for later steps.
    pub github_path_file: Option<PathBuf>,
    pub debug: bool,
    pub tracking_url: Option<String>,
    /// Directory the run was started from.
    pub current_directory: PathBuf,
}

impl HostEnvironment {
    /// Capture the process environment.
    pub fn capture() -> anyhow::Result<Self> {
        Ok(Self::from_lookup(
            |name| std::env::var(name).ok(),
            std::env::current_dir()?,
        ))
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F, current_directory: PathBuf) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let flag = |name: &str| {
            get(name)
                .and_then(|v| StringUtil::convert_to_bool(&v))
                .unwrap_or(false)
        };

        Self {
            repository: get(variables::GITHUB_REPOSITORY),
            runner_os: get(variables::RUNNER_OS),
            search_path: get(PATH_VARIABLE).unwrap_or_default(),
            tool_cache: get(variables::RUNNER_TOOL_CACHE)
                .or_else(|| get(variables::AGENT_TOOLSDIRECTORY))
                .map(PathBuf::from),
            github_path_file: get(variables::GITHUB_PATH).map(PathBuf::from),
            debug: flag(variables::RUNNER_DEBUG) || flag(variables::ACTIONS_STEP_DEBUG),
            tracking_url: get(variables::TRACKING_URL),
            current_directory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn action_inputs(pairs: &[(&str, &str)]) -> ActionInputs {
        let mut inputs = ActionInputs::new();
        for (k, v) in pairs {
            inputs.set_input(k, *v);
        }
        inputs
    }

    #[test]
    fn lane_is_required() {
        let err = InvocationConfig::from_inputs(&action_inputs(&[("options", "{}")])).unwrap_err();
        assert!(matches!(err, LaneError::MissingInput { ref name } if name == "lane"));
    }

    #[test]
    fn blank_lane_is_missing() {
        let err = InvocationConfig::from_inputs(&action_inputs(&[("lane", "  ")])).unwrap_err();
        assert!(matches!(err, LaneError::MissingInput { .. }));
    }

    #[test]
    fn missing_lane_reports_input_name() {
        let err = InvocationConfig::from_inputs(&ActionInputs::new()).unwrap_err();
        assert_eq!(err.to_string(), LaneError::MissingInput { name: "lane".into() }.to_string());
    }

    #[test]
    fn lane_is_trimmed() {
        let config = InvocationConfig::from_inputs(&action_inputs(&[("lane", " beta\n")])).unwrap();
        assert_eq!(config.lane, "beta");
    }

    #[test]
    fn defaults_for_optional_inputs() {
        let config = InvocationConfig::from_inputs(&action_inputs(&[("lane", "beta")])).unwrap();
        assert_eq!(
            config,
            InvocationConfig {
                lane: "beta".into(),
                options: None,
                subdirectory: None,
                bundle_install_path: None,
                skip_tracking: false,
            }
        );
    }

    #[test]
    fn all_inputs() {
        let config = InvocationConfig::from_inputs(&action_inputs(&[
            ("lane", "build"),
            ("options", r#"{"scheme":"Release"}"#),
            ("subdirectory", "ios"),
            ("bundle-install-path", "vendor/bundle"),
            ("skip-tracking", "true"),
        ]))
        .unwrap();
        assert_eq!(config.options.as_deref(), Some(r#"{"scheme":"Release"}"#));
        assert_eq!(config.subdirectory.as_deref(), Some("ios"));
        assert_eq!(config.bundle_install_path.as_deref(), Some("vendor/bundle"));
        assert!(config.skip_tracking);
    }

    #[test]
    fn skip_tracking_requires_literal_true() {
        for value in ["True", "1", "yes", "false"] {
            let config = InvocationConfig::from_inputs(&action_inputs(&[
                ("lane", "build"),
                ("skip-tracking", value),
            ]))
            .unwrap();
            assert!(!config.skip_tracking, "value {value:?} must not skip tracking");
        }
    }

    #[test]
    fn host_environment_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("GITHUB_REPOSITORY", "octo/app"),
            ("RUNNER_OS", "macOS"),
            (PATH_VARIABLE, "/usr/bin"),
            ("AGENT_TOOLSDIRECTORY", "/opt/hostedtoolcache"),
            ("GITHUB_PATH", "/tmp/github_path"),
            ("RUNNER_DEBUG", "1"),
            ("LANE_RUNNER_TRACKING_URL", ""),
        ]);
        let env = HostEnvironment::from_lookup(
            |name| vars.get(name).map(|v| v.to_string()),
            PathBuf::from("/work"),
        );
        assert_eq!(env.repository.as_deref(), Some("octo/app"));
        assert_eq!(env.runner_os.as_deref(), Some("macOS"));
        assert_eq!(env.search_path, "/usr/bin");
        assert_eq!(env.tool_cache, Some(PathBuf::from("/opt/hostedtoolcache")));
        assert_eq!(env.github_path_file, Some(PathBuf::from("/tmp/github_path")));
        assert!(env.debug);
        assert_eq!(env.tracking_url, None);
        assert_eq!(env.current_directory, PathBuf::from("/work"));
    }

    #[test]
    fn tool_cache_prefers_runner_variable() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RUNNER_TOOL_CACHE", "/a"),
            ("AGENT_TOOLSDIRECTORY", "/b"),
        ]);
        let env = HostEnvironment::from_lookup(
            |name| vars.get(name).map(|v| v.to_string()),
            PathBuf::from("/"),
        );
        assert_eq!(env.tool_cache, Some(PathBuf::from("/a")));
        assert!(!env.debug);
    }
}
