// Command-line arguments. Every flag is optional and overrides the matching
// `INPUT_*` value, so the binary works both as the action entry point and
// from a local shell.

use crate::config::inputs;
use clap::Parser;
use lane_sdk::ActionInputs;

#[derive(Parser, Debug, Default)]
#[command(name = "lane-runner", version, about = "Run a fastlane lane from GitHub Actions inputs")]
pub struct Args {
    /// Lane to run.
    #[arg(long)]
    pub lane: Option<String>,

    /// JSON object of lane options, passed as `key:value` arguments.
    #[arg(long)]
    pub options: Option<String>,

    /// Relative directory to run from.
    #[arg(long)]
    pub subdirectory: Option<String>,

    /// Directory Bundler installs gems into.
    #[arg(long = "bundle-install-path")]
    pub bundle_install_path: Option<String>,

    /// Pass `true` to disable usage tracking.
    #[arg(long = "skip-tracking")]
    pub skip_tracking: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overlay the flags that were given onto `action_inputs`.
    pub fn apply_to(&self, action_inputs: &mut ActionInputs) {
        let overrides = [
            (inputs::LANE, &self.lane),
            (inputs::OPTIONS, &self.options),
            (inputs::SUBDIRECTORY, &self.subdirectory),
            (inputs::BUNDLE_INSTALL_PATH, &self.bundle_install_path),
            (inputs::SKIP_TRACKING, &self.skip_tracking),
        ];
        for (name, value) in overrides {
            if let Some(value) = value {
                action_inputs.set_input(name, value.clone());
            }
        }
    }
}
