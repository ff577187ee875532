// Tooling resolution: decides whether the lane runs through Bundler or a global
// fastlane install, and installs whatever is missing.

use crate::command_line::{ToolPrefix, BUNDLE, FASTLANE};
use crate::error::LaneError;
use crate::executor::CommandExecutor;
use lane_sdk::path_util::PATH_VARIABLE;
use lane_sdk::{PathUtil, ProcessExitCodeError, ProcessStartInfo, TraceWriter};
use std::path::{Path, PathBuf};

/// Dependency manifest whose presence selects the Bundler flow.
pub const GEMFILE: &str = "Gemfile";
/// The Ruby package installer.
pub const GEM: &str = "gem";

const BUNDLER_GEM: &str = "bundler";
const FASTLANE_GEM: &str = "fastlane";
/// Directory under the tool cache holding pre-fetched Ruby versions.
const RUBY_TOOL_CACHE_DIR: &str = "Ruby";

/// Outcome of tooling resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTooling {
    pub prefix: ToolPrefix,
    /// Search path to launch the lane with; may include a Ruby added here.
    pub search_path: String,
}

/// Makes sure the tools a lane needs are installed.
pub struct ToolingResolver<'a> {
    executor: &'a dyn CommandExecutor,
    trace: &'a dyn TraceWriter,
    search_path: String,
    tool_cache: Option<PathBuf>,
    github_path_file: Option<PathBuf>,
}

impl<'a> ToolingResolver<'a> {
    pub fn new(
        executor: &'a dyn CommandExecutor,
        trace: &'a dyn TraceWriter,
        search_path: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            trace,
            search_path: search_path.into(),
            tool_cache: None,
            github_path_file: None,
        }
    }

    pub fn with_tool_cache(mut self, tool_cache: Option<PathBuf>) -> Self {
        self.tool_cache = tool_cache;
        self
    }

    pub fn with_github_path_file(mut self, github_path_file: Option<PathBuf>) -> Self {
        self.github_path_file = github_path_file;
        self
    }

    /// Resolve and install tooling for a lane run in `working_directory`.
    ///
    /// With a Gemfile: ensure Bundler, optionally configure its install path,
    /// and run `bundle install`. Without one: ensure a global fastlane.
    pub async fn resolve(
        mut self,
        working_directory: &Path,
        bundle_install_path: Option<&str>,
    ) -> Result<ResolvedTooling, LaneError> {
        let prefix = if working_directory.join(GEMFILE).is_file() {
            self.trace
                .debug(&format!("{GEMFILE} found in {}", working_directory.display()));
            self.ensure_installed(BUNDLE, BUNDLER_GEM, working_directory)
                .await?;
            self.install_bundle(working_directory, bundle_install_path)
                .await?;
            ToolPrefix::Bundler
        } else {
            self.trace.debug(&format!(
                "No {GEMFILE} in {}, using a global {FASTLANE}",
                working_directory.display()
            ));
            self.ensure_installed(FASTLANE, FASTLANE_GEM, working_directory)
                .await?;
            ToolPrefix::Direct
        };

        Ok(ResolvedTooling {
            prefix,
            search_path: self.search_path,
        })
    }

    async fn ensure_installed(
        &mut self,
        program: &str,
        gem: &str,
        working_directory: &Path,
    ) -> Result<(), LaneError> {
        if self.is_available(program, working_directory) {
            self.trace.debug(&format!("{program} is already installed"));
            return Ok(());
        }

        self.ensure_gem(working_directory)?;

        self.trace.group(&format!("Installing {gem}"));
        let result = self
            .run(
                ProcessStartInfo::new(GEM, working_directory).args(["install", gem]),
            )
            .await;
        self.trace.end_group();
        result
    }

    async fn install_bundle(
        &self,
        working_directory: &Path,
        bundle_install_path: Option<&str>,
    ) -> Result<(), LaneError> {
        if let Some(install_path) = bundle_install_path {
            self.trace
                .info(&format!("Setting bundle install path to {install_path}"));
            self.run(
                ProcessStartInfo::new(BUNDLE, working_directory)
                    .args(["config", "set", "path", install_path]),
            )
            .await?;
        }

        self.trace.group("Installing bundle");
        let result = self
            .run(ProcessStartInfo::new(BUNDLE, working_directory).arg("install"))
            .await;
        self.trace.end_group();
        result
    }

    /// Make `gem` resolvable, falling back to a Ruby from the tool cache.
    fn ensure_gem(&mut self, working_directory: &Path) -> Result<(), LaneError> {
        if self.is_available(GEM, working_directory) {
            return Ok(());
        }

        let unavailable = || LaneError::ToolingUnavailable {
            tool: GEM.to_string(),
        };
        let ruby_bin = self
            .tool_cache
            .as_deref()
            .and_then(find_cached_ruby_bin)
            .ok_or_else(unavailable)?;

        self.trace.info(&format!(
            "{GEM} not found on PATH, adding {}",
            ruby_bin.display()
        ));
        self.search_path =
            PathUtil::prepend_path_value(&ruby_bin.to_string_lossy(), &self.search_path);
        if let Some(github_path_file) = &self.github_path_file {
            if let Err(e) = PathUtil::append_github_path(github_path_file, &ruby_bin) {
                self.trace.warning(&format!("{e:#}"));
            }
        }

        if self.is_available(GEM, working_directory) {
            Ok(())
        } else {
            Err(unavailable())
        }
    }

    fn is_available(&self, program: &str, working_directory: &Path) -> bool {
        self.executor
            .locate(program, &self.search_path, working_directory)
            .is_some()
    }

    async fn run(&self, start_info: ProcessStartInfo) -> Result<(), LaneError> {
        let start_info = start_info
            .env(PATH_VARIABLE, self.search_path.clone())
            .require_exit_code_zero(true);
        match self.executor.execute(&start_info).await {
            Ok(_) => Ok(()),
            Err(e) => match e.downcast_ref::<ProcessExitCodeError>() {
                Some(exit) => Err(LaneError::InstallFailed {
                    command: format!("{} {}", start_info.file_name, start_info.arguments_display()),
                    exit_code: exit.exit_code,
                }),
                None => Err(LaneError::Process(e)),
            },
        }
    }
}

/// Find the `bin` directory of the newest Ruby under
/// `<tool_cache>/Ruby/<version>/<arch>/bin` that contains `gem`.
pub fn find_cached_ruby_bin(tool_cache: &Path) -> Option<PathBuf> {
    let versions = std::fs::read_dir(tool_cache.join(RUBY_TOOL_CACHE_DIR)).ok()?;

    let mut candidates: Vec<(Vec<u64>, PathBuf)> = versions
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let version = version_key(&entry.file_name().to_string_lossy());
            let arches = std::fs::read_dir(entry.path()).ok()?;
            let bin = arches
                .flatten()
                .map(|arch| arch.path().join("bin"))
                .find(|bin| has_gem(bin))?;
            Some((version, bin))
        })
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0));
    candidates.pop().map(|(_, bin)| bin)
}

fn has_gem(bin: &Path) -> bool {
    [GEM, "gem.cmd", "gem.bat"]
        .iter()
        .any(|name| bin.join(name).is_file())
}

/// Numeric ordering key for a version directory name such as `3.2.2`.
fn version_key(name: &str) -> Vec<u64> {
    name.split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().unwrap_or(0))
        .collect()
}
