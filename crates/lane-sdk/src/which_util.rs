use std::path::{Path, PathBuf};

/// Locates executables on an explicit search path.
///
/// The search path is passed in rather than read from the process `PATH` so
/// that directories added during a run are visible without mutating the
/// process environment.
pub struct WhichUtil;

impl WhichUtil {
    /// Locate the first occurrence of `command` on `search_path`.
    ///
    /// - If `require` is true and the command is not found, returns an error.
    /// - If `require` is false and the command is not found, returns `Ok(None)`.
    pub fn which(
        command: &str,
        search_path: &str,
        working_directory: &Path,
        require: bool,
    ) -> anyhow::Result<Option<PathBuf>> {
        if command.is_empty() {
            if require {
                anyhow::bail!("command must not be empty");
            }
            return Ok(None);
        }

        if search_path.is_empty() && !Path::new(command).is_absolute() {
            if require {
                anyhow::bail!("{command}: command not found. PATH is not defined.");
            }
            return Ok(None);
        }

        match which::which_in(command, Some(search_path), working_directory) {
            Ok(found) => Ok(Some(found)),
            Err(_) if !require => Ok(None),
            Err(e) => anyhow::bail!(
                "{command}: command not found ({e}). Make sure '{command}' is installed and its location included in the 'PATH' environment variable."
            ),
        }
    }
}
