use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// PATH environment variable name (platform-specific).
///
/// On Windows the conventional name is `Path`; on Unix it is `PATH`.
#[cfg(target_os = "windows")]
pub const PATH_VARIABLE: &str = "Path";
#[cfg(not(target_os = "windows"))]
pub const PATH_VARIABLE: &str = "PATH";

/// Search-path helpers.
pub struct PathUtil;

impl PathUtil {
    /// Prepend `path` to `current_path` and return the result.
    ///
    /// If `current_path` is empty, returns just `path` (no trailing separator,
    /// which would add the current directory on Unix). If `path` is already
    /// the first entry, `current_path` is returned unchanged.
    pub fn prepend_path_value(path: &str, current_path: &str) -> String {
        assert!(!path.is_empty(), "path must not be empty");

        if current_path.is_empty() {
            return path.to_string();
        }

        let separator = Self::path_separator();
        let already_first = current_path == path
            || current_path.starts_with(&format!("{path}{separator}"));

        if already_first {
            return current_path.to_string();
        }

        format!("{path}{separator}{current_path}")
    }

    /// Append `directory` to the host's `GITHUB_PATH` file so that later
    /// workflow steps get it prepended to their `PATH` as well.
    pub fn append_github_path(github_path_file: &Path, directory: &Path) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(github_path_file)
            .with_context(|| {
                format!("Failed to open GITHUB_PATH file {}", github_path_file.display())
            })?;
        writeln!(file, "{}", directory.display()).with_context(|| {
            format!("Failed to write GITHUB_PATH file {}", github_path_file.display())
        })?;
        Ok(())
    }

    /// The platform-specific PATH entry separator character.
    pub fn path_separator() -> char {
        if cfg!(target_os = "windows") {
            ';'
        } else {
            ':'
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_variable_name() {
        #[cfg(target_os = "windows")]
        assert_eq!(PATH_VARIABLE, "Path");
        #[cfg(not(target_os = "windows"))]
        assert_eq!(PATH_VARIABLE, "PATH");
    }

    #[test]
    fn prepend_path_value_empty() {
        assert_eq!(PathUtil::prepend_path_value("/usr/local/bin", ""), "/usr/local/bin");
    }

    #[test]
    fn prepend_path_value_non_empty() {
        let sep = PathUtil::path_separator();
        let result = PathUtil::prepend_path_value("/new", &format!("/existing{sep}/other"));
        assert_eq!(result, format!("/new{sep}/existing{sep}/other"));
    }

    #[test]
    fn prepend_path_value_already_first() {
        let sep = PathUtil::path_separator();
        let current = format!("/new{sep}/other");
        assert_eq!(PathUtil::prepend_path_value("/new", &current), current);
        assert_eq!(PathUtil::prepend_path_value("/new", "/new"), "/new");
    }

    #[test]
    fn prepend_path_value_prefix_of_other_entry() {
        let sep = PathUtil::path_separator();
        let current = format!("/new-bin{sep}/other");
        assert_eq!(
            PathUtil::prepend_path_value("/new", &current),
            format!("/new{sep}/new-bin{sep}/other")
        );
    }

    #[test]
    fn append_github_path_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("github_path");
        PathUtil::append_github_path(&file, Path::new("/opt/ruby/bin")).unwrap();
        PathUtil::append_github_path(&file, Path::new("/opt/other/bin")).unwrap();
        let content = std::fs::read_to_string(&file).unwrap();
        assert_eq!(content, "/opt/ruby/bin\n/opt/other/bin\n");
    }
}
