// Working directory selection for the `subdirectory` input.

use crate::error::LaneError;
use std::path::{Path, PathBuf};

/// Resolve the directory every later step runs in.
///
/// The process working directory is never changed; callers pass the result
/// to each child process instead.
pub fn resolve_working_directory(
    base: &Path,
    subdirectory: Option<&str>,
) -> Result<PathBuf, LaneError> {
    let Some(subdirectory) = subdirectory else {
        return Ok(base.to_path_buf());
    };

    if subdirectory.starts_with('/') || Path::new(subdirectory).is_absolute() {
        return Err(LaneError::SubdirectoryNotRelative {
            subdirectory: subdirectory.to_string(),
        });
    }

    let resolved = base.join(subdirectory);
    if !resolved.exists() {
        return Err(LaneError::SubdirectoryNotFound {
            subdirectory: subdirectory.to_string(),
            resolved,
        });
    }
    if !resolved.is_dir() {
        return Err(LaneError::SubdirectoryNotDirectory {
            subdirectory: subdirectory.to_string(),
            resolved,
        });
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_subdirectory_uses_base() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_working_directory(dir.path(), None).unwrap(), dir.path());
    }

    #[test]
    fn relative_subdirectory_is_joined() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("apps/ios")).unwrap();
        let resolved = resolve_working_directory(dir.path(), Some("apps/ios")).unwrap();
        assert_eq!(resolved, dir.path().join("apps/ios"));
    }

    #[test]
    fn absolute_subdirectory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_working_directory(dir.path(), Some("/ios")).unwrap_err();
        assert!(matches!(err, LaneError::SubdirectoryNotRelative { ref subdirectory } if subdirectory == "/ios"));
    }

    #[test]
    fn absolute_check_precedes_existence_check() {
        let err = resolve_working_directory(Path::new("/"), Some("/tmp")).unwrap_err();
        assert!(matches!(err, LaneError::SubdirectoryNotRelative { .. }));
    }

    #[test]
    fn missing_subdirectory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_working_directory(dir.path(), Some("android")).unwrap_err();
        assert!(matches!(err, LaneError::SubdirectoryNotFound { .. }));
        assert!(err.to_string().contains("android"));
    }

    #[test]
    fn file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Gemfile"), "").unwrap();
        let err = resolve_working_directory(dir.path(), Some("Gemfile")).unwrap_err();
        assert!(matches!(err, LaneError::SubdirectoryNotDirectory { .. }));
    }
}
