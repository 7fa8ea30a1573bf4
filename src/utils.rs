//! Common utility functions shared across the codebase.

use std::path::{Component, Path, PathBuf};

/// Lexically normalizes a path: drops `.` segments and folds `..` into the
/// preceding segment. The file system is never consulted.
///
/// A path that normalizes to nothing becomes `.`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use speak_extract::utils::normalize_path;
///
/// assert_eq!(normalize_path(Path::new("./src/../i18n/")), PathBuf::from("i18n"));
/// assert_eq!(normalize_path(Path::new("a/./b")), PathBuf::from("a/b"));
/// assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else if !matches!(
                    normalized.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_))
                ) {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Joins `relative` onto `base` and normalizes the result.
pub fn join_normalized(base: &Path, relative: &str) -> PathBuf {
    normalize_path(&base.join(relative))
}
