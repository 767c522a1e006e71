//! Path expansion for user-supplied locations

use std::path::{Component, Path, PathBuf};

/// Replace a leading `~` with the user's home directory
///
/// Paths without a leading `~`, or hosts without a home directory, are
/// returned unchanged.
pub fn expand_user(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Expand `~` and anchor relative paths at the current directory
pub fn resolve_path(path: &Path) -> PathBuf {
    let expanded = expand_user(path);
    std::path::absolute(&expanded).unwrap_or(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_user_home_prefix() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_user(Path::new("~/Downloads")), home.join("Downloads"));
        assert_eq!(expand_user(Path::new("~")), home);
    }

    #[test]
    fn test_expand_user_leaves_other_paths() {
        assert_eq!(expand_user(Path::new("/opt/mc")), PathBuf::from("/opt/mc"));
        assert_eq!(expand_user(Path::new("a/~/b")), PathBuf::from("a/~/b"));
        assert_eq!(expand_user(Path::new("~user/x")), PathBuf::from("~user/x"));
    }

    #[test]
    fn test_resolve_path_is_absolute() {
        assert!(resolve_path(Path::new("relative/dir")).is_absolute());
        assert!(resolve_path(Path::new("~/x")).is_absolute() || dirs::home_dir().is_none());
    }
}
