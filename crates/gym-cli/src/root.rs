use std::path::{Path, PathBuf};

/// Resolve the gym data root.
///
/// Priority:
/// 1. `--root` flag / `GYM_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.gym/`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        if dir.join(".gym").is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    cwd
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let p = PathBuf::from("/srv/gym");
        assert_eq!(resolve_root(Some(&p)), p);
    }

    #[test]
    fn explicit_root_is_not_checked() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nowhere");
        assert_eq!(resolve_root(Some(&missing)), missing);
    }
}
