//! Path normalization and exclusion matching
//!
//! Exclusions are compared by exact set membership on normalized keys: absolute, '/'-separated,
//! with `.` components dropped. `..` is left as-is and symlinks are never resolved.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Build the comparison key for a path
pub fn exclusion_key(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut key = String::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(prefix) => {
                key.push_str(&normalize_path(Path::new(prefix.as_os_str())))
            }
            Component::RootDir => key.push('/'),
            Component::CurDir => {}
            Component::ParentDir => push_segment(&mut key, ".."),
            Component::Normal(segment) => push_segment(&mut key, &segment.to_string_lossy()),
        }
    }
    key
}

fn push_segment(key: &mut String, segment: &str) {
    if !key.is_empty() && !key.ends_with('/') {
        key.push('/');
    }
    key.push_str(segment);
}

/// Set of excluded files and directories
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    keys: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from full paths
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut set = Self::new();
        for path in paths {
            set.insert(path.as_ref());
        }
        set
    }

    /// Build a set from entries relative to `root`; absolute entries are kept as they are
    pub fn under_root<S: AsRef<str>>(root: &Path, entries: &[S]) -> Self {
        Self::from_paths(entries.iter().map(|entry| root.join(entry.as_ref())))
    }

    pub fn insert(&mut self, path: &Path) {
        self.keys.insert(exclusion_key(path));
    }

    pub fn contains(&self, path: &Path) -> bool {
        !self.is_empty() && self.keys.contains(&exclusion_key(path))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Drop every subdirectory the predicate excludes, keeping the order of the rest
pub fn prune_dirs<F>(dirs: Vec<PathBuf>, is_excluded: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    dirs.into_iter().filter(|dir| !is_excluded(dir)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("src/main.rs");
        assert_eq!(normalize_path(path), "src/main.rs");
    }

    #[test]
    fn test_normalize_path_nested() {
        let path = Path::new("a/b/c/d.rs");
        assert_eq!(normalize_path(path), "a/b/c/d.rs");
    }

    #[test]
    fn test_exclusion_key_absolute() {
        assert_eq!(exclusion_key(Path::new("/project/src")), "/project/src");
    }

    #[test]
    fn test_exclusion_key_ignores_trailing_and_doubled_separators() {
        assert_eq!(
            exclusion_key(Path::new("/project//node_modules/")),
            "/project/node_modules"
        );
    }

    #[test]
    fn test_exclusion_key_drops_cur_dir() {
        assert_eq!(
            exclusion_key(Path::new("/project/./src/./lib.rs")),
            "/project/src/lib.rs"
        );
    }

    #[test]
    fn test_exclusion_key_keeps_parent_dir() {
        assert_eq!(exclusion_key(Path::new("/project/../x")), "/project/../x");
    }

    #[test]
    fn test_exclusion_key_relative_matches_absolute() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            exclusion_key(Path::new("./src/main.rs")),
            exclusion_key(&cwd.join("src").join("main.rs"))
        );
    }

    #[test]
    fn test_exclusion_set_contains() {
        let set = ExclusionSet::from_paths(["/project/node_modules", "/project/.env.local"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Path::new("/project/node_modules")));
        assert!(set.contains(Path::new("/project/./node_modules/")));
        assert!(set.contains(Path::new("/project/.env.local")));
        assert!(!set.contains(Path::new("/project/node_modules/pkg.json")));
        assert!(!set.contains(Path::new("/project/src")));
    }

    #[test]
    fn test_exclusion_set_under_root() {
        let set = ExclusionSet::under_root(Path::new("/project"), &["node_modules", "/abs/file"]);
        assert!(set.contains(Path::new("/project/node_modules")));
        assert!(set.contains(Path::new("/abs/file")));
        assert!(!set.contains(Path::new("/project/abs/file")));
    }

    #[test]
    fn test_exclusion_set_empty() {
        let set = ExclusionSet::new();
        assert!(set.is_empty());
        assert!(!set.contains(Path::new("/anything")));
    }

    #[test]
    fn test_prune_dirs_keeps_order() {
        let dirs = vec![
            PathBuf::from("/p/src"),
            PathBuf::from("/p/node_modules"),
            PathBuf::from("/p/docs"),
            PathBuf::from("/p/.next"),
        ];
        let set = ExclusionSet::from_paths(["/p/node_modules", "/p/.next"]);

        let kept = prune_dirs(dirs, |dir| set.contains(dir));
        assert_eq!(kept, vec![PathBuf::from("/p/src"), PathBuf::from("/p/docs")]);
    }

    #[test]
    fn test_prune_dirs_nothing_excluded() {
        let dirs = vec![PathBuf::from("b"), PathBuf::from("a")];
        let kept = prune_dirs(dirs.clone(), |_| false);
        assert_eq!(kept, dirs);
    }
}
