//! Run configuration
//!
//! A [`Config`] is resolved from built-in defaults, an optional `.listfiles.toml`, environment
//! variables and command-line flags (in increasing precedence), then passed explicitly through the
//! pipeline.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::model::SnapshotError;
use crate::core::paths::{normalize_path, ExclusionSet};

/// Config file looked up in the current directory when `--config` is not given
pub const CONFIG_FILE_NAME: &str = ".listfiles.toml";

pub const DEFAULT_ROOT: &str = ".";

pub const DEFAULT_OUTPUT: &str = "files_content.txt";

/// Paths (relative to the root) excluded unless the user opts out
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".env.local",
    ".gitignore",
    "eslint.config.mjs",
    "next-env.d.ts",
    "next.config.ts",
    "package-lock.json",
    "package.json",
    "postcss.config.mjs",
    "README.md",
    ".next",
    "node_modules",
];

/// The three inputs of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory where traversal begins
    pub root: PathBuf,

    /// Excluded files and directories, relative to `root` unless absolute
    pub excludes: Vec<String>,

    /// Snapshot file to write
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_ROOT,
            DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            DEFAULT_OUTPUT,
        )
    }
}

impl Config {
    pub fn new(root: impl Into<PathBuf>, excludes: Vec<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excludes,
            output: output.into(),
        }
    }

    /// Exclusions for the traversal, including the output file itself
    pub fn exclusion_set(&self) -> ExclusionSet {
        let mut set = ExclusionSet::under_root(&self.root, self.excludes.as_slice());
        set.insert(&self.output);
        set
    }
}

/// Contents of a `.listfiles.toml`
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    root: Option<String>,
    output: Option<String>,
    exclude: Option<Vec<String>>,
}

impl std::str::FromStr for ConfigFile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| e.to_string())
    }
}

/// Load an explicitly requested config file; any failure is fatal
pub fn load_config_file(path: &Path) -> Result<ConfigFile, SnapshotError> {
    let to_error = |reason: String| SnapshotError::Config {
        path: normalize_path(path),
        reason,
    };

    let text = std::fs::read_to_string(path).map_err(|e| to_error(e.to_string()))?;
    text.parse().map_err(to_error)
}

/// Load `.listfiles.toml` from `dir` if present. A broken file is logged and ignored.
pub fn find_config_file(dir: &Path) -> Option<ConfigFile> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return None;
    }

    match load_config_file(&path) {
        Ok(file) => {
            log::debug!("Loaded config from {}", path.display());
            Some(file)
        }
        Err(e) => {
            log::warn!("Ignoring {}", e);
            None
        }
    }
}

/// Values from the environment and the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub excludes: Vec<String>,
    pub no_default_excludes: bool,
}

/// Layer defaults, config file and overrides into the final config
pub fn resolve(file: Option<&ConfigFile>, overrides: Overrides) -> Config {
    let mut config = Config::default();
    let settings = file.map(|f| &f.settings);

    if let Some(root) = settings.and_then(|s| s.root.as_ref()) {
        config.root = PathBuf::from(root);
    }
    if let Some(output) = settings.and_then(|s| s.output.as_ref()) {
        config.output = PathBuf::from(output);
    }

    match settings.and_then(|s| s.exclude.as_ref()) {
        Some(excludes) => config.excludes = excludes.clone(),
        None if overrides.no_default_excludes => config.excludes.clear(),
        None => {}
    }

    if let Some(root) = overrides.root {
        config.root = root;
    }
    if let Some(output) = overrides.output {
        config.output = output;
    }
    config.excludes.extend(overrides.excludes);

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = resolve(None, Overrides::default());
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.output, PathBuf::from("files_content.txt"));
        assert!(config.excludes.iter().any(|e| e == "node_modules"));
        assert_eq!(config.excludes.len(), DEFAULT_EXCLUDES.len());
    }

    #[test]
    fn test_no_default_excludes() {
        let overrides = Overrides {
            no_default_excludes: true,
            excludes: vec!["target".to_string()],
            ..Default::default()
        };
        let config = resolve(None, overrides);
        assert_eq!(config.excludes, vec!["target".to_string()]);
    }

    #[test]
    fn test_file_replaces_defaults() {
        let file: ConfigFile = r#"
            [settings]
            root = "src/app"
            output = "snapshot.txt"
            exclude = ["dist"]
        "#
        .parse()
        .unwrap();

        let config = resolve(Some(&file), Overrides::default());
        assert_eq!(config.root, PathBuf::from("src/app"));
        assert_eq!(config.output, PathBuf::from("snapshot.txt"));
        assert_eq!(config.excludes, vec!["dist".to_string()]);
    }

    #[test]
    fn test_overrides_beat_file() {
        let file: ConfigFile = "[settings]\nroot = \"a\"\noutput = \"b.txt\"\n".parse().unwrap();
        let overrides = Overrides {
            root: Some(PathBuf::from("c")),
            output: Some(PathBuf::from("d.txt")),
            excludes: vec!["extra".to_string()],
            no_default_excludes: false,
        };

        let config = resolve(Some(&file), overrides);
        assert_eq!(config.root, PathBuf::from("c"));
        assert_eq!(config.output, PathBuf::from("d.txt"));
        assert_eq!(config.excludes.last().map(String::as_str), Some("extra"));
        assert_eq!(config.excludes.len(), DEFAULT_EXCLUDES.len() + 1);
    }

    #[test]
    fn test_unknown_setting_is_rejected() {
        let parsed = "[settings]\nfollow_links = true\n".parse::<ConfigFile>();
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_file_is_valid() {
        let file: ConfigFile = "".parse().unwrap();
        let config = resolve(Some(&file), Overrides::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_file_missing_is_fatal() {
        let temp = tempdir().unwrap();
        let err = load_config_file(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SnapshotError::Config { .. }));
    }

    #[test]
    fn test_find_config_file() {
        let temp = tempdir().unwrap();
        assert!(find_config_file(temp.path()).is_none());

        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[settings]\nexclude = [\"vendor\"]\n",
        )
        .unwrap();
        let file = find_config_file(temp.path()).unwrap();
        let config = resolve(Some(&file), Overrides::default());
        assert_eq!(config.excludes, vec!["vendor".to_string()]);
    }

    #[test]
    fn test_find_config_file_ignores_broken_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "[settings\n").unwrap();
        assert!(find_config_file(temp.path()).is_none());
    }

    #[test]
    fn test_exclusion_set_includes_output() {
        let config = Config::new("/project", vec!["node_modules".to_string()], "/project/out.txt");
        let set = config.exclusion_set();
        assert!(set.contains(Path::new("/project/node_modules")));
        assert!(set.contains(Path::new("/project/out.txt")));
        assert_eq!(set.len(), 2);
    }
}
