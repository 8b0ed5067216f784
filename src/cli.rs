//! CLI module - Command-line interface definitions and handler

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::core::config::{find_config_file, load_config_file, resolve, Config, Overrides};
use crate::core::model::SnapshotError;

/// listfiles - flatten the text files of a directory tree into one annotated snapshot file.
#[derive(Parser, Debug)]
#[command(name = "listfiles")]
#[command(
    author,
    version,
    about,
    long_about = r#"listfiles walks ROOT top-down, skips excluded paths, reads every remaining file as
UTF-8 text and writes them all into a single snapshot file, one block per file:

    ===== <name> =====
    Path: <path>
    <content>

Files that cannot be read or decoded are reported and skipped. Excluded directories are never
entered. The output file itself is always excluded.

Configuration is layered: built-in defaults, then .listfiles.toml (or --config), then the
LISTFILES_ROOT / LISTFILES_OUTPUT environment variables, then flags.

Examples:
    listfiles
    listfiles --root src/app -o app.txt
    listfiles --exclude dist --exclude coverage
    listfiles --no-default-excludes --json
"#
)]
pub struct Cli {
    /// Directory to snapshot.
    #[arg(
        long,
        env = "LISTFILES_ROOT",
        value_name = "DIR",
        long_help = "Directory where traversal begins (defaults to the current directory).\n\n\
Record paths in the snapshot are this directory joined with each file's relative path."
    )]
    pub root: Option<PathBuf>,

    /// Snapshot file to write.
    #[arg(
        short,
        long,
        env = "LISTFILES_OUTPUT",
        value_name = "FILE",
        long_help = "Snapshot file to write (defaults to files_content.txt). An existing file is\n\
overwritten. Nothing is written when ROOT does not exist."
    )]
    pub output: Option<PathBuf>,

    /// Exclude a file or directory (repeatable).
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "PATH",
        long_help = "Exclude a file or directory. Relative paths are joined onto ROOT; absolute\n\
paths are used as given. Matching is exact on the normalized full path, so excluding\n\
`node_modules` only prunes ROOT/node_modules, not nested ones.\n\n\
May be given multiple times. Added on top of the default or configured exclusions."
    )]
    pub excludes: Vec<String>,

    /// Drop the built-in exclusion list.
    #[arg(
        long,
        long_help = "Do not apply the built-in exclusions (node_modules, .next, package.json,\n\
README.md, ...). Has no effect when the config file sets its own `exclude` list."
    )]
    pub no_default_excludes: bool,

    /// Config file to load instead of ./.listfiles.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print a JSON run summary to stdout.
    #[arg(
        long,
        long_help = "After a successful run, print a JSON summary (root, output, files, skipped,\n\
bytes) to stdout."
    )]
    pub json: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (log every collected, excluded and pruned path).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            root: self.root.clone(),
            output: self.output.clone(),
            excludes: self.excludes.clone(),
            no_default_excludes: self.no_default_excludes,
        }
    }
}

/// Resolve the run configuration for these arguments
pub fn resolve_config(cli: &Cli) -> Result<Config, SnapshotError> {
    let file = match &cli.config {
        Some(path) => Some(load_config_file(path)?),
        None => find_config_file(Path::new(".")),
    };
    Ok(resolve(file.as_ref(), cli.overrides()))
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let summary = crate::flows::snapshot::run_snapshot(&config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

/// Exit code for a failed run
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<SnapshotError>()
        .map(SnapshotError::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "listfiles",
            "--root",
            "src/app",
            "-o",
            "out.txt",
            "-e",
            "dist",
            "--exclude",
            "coverage",
            "--no-default-excludes",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.root, Some(PathBuf::from("src/app")));
        assert_eq!(overrides.output, Some(PathBuf::from("out.txt")));
        assert_eq!(overrides.excludes, vec!["dist", "coverage"]);
        assert!(overrides.no_default_excludes);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["listfiles", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_exit_code_mapping() {
        let missing = anyhow::Error::new(SnapshotError::RootNotFound {
            root: "x".to_string(),
        });
        assert_eq!(exit_code(&missing), 2);
        assert_eq!(exit_code(&anyhow::anyhow!("other")), 1);
    }
}
