//! CLI argument parsing using clap.

use clap::Parser;
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "untar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the .tar.gz archive, or `-` to read from stdin
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "DEST")]
    pub dest: Option<PathBuf>,

    /// Top-level directory to strip from entry paths
    #[arg(long, value_name = "PREFIX", default_value = "")]
    pub archive_root: String,

    /// Remove existing executables before overwriting them (default on
    /// macOS)
    #[arg(long, overrides_with = "no_replace_executables")]
    pub replace_executables: bool,

    /// Overwrite existing executables in place
    #[arg(long, overrides_with = "replace_executables")]
    pub no_replace_executables: bool,

    /// Enable verbose output (repeat for trace logging)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Returns `true` if the archive is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.archive == Path::new("-")
    }

    /// Executable replacement requested on the command line, `None` to
    /// keep the host default.
    pub fn replace_override(&self) -> Option<bool> {
        if self.replace_executables {
            Some(true)
        } else if self.no_replace_executables {
            Some(false)
        } else {
            None
        }
    }

    /// Default log filter for the chosen verbosity. `RUST_LOG` takes
    /// precedence.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["untar", "go.tar.gz"]).unwrap();
        assert_eq!(cli.archive, PathBuf::from("go.tar.gz"));
        assert!(cli.dest.is_none());
        assert!(cli.archive_root.is_empty());
        assert_eq!(cli.replace_override(), None);
        assert!(!cli.reads_stdin());
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "untar",
            "-",
            "/opt/go",
            "--archive-root",
            "go/",
            "--replace-executables",
            "-vv",
        ])
        .unwrap();
        assert!(cli.reads_stdin());
        assert_eq!(cli.dest, Some(PathBuf::from("/opt/go")));
        assert_eq!(cli.archive_root, "go/");
        assert_eq!(cli.replace_override(), Some(true));
        assert_eq!(cli.log_filter(), "trace");
    }

    #[test]
    fn test_replace_executables_can_be_disabled() {
        let cli = Cli::try_parse_from(["untar", "a.tar.gz", "--no-replace-executables"]).unwrap();
        assert_eq!(cli.replace_override(), Some(false));

        // The last flag wins.
        let cli = Cli::try_parse_from([
            "untar",
            "a.tar.gz",
            "--no-replace-executables",
            "--replace-executables",
        ])
        .unwrap();
        assert_eq!(cli.replace_override(), Some(true));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["untar", "a.tar.gz", "-q", "-v"]).is_err());
        let cli = Cli::try_parse_from(["untar", "a.tar.gz", "-q"]).unwrap();
        assert_eq!(cli.log_filter(), "error");
    }
}
