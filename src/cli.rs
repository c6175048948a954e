//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// thesis-stats - summarize a literature-review study catalog
///
/// Counts studies by year, manufacturing domain, RL method, KPI and
/// reproducibility status, writes a JSON summary, and optionally renders
/// LaTeX tables for the thesis.
///
/// Examples:
///   thesis-stats
///   thesis-stats --root ~/thesis --tables
///   thesis-stats --catalog data/catalog.csv -o out/summary.json --format markdown
///   thesis-stats --prisma --prisma-counts data/prisma/flow_counts.csv
///   thesis-stats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Project root that relative paths resolve against
    ///
    /// Defaults to the current directory, or `paths.root` from the config file.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Study catalog CSV
    ///
    /// Default: data/processed/study_catalog.csv
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Output path for the JSON summary
    ///
    /// Default: data/processed/study_summary.json
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// How to print the summary on stdout (json, markdown)
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Also render LaTeX distribution tables from the written summary
    #[arg(long)]
    pub tables: bool,

    /// Directory for LaTeX tables
    ///
    /// Default: vorlage-abschlussarbeiten-tex/tables
    #[arg(long, value_name = "DIR")]
    pub tables_dir: Option<PathBuf>,

    /// Also render the PRISMA phase table
    #[arg(long)]
    pub prisma: bool,

    /// PRISMA flow counts CSV (columns: phase, count)
    ///
    /// Default: data/prisma/flow_counts.csv
    #[arg(long, value_name = "FILE")]
    pub prisma_counts: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .thesis-stats.toml in the project root
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Read and aggregate the catalog, print the summary, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .thesis-stats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Stdout rendering of the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty JSON, identical to the artifact (default)
    #[default]
    Json,
    /// Markdown tables
    Markdown,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.dry_run && (self.tables || self.prisma) {
            return Err("--dry-run cannot be combined with --tables or --prisma".to_string());
        }

        if let Some(ref root) = self.root {
            if !root.is_dir() {
                return Err(format!(
                    "Project root is not a directory: {}",
                    root.display()
                ));
            }
        }

        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use clap::CommandFactory;

    pub(crate) fn make_args() -> Args {
        Args {
            root: None,
            catalog: None,
            output: None,
            format: OutputFormat::Json,
            tables: false,
            tables_dir: None,
            prisma: false,
            prisma_counts: None,
            config: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["thesis-stats"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.output.is_none());
        assert!(!args.tables);
    }

    #[test]
    fn test_root_not_read_from_environment() {
        let command = Args::command();
        let root = command
            .get_arguments()
            .find(|arg| arg.get_id() == "root")
            .unwrap();
        assert!(root.get_env().is_none());
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "thesis-stats",
            "--catalog",
            "cat.csv",
            "-o",
            "out.json",
            "--format",
            "markdown",
            "--tables",
        ])
        .unwrap();
        assert_eq!(args.catalog, Some(PathBuf::from("cat.csv")));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert_eq!(args.format, OutputFormat::Markdown);
        assert!(args.tables);
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_dry_run_with_tables() {
        let mut args = make_args();
        args.dry_run = true;
        args.tables = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_root() {
        let mut args = make_args();
        args.root = Some(PathBuf::from("/definitely/not/a/thesis/root"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
