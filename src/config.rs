//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.thesis-stats.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".thesis-stats.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// File locations, relative to the project root unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Project root.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Study catalog CSV.
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,

    /// JSON summary artifact.
    #[serde(default = "default_summary")]
    pub summary: PathBuf,

    /// Directory for LaTeX tables.
    #[serde(default = "default_tables_dir")]
    pub tables_dir: PathBuf,

    /// PRISMA flow counts CSV.
    #[serde(default = "default_prisma_counts")]
    pub prisma_counts: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            catalog: default_catalog(),
            summary: default_summary(),
            tables_dir: default_tables_dir(),
            prisma_counts: default_prisma_counts(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_catalog() -> PathBuf {
    PathBuf::from("data/processed/study_catalog.csv")
}

fn default_summary() -> PathBuf {
    PathBuf::from("data/processed/study_summary.json")
}

fn default_tables_dir() -> PathBuf {
    PathBuf::from("vorlage-abschlussarbeiten-tex/tables")
}

fn default_prisma_counts() -> PathBuf {
    PathBuf::from("data/prisma/flow_counts.csv")
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Render LaTeX distribution tables after writing the summary.
    #[serde(default)]
    pub tables: bool,

    /// Render the PRISMA phase table.
    #[serde(default)]
    pub prisma: bool,
}

/// Fully resolved locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub catalog: PathBuf,
    pub summary: PathBuf,
    pub tables_dir: PathBuf,
    pub prisma_counts: PathBuf,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from `root/.thesis-stats.toml`.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_from_root(root: &Path) -> Result<Option<Self>> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref root) = args.root {
            self.paths.root = root.clone();
        }
        if let Some(ref catalog) = args.catalog {
            self.paths.catalog = catalog.clone();
        }
        if let Some(ref output) = args.output {
            self.paths.summary = output.clone();
        }
        if let Some(ref tables_dir) = args.tables_dir {
            self.paths.tables_dir = tables_dir.clone();
        }
        if let Some(ref prisma_counts) = args.prisma_counts {
            self.paths.prisma_counts = prisma_counts.clone();
        }

        // Flags only ever switch things on
        if args.tables {
            self.output.tables = true;
        }
        if args.prisma {
            self.output.prisma = true;
        }
    }

    /// Resolve every configured path against the project root.
    pub fn resolve_paths(&self) -> ResolvedPaths {
        let root = &self.paths.root;
        ResolvedPaths {
            catalog: root.join(&self.paths.catalog),
            summary: root.join(&self.paths.summary),
            tables_dir: root.join(&self.paths.tables_dir),
            prisma_counts: root.join(&self.paths.prisma_counts),
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::make_args;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.paths.root, PathBuf::from("."));
        assert_eq!(
            config.paths.catalog,
            PathBuf::from("data/processed/study_catalog.csv")
        );
        assert!(!config.output.tables);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[paths]
root = "/srv/thesis"
summary = "out/summary.json"

[output]
tables = true
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.paths.root, PathBuf::from("/srv/thesis"));
        assert_eq!(config.paths.summary, PathBuf::from("out/summary.json"));
        assert_eq!(
            config.paths.tables_dir,
            PathBuf::from("vorlage-abschlussarbeiten-tex/tables")
        );
        assert!(config.output.tables);
        assert!(!config.output.prisma);
    }

    #[test]
    fn test_merge_with_args() {
        let mut config: Config = toml::from_str("[paths]\ncatalog = \"from_config.csv\"\n").unwrap();
        let mut args = make_args();
        args.output = Some(PathBuf::from("cli.json"));
        args.prisma = true;

        config.merge_with_args(&args);

        assert_eq!(config.paths.catalog, PathBuf::from("from_config.csv"));
        assert_eq!(config.paths.summary, PathBuf::from("cli.json"));
        assert!(config.output.prisma);
        assert!(!config.output.tables);
    }

    #[test]
    fn test_resolve_paths() {
        let mut config = Config::default();
        config.paths.root = PathBuf::from("/srv/thesis");
        config.paths.summary = PathBuf::from("/tmp/summary.json");

        let resolved = config.resolve_paths();
        assert_eq!(
            resolved.catalog,
            PathBuf::from("/srv/thesis/data/processed/study_catalog.csv")
        );
        // Absolute paths are kept as-is.
        assert_eq!(resolved.summary, PathBuf::from("/tmp/summary.json"));
    }

    #[test]
    fn test_load_from_root() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Config::load_from_root(temp_dir.path()).unwrap().is_none());

        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[output]\nprisma = true\n",
        )
        .unwrap();
        let config = Config::load_from_root(temp_dir.path()).unwrap().unwrap();
        assert!(config.output.prisma);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[paths]"));
        assert!(toml_str.contains("[output]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.paths.summary, Config::default().paths.summary);
    }
}
