//! thesis-stats - study catalog summarizer for the thesis
//!
//! Reads the literature-review study catalog, counts studies per facet,
//! writes the JSON summary the thesis build consumes, and optionally
//! renders LaTeX tables from it.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (missing input, missing column, write failure, bad config)

mod analysis;
mod catalog;
mod cli;
mod config;
mod error;
mod models;
mod prisma;
mod report;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, ResolvedPaths, CONFIG_FILE_NAME};
use models::Summary;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Name of the environment variable holding an optional log filter directive.
const LOG_ENV: &str = "THESIS_STATS_LOG";

/// File name of the PRISMA table inside the tables directory.
const PRISMA_TABLE_FILE: &str = "prisma_flow.tex";

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config(&args);
    }

    init_logging(&args)?;

    info!("thesis-stats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(&args) {
        Ok(outcome) => {
            println!("{}", outcome.rendered);
            info!(
                "Done: {} studies, {} files written",
                outcome.summary.total_studies,
                outcome.written.len()
            );
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .thesis-stats.toml in the project root.
fn handle_init_config(args: &Args) -> Result<()> {
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let path = root.join(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            path.display()
        );
        std::process::exit(1);
    }

    std::fs::write(&path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created {} with default settings.", path.display());
    Ok(())
}

/// Initialize logging on stderr; stdout carries only the rendered summary.
fn init_logging(args: &Args) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let installed = match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.is_empty() => {
            let subscriber = builder.with_env_filter(EnvFilter::new(directive)).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        _ => {
            let subscriber = builder.with_max_level(args.log_level()).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    installed.context("Failed to set tracing subscriber")
}

/// Result of a successful run.
#[derive(Debug)]
struct RunOutcome {
    summary: Summary,
    /// Summary as printed on stdout.
    rendered: String,
    /// Every file written, in write order.
    written: Vec<PathBuf>,
}

/// Load config, merge CLI overrides, and run the pipeline.
fn run(args: &Args) -> Result<RunOutcome> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);

    run_pipeline(&config, args.format, args.dry_run)
}

/// Read, aggregate, write, and render.
///
/// All inputs are read before the first write, so a missing catalog or
/// flow counts file leaves no artifacts behind.
fn run_pipeline(config: &Config, format: OutputFormat, dry_run: bool) -> Result<RunOutcome> {
    let paths = config.resolve_paths();
    debug!("Resolved paths: {:?}", paths);

    let summary = summarize_catalog(&paths.catalog)?;

    let flow_counts = if config.output.prisma && !dry_run {
        let counts = prisma::read_flow_counts(&paths.prisma_counts)
            .context("Failed to read PRISMA flow counts")?;
        Some(prisma::PrismaCounts::from_counts(&counts))
    } else {
        None
    };

    let rendered = match format {
        OutputFormat::Json => report::render_json(&summary)?,
        OutputFormat::Markdown => report::generate_markdown_report(&summary),
    };

    if dry_run {
        info!("Dry run: nothing written");
        return Ok(RunOutcome {
            summary,
            rendered,
            written: Vec::new(),
        });
    }

    let mut written = Vec::new();

    report::write_summary(&summary, &paths.summary).context("Failed to write summary")?;
    written.push(paths.summary.clone());

    if config.output.tables {
        written.extend(render_tables(&paths)?);
    }

    if let Some(counts) = flow_counts {
        written.push(write_prisma_table(&counts, &paths.tables_dir)?);
    }

    Ok(RunOutcome {
        summary,
        rendered,
        written,
    })
}

/// Read the catalog and aggregate it.
fn summarize_catalog(catalog_path: &Path) -> Result<Summary> {
    info!("Reading catalog: {}", catalog_path.display());

    let rows = catalog::read_catalog(catalog_path).context("Failed to read study catalog")?;
    let summary = analysis::summarize(&rows).context("Failed to summarize study catalog")?;

    info!(
        "Summarized {} studies ({} KPI mentions)",
        summary.total_studies,
        models::facet_total(&summary.by_kpi)
    );
    Ok(summary)
}

/// Render distribution tables from the written artifact, not the in-memory summary.
fn render_tables(paths: &ResolvedPaths) -> Result<Vec<PathBuf>> {
    let summary = report::load_summary(&paths.summary).context("Failed to load summary")?;
    let tables = report::build_tables(&summary);
    report::write_tables(&tables, &paths.tables_dir).context("Failed to write LaTeX tables")
}

fn write_prisma_table(counts: &prisma::PrismaCounts, tables_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(tables_dir)
        .with_context(|| format!("Failed to create {}", tables_dir.display()))?;

    let path = tables_dir.join(PRISMA_TABLE_FILE);
    std::fs::write(&path, prisma::render_prisma_table(counts))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote PRISMA table to {}", path.display());
    Ok(path)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // A root config that exists but fails to parse is fatal
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    match Config::load_from_root(&root)? {
        Some(config) => {
            info!("Loaded config from {}", root.join(CONFIG_FILE_NAME).display());
            Ok(config)
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
