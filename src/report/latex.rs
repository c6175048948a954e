//! LaTeX table rendering.
//!
//! Produces `tabular` fragments (booktabs rules) for inclusion in the
//! thesis. Tables are built from the summary artifact only.

use crate::error::{Result, StatsError};
use crate::models::{FacetCount, Summary};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A rendered table and the file name it belongs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexTable {
    pub file_name: String,
    pub content: String,
}

/// Build a three-column `l r r` tabular.
pub fn tex_table(headers: [&str; 3], rows: &[[String; 3]]) -> String {
    let mut lines = vec![
        "\\begin{tabular}{l r r}".to_string(),
        "\\toprule".to_string(),
        format!("{} & {} & {} \\\\", headers[0], headers[1], headers[2]),
        "\\midrule".to_string(),
    ];
    lines.extend(
        rows.iter()
            .map(|row| format!("{} & {} & {} \\\\", row[0], row[1], row[2])),
    );
    lines.push("\\bottomrule".to_string());
    lines.push("\\end{tabular}".to_string());

    lines.join("\n")
}

/// Label, count and share rows for a facet, closed by a `Total` row.
pub fn format_rows(entries: &[FacetCount], total: usize) -> Vec<[String; 3]> {
    let mut rows: Vec<[String; 3]> = entries
        .iter()
        .map(|entry| {
            let pct = if total > 0 {
                entry.count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            [
                entry.label.clone(),
                entry.count.to_string(),
                format!("{:.0}\\%", pct),
            ]
        })
        .collect();

    let total_share = if total > 0 { "100\\%" } else { "0\\%" };
    rows.push([
        "Total".to_string(),
        total.to_string(),
        total_share.to_string(),
    ]);

    rows
}

/// All distribution tables for a summary: domain, RL method, and one per
/// reproducibility field.
pub fn build_tables(summary: &Summary) -> Vec<TexTable> {
    let total = summary.total_studies;
    let mut tables = vec![
        TexTable {
            file_name: "domain_distribution.tex".to_string(),
            content: tex_table(
                ["Manufacturing domain", "Count", "Share"],
                &format_rows(&summary.by_domain, total),
            ),
        },
        TexTable {
            file_name: "rl_method_distribution.tex".to_string(),
            content: tex_table(
                ["RL method", "Count", "Share"],
                &format_rows(&summary.by_method, total),
            ),
        },
    ];

    for (field, entries) in summary.reproducibility.iter() {
        let title = field.title();
        tables.push(TexTable {
            file_name: format!("{}_distribution.tex", field.column()),
            content: tex_table([title.as_str(), "Count", "Share"], &format_rows(entries, total)),
        });
    }

    tables
}

/// Write tables into `dir`, creating it if needed. Returns the written paths.
pub fn write_tables(tables: &[TexTable], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| StatsError::io(dir, e))?;

    let mut written = Vec::with_capacity(tables.len());
    for table in tables {
        let path = dir.join(&table.file_name);
        fs::write(&path, table.content.as_bytes()).map_err(|e| StatsError::io(&path, e))?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }

    info!("Wrote {} tables to {}", written.len(), dir.display());
    Ok(written)
}
