//! Markdown rendering of the summary.
//!
//! Human-readable alternative to the JSON dump, selected with
//! `--format markdown`. One table per facet.

use crate::models::{facet_total, FacetCount, Reproducibility, Summary};

/// Generate a complete Markdown rendering.
pub fn generate_markdown_report(summary: &Summary) -> String {
    let mut output = String::new();

    output.push_str("# Study Catalog Summary\n\n");
    output.push_str(&format!("**Total studies:** {}\n\n", summary.total_studies));

    output.push_str(&generate_facet_section(
        "By Year",
        "Year",
        &summary.by_year,
        summary.total_studies,
    ));
    output.push_str(&generate_facet_section(
        "By Manufacturing Domain",
        "Domain",
        &summary.by_domain,
        summary.total_studies,
    ));
    output.push_str(&generate_facet_section(
        "By RL Method",
        "Method",
        &summary.by_method,
        summary.total_studies,
    ));
    output.push_str(&generate_kpi_section(&summary.by_kpi));
    output.push_str(&generate_reproducibility_section(
        &summary.reproducibility,
        summary.total_studies,
    ));

    output
}

/// Share of `total`, as a whole percentage.
fn percent(count: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.0}%", count as f64 / total as f64 * 100.0)
}

/// Generate a section for a single-valued facet.
fn generate_facet_section(
    title: &str,
    column: &str,
    entries: &[FacetCount],
    total: usize,
) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", title));

    if entries.is_empty() {
        section.push_str("_No studies._\n\n");
        return section;
    }

    section.push_str(&format!("| {} | Count | Share |\n", column));
    section.push_str("|:---|:---:|:---:|\n");
    for entry in entries {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            entry.label,
            entry.count,
            percent(entry.count, total)
        ));
    }
    section.push('\n');

    section
}

/// Generate the KPI section. Shares are omitted since one study can report many KPIs.
fn generate_kpi_section(entries: &[FacetCount]) -> String {
    let mut section = String::new();

    section.push_str("## By KPI\n\n");

    if entries.is_empty() {
        section.push_str("_No KPIs reported._\n\n");
        return section;
    }

    section.push_str("| KPI | Mentions |\n");
    section.push_str("|:---|:---:|\n");
    for entry in entries {
        section.push_str(&format!("| {} | {} |\n", entry.label, entry.count));
    }
    section.push_str(&format!("\n*{} mentions in total*\n\n", facet_total(entries)));

    section
}

/// Generate the reproducibility section, one table per field.
fn generate_reproducibility_section(repro: &Reproducibility, total: usize) -> String {
    let mut section = String::new();

    section.push_str("## Reproducibility\n\n");

    for (field, entries) in repro.iter() {
        section.push_str(&format!("### {}\n\n", field.title()));

        if entries.is_empty() {
            section.push_str("_No studies._\n\n");
            continue;
        }

        section.push_str("| Value | Count | Share |\n");
        section.push_str("|:---|:---:|:---:|\n");
        for entry in entries {
            section.push_str(&format!(
                "| {} | {} | {} |\n",
                entry.label,
                entry.count,
                percent(entry.count, total)
            ));
        }
        section.push('\n');
    }

    section
}
