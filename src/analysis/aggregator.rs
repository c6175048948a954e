//! Facet aggregation over catalog rows.
//!
//! This module counts studies per year, domain, method, KPI, and
//! reproducibility attribute and turns the counts into sorted facet lists.

use crate::error::{Result, StatsError};
use crate::models::{FacetCount, ReproField, Reproducibility, Row, Summary, UNKNOWN_LABEL};
use std::collections::BTreeMap;
use tracing::debug;

pub const FIELD_YEAR: &str = "year";
pub const FIELD_DOMAIN: &str = "manufacturing_domain";
pub const FIELD_METHOD: &str = "rl_method";
pub const FIELD_KPIS: &str = "kpis";

/// Running label counts for one facet.
///
/// Backed by a `BTreeMap` so labels come out in ascending byte order.
#[derive(Debug, Default, Clone)]
pub struct FacetCounter {
    counts: BTreeMap<String, usize>,
}

impl FacetCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `label` by one.
    pub fn add(&mut self, label: &str) {
        *self.counts.entry(label.to_string()).or_insert(0) += 1;
    }

    /// Consume the counter into a facet list sorted by label.
    pub fn into_sorted(self) -> Vec<FacetCount> {
        self.counts
            .into_iter()
            .map(|(label, count)| FacetCount::new(label, count))
            .collect()
    }
}

/// Split a free-text KPI cell into tokens.
///
/// Every literal `and` becomes a comma before splitting, including `and`
/// inside longer words ("standard" splits into "st" and "ard").
pub fn split_kpis(value: &str) -> Vec<String> {
    value
        .replace("and", ",")
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Label for a categorical cell: the raw value, or `Unknown` when absent or empty.
fn label_or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN_LABEL,
    }
}

fn required<'a>(row: &'a Row, field: &'static str, row_number: usize) -> Result<&'a str> {
    row.get(field).ok_or(StatsError::MissingField {
        field,
        row: row_number,
    })
}

/// Aggregate catalog rows into a [`Summary`].
///
/// Fails on the first row that lacks a required column; nothing partial is returned.
pub fn summarize(rows: &[Row]) -> Result<Summary> {
    let mut by_year = FacetCounter::new();
    let mut by_domain = FacetCounter::new();
    let mut by_method = FacetCounter::new();
    let mut by_kpi = FacetCounter::new();
    let mut repro: BTreeMap<ReproField, FacetCounter> = ReproField::ALL
        .into_iter()
        .map(|field| (field, FacetCounter::new()))
        .collect();

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;

        let year = required(row, FIELD_YEAR, row_number)?;
        let domain = required(row, FIELD_DOMAIN, row_number)?;
        let method = required(row, FIELD_METHOD, row_number)?;
        let kpis = required(row, FIELD_KPIS, row_number)?;

        by_year.add(label_or_unknown(Some(year)));
        by_domain.add(label_or_unknown(Some(domain)));
        by_method.add(label_or_unknown(Some(method)));

        for kpi in split_kpis(kpis) {
            by_kpi.add(&kpi);
        }

        for (field, counter) in repro.iter_mut() {
            counter.add(label_or_unknown(row.get(field.column())));
        }
    }

    let mut take = |field: ReproField| {
        repro
            .remove(&field)
            .map(FacetCounter::into_sorted)
            .unwrap_or_default()
    };

    let reproducibility = Reproducibility {
        code_available: take(ReproField::CodeAvailable),
        simulator_available: take(ReproField::SimulatorAvailable),
        deployment_status: take(ReproField::DeploymentStatus),
    };

    let summary = Summary {
        total_studies: rows.len(),
        by_year: by_year.into_sorted(),
        by_domain: by_domain.into_sorted(),
        by_method: by_method.into_sorted(),
        by_kpi: by_kpi.into_sorted(),
        reproducibility,
    };

    debug!(
        "Summarized {} studies: {} years, {} domains, {} methods, {} KPIs",
        summary.total_studies,
        summary.by_year.len(),
        summary.by_domain.len(),
        summary.by_method.len(),
        summary.by_kpi.len()
    );

    Ok(summary)
}
