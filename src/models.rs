//! Data models for the study catalog and its summary.
//!
//! This module contains the row record produced by the catalog reader,
//! the facet count lists produced by the aggregator, and the summary
//! document handed to the renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label substituted for empty categorical values.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One catalog entry: field name to raw string value, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Lookups return the last occurrence of a repeated name.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Returns the value of a field, or `None` if the key is absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates fields in header order.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.push(k, v);
        }
        row
    }
}

/// Reproducibility attribute tracked per study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReproField {
    CodeAvailable,
    SimulatorAvailable,
    DeploymentStatus,
}

impl ReproField {
    /// All fields, in output order.
    pub const ALL: [ReproField; 3] = [
        ReproField::CodeAvailable,
        ReproField::SimulatorAvailable,
        ReproField::DeploymentStatus,
    ];

    /// Column name in the catalog and key in the summary.
    pub fn column(&self) -> &'static str {
        match self {
            ReproField::CodeAvailable => "code_available",
            ReproField::SimulatorAvailable => "simulator_available",
            ReproField::DeploymentStatus => "deployment_status",
        }
    }

    /// Column name with underscores as spaces, each word capitalized.
    pub fn title(&self) -> String {
        self.column()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ReproField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// A single label and how many studies carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub label: String,
    pub count: usize,
}

impl FacetCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Sum of counts across a facet list.
pub fn facet_total(entries: &[FacetCount]) -> usize {
    entries.iter().map(|e| e.count).sum()
}

/// Per-field reproducibility breakdown.
///
/// Serialized as a JSON object keyed by column name, fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reproducibility {
    #[serde(default)]
    pub code_available: Vec<FacetCount>,
    #[serde(default)]
    pub simulator_available: Vec<FacetCount>,
    #[serde(default)]
    pub deployment_status: Vec<FacetCount>,
}

impl Reproducibility {
    /// Facet list for a field.
    pub fn get(&self, field: ReproField) -> &[FacetCount] {
        match field {
            ReproField::CodeAvailable => &self.code_available,
            ReproField::SimulatorAvailable => &self.simulator_available,
            ReproField::DeploymentStatus => &self.deployment_status,
        }
    }

    /// Iterates fields in their fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (ReproField, &[FacetCount])> {
        ReproField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

/// Facet-grouped counts over the whole catalog.
///
/// Field order here is the key order of the JSON artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_studies: usize,
    #[serde(default)]
    pub by_year: Vec<FacetCount>,
    #[serde(default)]
    pub by_domain: Vec<FacetCount>,
    #[serde(default)]
    pub by_method: Vec<FacetCount>,
    #[serde(default)]
    pub by_kpi: Vec<FacetCount>,
    #[serde(default)]
    pub reproducibility: Reproducibility,
}
