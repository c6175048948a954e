//! PRISMA flow counts.
//!
//! Reads the per-phase record counts of the systematic review and lays
//! them out in the fixed phase order for the thesis table.

use crate::error::{Result, StatsError};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Review phases in reporting order: (CSV key, display label).
pub const PHASE_ORDER: [(&str, &str); 4] = [
    ("identification", "Identification"),
    ("screening", "Screening"),
    ("eligibility", "Eligibility"),
    ("inclusion", "Inclusion"),
];

/// Record counts for each phase, in [`PHASE_ORDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrismaCounts {
    pub phases: Vec<(String, u64)>,
}

impl PrismaCounts {
    /// Order raw counts by phase. Phases without a row count as zero and
    /// unknown phases are ignored.
    pub fn from_counts(counts: &HashMap<String, u64>) -> Self {
        let phases = PHASE_ORDER
            .iter()
            .map(|(key, label)| (label.to_string(), counts.get(*key).copied().unwrap_or(0)))
            .collect();
        Self { phases }
    }
}

/// Read the flow counts CSV at `path`.
pub fn read_flow_counts(path: &Path) -> Result<HashMap<String, u64>> {
    if !path.exists() {
        return Err(StatsError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| StatsError::io(path, e))?;
    read_flow_counts_from(file)
}

/// Parse `phase,count` rows. Repeated phases keep the largest count.
pub fn read_flow_counts_from<R: Read>(reader: R) -> Result<HashMap<String, u64>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let phase_idx = headers.iter().position(|h| h == "phase");
    let count_idx = headers.iter().position(|h| h == "count");

    let mut counts: HashMap<String, u64> = HashMap::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = index + 1;

        let phase = phase_idx
            .and_then(|i| record.get(i))
            .ok_or(StatsError::MissingField { field: "phase", row })?
            .trim()
            .to_lowercase();
        let raw_count = count_idx
            .and_then(|i| record.get(i))
            .ok_or(StatsError::MissingField { field: "count", row })?;

        let count: u64 = raw_count
            .trim()
            .parse()
            .map_err(|_| StatsError::InvalidCount {
                phase: phase.clone(),
                value: raw_count.to_string(),
            })?;

        let entry = counts.entry(phase).or_insert(0);
        *entry = (*entry).max(count);
    }

    debug!("Read flow counts for {} phases", counts.len());
    Ok(counts)
}

/// Two-column tabular of phase and record count.
pub fn render_prisma_table(counts: &PrismaCounts) -> String {
    let mut lines = vec![
        "\\begin{tabular}{l r}".to_string(),
        "\\toprule".to_string(),
        "Phase & Records \\\\".to_string(),
        "\\midrule".to_string(),
    ];
    lines.extend(
        counts
            .phases
            .iter()
            .map(|(label, count)| format!("{} & {} \\\\", label, count)),
    );
    lines.push("\\bottomrule".to_string());
    lines.push("\\end{tabular}".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_max_per_phase() {
        let csv = "phase,count\nIdentification,120\n identification ,340\nscreening,200\n";
        let counts = read_flow_counts_from(csv.as_bytes()).unwrap();

        assert_eq!(counts.get("identification"), Some(&340));
        assert_eq!(counts.get("screening"), Some(&200));
    }

    #[test]
    fn test_ordered_with_missing_phases() {
        let csv = "phase,count\ninclusion,25\nscreening,200\n";
        let counts = PrismaCounts::from_counts(&read_flow_counts_from(csv.as_bytes()).unwrap());

        assert_eq!(
            counts.phases,
            vec![
                ("Identification".to_string(), 0),
                ("Screening".to_string(), 200),
                ("Eligibility".to_string(), 0),
                ("Inclusion".to_string(), 25),
            ]
        );
    }

    #[test]
    fn test_invalid_count() {
        let csv = "phase,count\nscreening,many\n";
        match read_flow_counts_from(csv.as_bytes()) {
            Err(StatsError::InvalidCount { phase, value }) => {
                assert_eq!(phase, "screening");
                assert_eq!(value, "many");
            }
            other => panic!("expected InvalidCount, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_count_column() {
        let result = read_flow_counts_from("phase\nscreening\n".as_bytes());
        assert!(matches!(
            result,
            Err(StatsError::MissingField { field: "count", row: 1 })
        ));
    }

    #[test]
    fn test_render_prisma_table() {
        let counts = PrismaCounts {
            phases: vec![("Identification".to_string(), 340), ("Inclusion".to_string(), 25)],
        };
        let table = render_prisma_table(&counts);

        assert!(table.starts_with("\\begin{tabular}{l r}"));
        assert!(table.contains("Identification & 340 \\\\"));
        assert!(table.contains("Inclusion & 25 \\\\"));
        assert!(table.ends_with("\\end{tabular}"));
    }

    #[test]
    fn test_missing_counts_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_flow_counts(&temp_dir.path().join("flow_counts.csv"));
        assert!(matches!(result, Err(StatsError::NotFound { .. })));
    }
}
