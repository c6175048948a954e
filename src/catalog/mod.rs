//! Study catalog reader.
//!
//! Parses the comma-separated catalog into [`Row`] records keyed by the
//! header row. No field is validated here; the aggregator decides which
//! fields are required and how empty values are labelled.

use crate::error::{Result, StatsError};
use crate::models::Row;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read the catalog at `path`, preserving file row order.
pub fn read_catalog(path: &Path) -> Result<Vec<Row>> {
    if !path.exists() {
        return Err(StatsError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| StatsError::io(path, e))?;
    let rows = read_catalog_from(file)?;

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse catalog rows from any reader. The first record is the header.
pub fn read_catalog_from<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        // Short records leave trailing columns absent rather than empty.
        let row: Row = headers.iter().zip(record.iter()).collect();
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = "\
year,manufacturing_domain,rl_method,kpis,code_available,simulator_available,deployment_status
2021,Scheduling,PPO,\"makespan, tardiness\",yes,no,simulation
2019,Maintenance,DQN,cost and downtime,,yes,
";

    #[test]
    fn test_read_catalog_from_str() {
        let rows = read_catalog_from(CATALOG.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("year"), Some("2021"));
        assert_eq!(rows[0].get("kpis"), Some("makespan, tardiness"));
        assert_eq!(rows[1].get("rl_method"), Some("DQN"));
        assert_eq!(rows[1].get("code_available"), Some(""));
    }

    #[test]
    fn test_header_only_catalog() {
        let rows = read_catalog_from("year,manufacturing_domain\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_short_record_leaves_fields_absent() {
        let rows = read_catalog_from("year,rl_method,kpis\n2020,SAC\n".as_bytes()).unwrap();
        assert_eq!(rows[0].get("rl_method"), Some("SAC"));
        assert_eq!(rows[0].get("kpis"), None);
    }

    #[test]
    fn test_long_record_drops_extra_cells() {
        let rows =
            read_catalog_from("year,rl_method\n2020,SAC,stray,cells\n".as_bytes()).unwrap();

        assert_eq!(rows[0].get("year"), Some("2020"));
        assert_eq!(rows[0].get("rl_method"), Some("SAC"));
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn test_repeated_header_keeps_last_column() {
        let rows = read_catalog_from("year,kpis,year\n2019,cost,2021\n".as_bytes()).unwrap();
        assert_eq!(rows[0].get("year"), Some("2021"));
    }

    #[test]
    fn test_read_catalog_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.csv");

        match read_catalog(&path) {
            Err(StatsError::NotFound { path: p }) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_read_catalog_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("study_catalog.csv");
        std::fs::write(&path, CATALOG).unwrap();

        let rows = read_catalog(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("manufacturing_domain"), Some("Maintenance"));
    }
}
