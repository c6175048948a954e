//! JSON summary artifact.
//!
//! The artifact is the only thing downstream renderers read, so the
//! layout is fixed: keys in [`Summary`] field order, two-space indent.

use crate::error::{Result, StatsError};
use crate::models::Summary;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Render the summary as pretty-printed JSON.
pub fn render_json(summary: &Summary) -> Result<String> {
    serde_json::to_string_pretty(summary).map_err(Into::into)
}

/// Write the summary artifact, creating parent directories as needed.
pub fn write_summary(summary: &Summary, path: &Path) -> Result<()> {
    let content = render_json(summary)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StatsError::io(parent, e))?;
    }

    fs::write(path, content.as_bytes()).map_err(|e| StatsError::io(path, e))?;

    info!("Wrote summary to {}", path.display());
    Ok(())
}

/// Load a previously written summary artifact.
pub fn load_summary(path: &Path) -> Result<Summary> {
    if !path.exists() {
        return Err(StatsError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| StatsError::io(path, e))?;
    let summary: Summary = serde_json::from_str(&content)?;

    debug!(
        "Loaded summary with {} studies from {}",
        summary.total_studies,
        path.display()
    );
    Ok(summary)
}
