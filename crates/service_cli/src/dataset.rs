//! Dataset file loading.
//!
//! A dataset file is one JSON object holding the four tables, each an array
//! of row objects: `metrics`, `network` (or `exposures`), `market` and
//! `labels`.

use contagion_risk::RawDataset;
use std::path::Path;
use tracing::{debug, info};

use crate::{CliError, Result};

/// Reads a dataset file.
///
/// Missing tables are not an error here; the normaliser reports them.
pub fn load_dataset(path: &Path) -> Result<RawDataset> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    debug!(bytes = content.len(), "Read dataset file");
    let dataset: RawDataset = serde_json::from_str(&content)?;

    info!(
        path = %path.display(),
        metrics = dataset.metrics.as_ref().map_or(0, Vec::len),
        network = dataset.network.as_ref().map_or(0, Vec::len),
        market = dataset.market.as_ref().map_or(0, Vec::len),
        labels = dataset.labels.as_ref().map_or(0, Vec::len),
        "Dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/dataset.json")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn test_exposures_alias() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"metrics": [], "exposures": [], "market": [], "labels": []}}"#
        )
        .unwrap();
        let dataset = load_dataset(file.path()).unwrap();
        assert!(dataset.network.is_some());
        assert!(dataset.tables().is_ok());
    }
}
