//! Dataset error types.

use thiserror::Error;

/// Errors that stop a dataset from being normalised.
///
/// Field-level problems are never errors: they resolve to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// One or more mandatory tables were not supplied.
    #[error("Missing mandatory input: {}", .0.join(", "))]
    MissingMandatoryInput(Vec<&'static str>),

    /// The metrics table has no rows, so no reference date exists.
    #[error("Metrics table is empty; no reference date")]
    EmptyMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_input() {
        let err = DatasetError::MissingMandatoryInput(vec!["network", "labels"]);
        assert_eq!(format!("{}", err), "Missing mandatory input: network, labels");
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(DatasetError::EmptyMetrics);
        assert!(err.to_string().contains("empty"));
    }
}
