//! Cascade error types.

use thiserror::Error;

/// Precondition violations reported before any round executes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CascadeError {
    /// The trigger institution is not in the snapshot.
    #[error("Unknown start institution: {0}")]
    UnknownStartInstitution(String),

    /// Loss given default outside [0, 1] or not finite.
    #[error("Invalid loss given default: {0} (must be in [0, 1])")]
    InvalidLossGivenDefault(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_start() {
        let err = CascadeError::UnknownStartInstitution("BANK_404".to_string());
        assert_eq!(format!("{}", err), "Unknown start institution: BANK_404");
    }

    #[test]
    fn test_error_display_invalid_lgd() {
        let err = CascadeError::InvalidLossGivenDefault(1.5);
        assert_eq!(
            format!("{}", err),
            "Invalid loss given default: 1.5 (must be in [0, 1])"
        );
    }
}
