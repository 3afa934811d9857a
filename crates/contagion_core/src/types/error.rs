//! Error types for parsing enumerated institution attributes.

use thiserror::Error;

/// Errors raised when parsing enumerated attributes from text.
///
/// # Examples
/// ```
/// use contagion_core::types::TypeError;
///
/// let err = TypeError::UnknownSector("Crypto".to_string());
/// assert_eq!(format!("{}", err), "Unknown sector: Crypto");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Classification label not in {G-SIB, D-SIB, Regional, Investment}
    #[error("Unknown classification: {0}")]
    UnknownClassification(String),

    /// Sector label not in {Banking, Insurance, Asset Management}
    #[error("Unknown sector: {0}")]
    UnknownSector(String),
}
