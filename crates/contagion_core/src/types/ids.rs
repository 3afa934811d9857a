//! Identifier types for institutions.
//!
//! Institutions are keyed by a stable string. Wrapping it in a newtype keeps
//! institution keys from being mixed up with display names or other strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a financial institution.
///
/// # Examples
///
/// ```
/// use contagion_core::types::InstitutionId;
///
/// let id = InstitutionId::new("BANK_042");
/// assert_eq!(id.as_str(), "BANK_042");
/// assert_eq!(id.numeric_suffix(), Some(42));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstitutionId(String);

impl InstitutionId {
    /// Creates a new institution ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the trailing run of ASCII digits parsed as a number.
    ///
    /// `None` when the key does not end in a digit or the digits overflow.
    pub fn numeric_suffix(&self) -> Option<u64> {
        let digits_start = self
            .0
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;
        self.0[digits_start..].parse().ok()
    }
}

impl fmt::Display for InstitutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InstitutionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for InstitutionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
