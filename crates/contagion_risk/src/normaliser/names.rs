//! Display-name fallback table.
//!
//! Used only when the metrics row carries no authoritative name.

use contagion_core::InstitutionId;

/// Name prefixes indexed by the key's numeric suffix modulo the table size.
pub const NAME_PREFIXES: [&str; 12] = [
    "Atlas",
    "Meridian",
    "Northgate",
    "Summit",
    "Harbor",
    "Crestline",
    "Pioneer",
    "Sterling",
    "Beacon",
    "Keystone",
    "Granite",
    "Riverside",
];

/// Deterministic display name for an institution key.
///
/// Keys without a numeric suffix map to the first prefix.
///
/// # Examples
///
/// ```
/// use contagion_core::InstitutionId;
/// use contagion_risk::normaliser::display_name;
///
/// assert_eq!(display_name(&InstitutionId::new("BANK_013")), "Meridian Financial (BANK_013)");
/// assert_eq!(display_name(&InstitutionId::new("XYZ")), "Atlas Financial (XYZ)");
/// ```
pub fn display_name(id: &InstitutionId) -> String {
    let slot = id
        .numeric_suffix()
        .map_or(0, |n| (n % NAME_PREFIXES.len() as u64) as usize);
    format!("{} Financial ({})", NAME_PREFIXES[slot], id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let id = InstitutionId::new("BANK_007");
        assert_eq!(display_name(&id), display_name(&id));
        assert!(display_name(&id).starts_with("Sterling"));
    }

    #[test]
    fn test_wraps_modulo_table() {
        let a = display_name(&InstitutionId::new("B2"));
        let b = display_name(&InstitutionId::new("B14"));
        assert!(a.starts_with("Northgate"));
        assert!(b.starts_with("Northgate"));
    }
}
