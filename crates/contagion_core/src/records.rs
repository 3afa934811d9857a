//! Raw input table rows.
//!
//! Rows arrive from the ingestion layer keyed by date. Numeric fields are
//! kept as `Option<f64>`: `None` stands for a value that was absent or
//! non-numeric upstream. The `*_or_default` accessors resolve each field
//! against its documented default, so an invalid field never rejects a row.
//!
//! | Field            | Valid domain | Default |
//! |------------------|--------------|---------|
//! | `total_assets`   | >= 0         | 0       |
//! | `leverage_ratio` | > 0          | 15      |
//! | `liquidity_ratio`| >= 0         | 1       |
//! | `roe`            | any finite   | 0       |
//! | `cds_spread`     | >= 0         | 100     |
//! | `vix_index`      | >= 0         | 25      |
//! | `exposure_amount`| >= 0         | 0       |

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::types::{Classification, InstitutionId, Sector};

/// Field-level defaults for invalid numeric inputs.
pub mod defaults {
    /// Leverage ratio default
    pub const LEVERAGE_RATIO: f64 = 15.0;
    /// Liquidity ratio default
    pub const LIQUIDITY_RATIO: f64 = 1.0;
    /// CDS spread default (bps)
    pub const CDS_SPREAD: f64 = 100.0;
    /// Market volatility default
    pub const VIX: f64 = 25.0;
    /// Total assets default
    pub const TOTAL_ASSETS: f64 = 0.0;
    /// Return on equity default
    pub const ROE: f64 = 0.0;
    /// Exposure amount default
    pub const EXPOSURE_AMOUNT: f64 = 0.0;
}

/// Resolves a strictly positive field.
#[inline]
pub fn positive_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(default)
}

/// Resolves a non-negative field.
#[inline]
pub fn non_negative_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(default)
}

/// Resolves a field that may take any finite value.
#[inline]
pub fn finite_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
    Flag(bool),
    Other(serde::de::IgnoredAny),
}

/// Deserialises a number that may arrive as a number, numeric text, a
/// boolean, null, or garbage. Anything non-numeric becomes `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<LenientNumber>::deserialize(deserializer)? {
        Some(LenientNumber::Number(v)) => Some(v),
        Some(LenientNumber::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(LenientNumber::Flag(b)) => Some(if b { 1.0 } else { 0.0 }),
        Some(LenientNumber::Other(_)) | None => None,
    };
    Ok(value.filter(|x| x.is_finite()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientText {
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Deserialises an optional label through its `FromStr` spelling.
///
/// Unrecognised text and non-text values become `None`, so one bad cell
/// falls back to the derived value instead of rejecting the table.
pub fn lenient_parse<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    match Option::<LenientText>::deserialize(deserializer)? {
        Some(LenientText::Text(s)) => match s.parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                warn!(value = %s, "Unrecognised label, falling back to derived value");
                Ok(None)
            }
        },
        Some(LenientText::Other(_)) => {
            debug!("Non-text label ignored");
            Ok(None)
        }
        None => Ok(None),
    }
}

/// One row of the institution metrics table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    /// Observation date
    pub date: NaiveDate,
    /// Institution key
    pub institution_id: InstitutionId,
    /// Total assets
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_assets: Option<f64>,
    /// Leverage ratio (assets / equity)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub leverage_ratio: Option<f64>,
    /// Liquidity ratio
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liquidity_ratio: Option<f64>,
    /// Return on equity
    #[serde(default, deserialize_with = "lenient_f64")]
    pub roe: Option<f64>,
    /// CDS spread in basis points
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cds_spread: Option<f64>,
    /// Authoritative display name, when supplied upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Authoritative classification, when supplied upstream
    #[serde(
        default,
        deserialize_with = "lenient_parse",
        skip_serializing_if = "Option::is_none"
    )]
    pub classification: Option<Classification>,
    /// Authoritative sector, when supplied upstream
    #[serde(
        default,
        deserialize_with = "lenient_parse",
        skip_serializing_if = "Option::is_none"
    )]
    pub sector: Option<Sector>,
}

impl MetricsRow {
    /// Creates a row with every numeric field unset.
    pub fn new(date: NaiveDate, institution_id: impl Into<InstitutionId>) -> Self {
        Self {
            date,
            institution_id: institution_id.into(),
            total_assets: None,
            leverage_ratio: None,
            liquidity_ratio: None,
            roe: None,
            cds_spread: None,
            name: None,
            classification: None,
            sector: None,
        }
    }

    /// Sets total assets.
    pub fn with_total_assets(mut self, value: f64) -> Self {
        self.total_assets = Some(value);
        self
    }

    /// Sets the leverage ratio.
    pub fn with_leverage_ratio(mut self, value: f64) -> Self {
        self.leverage_ratio = Some(value);
        self
    }

    /// Sets the liquidity ratio.
    pub fn with_liquidity_ratio(mut self, value: f64) -> Self {
        self.liquidity_ratio = Some(value);
        self
    }

    /// Sets the CDS spread.
    pub fn with_cds_spread(mut self, value: f64) -> Self {
        self.cds_spread = Some(value);
        self
    }

    /// Sets the return on equity.
    pub fn with_roe(mut self, value: f64) -> Self {
        self.roe = Some(value);
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Total assets, defaulting to 0.
    #[inline]
    pub fn total_assets_or_default(&self) -> f64 {
        non_negative_or(self.total_assets, defaults::TOTAL_ASSETS)
    }

    /// Leverage ratio, defaulting to 15.
    #[inline]
    pub fn leverage_ratio_or_default(&self) -> f64 {
        positive_or(self.leverage_ratio, defaults::LEVERAGE_RATIO)
    }

    /// Liquidity ratio, defaulting to 1.
    #[inline]
    pub fn liquidity_ratio_or_default(&self) -> f64 {
        non_negative_or(self.liquidity_ratio, defaults::LIQUIDITY_RATIO)
    }

    /// Return on equity, defaulting to 0.
    #[inline]
    pub fn roe_or_default(&self) -> f64 {
        finite_or(self.roe, defaults::ROE)
    }

    /// CDS spread, defaulting to 100 bps.
    #[inline]
    pub fn cds_spread_or_default(&self) -> f64 {
        non_negative_or(self.cds_spread, defaults::CDS_SPREAD)
    }

    /// Number of numeric fields that will fall back to a default.
    pub fn defaulted_field_count(&self) -> usize {
        let checks = [
            self.total_assets.filter(|v| v.is_finite() && *v >= 0.0).is_none(),
            self.leverage_ratio.filter(|v| v.is_finite() && *v > 0.0).is_none(),
            self.liquidity_ratio.filter(|v| v.is_finite() && *v >= 0.0).is_none(),
            self.roe.filter(|v| v.is_finite()).is_none(),
            self.cds_spread.filter(|v| v.is_finite() && *v >= 0.0).is_none(),
        ];
        checks.iter().filter(|defaulted| **defaulted).count()
    }
}

/// One row of the exposure network table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExposureRow {
    /// Observation date
    pub date: NaiveDate,
    /// Lending institution
    pub creditor_id: InstitutionId,
    /// Borrowing institution
    pub debtor_id: InstitutionId,
    /// Notional exposure
    #[serde(default, deserialize_with = "lenient_f64")]
    pub exposure_amount: Option<f64>,
    /// Collateral held against the exposure
    #[serde(default, deserialize_with = "lenient_f64")]
    pub collateral_value: Option<f64>,
}

impl ExposureRow {
    /// Creates a row with the given amount and no collateral.
    pub fn new(
        date: NaiveDate,
        creditor_id: impl Into<InstitutionId>,
        debtor_id: impl Into<InstitutionId>,
        exposure_amount: f64,
    ) -> Self {
        Self {
            date,
            creditor_id: creditor_id.into(),
            debtor_id: debtor_id.into(),
            exposure_amount: Some(exposure_amount),
            collateral_value: None,
        }
    }

    /// Exposure amount, defaulting to 0.
    #[inline]
    pub fn amount_or_default(&self) -> f64 {
        non_negative_or(self.exposure_amount, defaults::EXPOSURE_AMOUNT)
    }

    /// Collateral value, if valid.
    #[inline]
    pub fn collateral(&self) -> Option<f64> {
        self.collateral_value.filter(|v| v.is_finite() && *v >= 0.0)
    }

    /// Returns true when creditor and debtor coincide.
    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.creditor_id == self.debtor_id
    }
}

/// One row of the market data table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketRow {
    /// Observation date
    pub date: NaiveDate,
    /// Market volatility index
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vix_index: Option<f64>,
    /// Yield-curve slope
    #[serde(default, deserialize_with = "lenient_f64")]
    pub yield_curve_slope: Option<f64>,
    /// GDP growth
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gdp_growth: Option<f64>,
}

impl MarketRow {
    /// Creates a row with only a volatility reading.
    pub fn new(date: NaiveDate, vix_index: f64) -> Self {
        Self {
            date,
            vix_index: Some(vix_index),
            yield_curve_slope: None,
            gdp_growth: None,
        }
    }

    /// Volatility index, defaulting to 25.
    #[inline]
    pub fn vix_or_default(&self) -> f64 {
        non_negative_or(self.vix_index, defaults::VIX)
    }
}

/// One row of the crisis label table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelRow {
    /// Observation date
    pub date: NaiveDate,
    /// Crisis flag (0/1)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub is_crisis: Option<f64>,
    /// Crisis severity on a 0-10 scale
    #[serde(default, deserialize_with = "lenient_f64")]
    pub crisis_severity: Option<f64>,
}

impl LabelRow {
    /// Creates a label row.
    pub fn new(date: NaiveDate, is_crisis: bool, crisis_severity: Option<f64>) -> Self {
        Self {
            date,
            is_crisis: Some(if is_crisis { 1.0 } else { 0.0 }),
            crisis_severity,
        }
    }

    /// Whether the crisis flag is set. Missing flags read as no crisis.
    #[inline]
    pub fn crisis(&self) -> bool {
        self.is_crisis.is_some_and(|v| v.is_finite() && v != 0.0)
    }

    /// Recorded severity, if present and finite.
    #[inline]
    pub fn severity(&self) -> Option<f64> {
        self.crisis_severity.filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    #[test]
    fn test_metrics_defaults_when_missing() {
        let row = MetricsRow::new(date(), "B1");
        assert_eq!(row.total_assets_or_default(), 0.0);
        assert_eq!(row.leverage_ratio_or_default(), 15.0);
        assert_eq!(row.liquidity_ratio_or_default(), 1.0);
        assert_eq!(row.roe_or_default(), 0.0);
        assert_eq!(row.cds_spread_or_default(), 100.0);
        assert_eq!(row.defaulted_field_count(), 5);
    }

    #[test]
    fn test_metrics_defaults_when_out_of_domain() {
        let row = MetricsRow::new(date(), "B1")
            .with_total_assets(-5.0)
            .with_leverage_ratio(0.0)
            .with_liquidity_ratio(f64::NAN)
            .with_cds_spread(-1.0);
        assert_eq!(row.total_assets_or_default(), 0.0);
        assert_eq!(row.leverage_ratio_or_default(), 15.0);
        assert_eq!(row.liquidity_ratio_or_default(), 1.0);
        assert_eq!(row.cds_spread_or_default(), 100.0);
    }

    #[test]
    fn test_lenient_deserialisation() {
        let json = r#"{
            "date": "2024-12-31",
            "institution_id": "B7",
            "total_assets": "1500.5",
            "leverage_ratio": "n/a",
            "liquidity_ratio": null,
            "cds_spread": 240
        }"#;
        let row: MetricsRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.total_assets, Some(1500.5));
        assert_eq!(row.leverage_ratio, None);
        assert_eq!(row.liquidity_ratio, None);
        assert_eq!(row.roe, None);
        assert_eq!(row.cds_spread, Some(240.0));
        assert_eq!(row.leverage_ratio_or_default(), 15.0);
    }

    #[test]
    fn test_lenient_labels() {
        let json = r#"{
            "date": "2024-12-31",
            "institution_id": "B7",
            "classification": "gsib",
            "sector": "asset_management"
        }"#;
        let row: MetricsRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.classification, Some(Classification::GSib));
        assert_eq!(row.sector, Some(Sector::AssetManagement));

        let json = r#"{
            "date": "2024-12-31",
            "institution_id": "B7",
            "classification": 3,
            "sector": "Fintech"
        }"#;
        let row: MetricsRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.classification, None);
        assert_eq!(row.sector, None);
    }

    #[test]
    fn test_labels_survive_serialisation() {
        let mut row = MetricsRow::new(date(), "B7");
        row.classification = Some(Classification::DSib);
        row.sector = Some(Sector::AssetManagement);
        let json = serde_json::to_string(&row).unwrap();
        let back: MetricsRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.classification, Some(Classification::DSib));
        assert_eq!(back.sector, Some(Sector::AssetManagement));
    }

    #[test]
    fn test_lenient_deserialisation_nested_garbage() {
        let json = r#"{"date": "2024-12-31", "vix_index": {"value": 3}}"#;
        let row: MarketRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.vix_index, None);
        assert_eq!(row.vix_or_default(), 25.0);
    }

    #[test]
    fn test_label_crisis_flag() {
        assert!(LabelRow::new(date(), true, None).crisis());
        assert!(!LabelRow::new(date(), false, None).crisis());

        let json = r#"{"date": "2024-12-31", "is_crisis": "1", "crisis_severity": "8.5"}"#;
        let row: LabelRow = serde_json::from_str(json).unwrap();
        assert!(row.crisis());
        assert_eq!(row.severity(), Some(8.5));

        let json = r#"{"date": "2024-12-31"}"#;
        let row: LabelRow = serde_json::from_str(json).unwrap();
        assert!(!row.crisis());
        assert_eq!(row.severity(), None);
    }

    #[test]
    fn test_exposure_row_accessors() {
        let row = ExposureRow::new(date(), "A", "A", -3.0);
        assert!(row.is_self_loop());
        assert_eq!(row.amount_or_default(), 0.0);
        assert_eq!(row.collateral(), None);
    }
}
