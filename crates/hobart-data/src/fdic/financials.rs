//! Quarterly financial reports from the BankFind `financials` endpoint.
//!
//! Each reporting period arrives as a flat map of regulatory field codes
//! (`ASSET`, `DEP`, `LNRE`, ...) to raw values. The acquisition layer does
//! no numeric interpretation; it only parses the reporting date and hands
//! the raw fields to the metrics engine.

use crate::error::{DataError, Result};
use crate::fdic::FdicClient;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Regulatory field codes requested for every reporting period.
///
/// Covers balance-sheet totals, the loan-category breakdown, capital
/// figures, charge-off activity, and the precomputed ratio fields the FDIC
/// publishes alongside the raw dollar amounts.
pub const FINANCIAL_FIELDS: &[&str] = &[
    "CERT", "REPDTE", "ASSET", "DEP", "LNLSGR", "LNLSNET", "SC", "LNRE", "LNCI", "LNAG", "LNCRCD",
    "LNCONOTH", "LNATRES", "P3ASSET", "P9ASSET", "RBCT1J", "DRLNLS", "CRLNLS", "NETINC", "ERNASTR",
    "NPERFV", "P3ASSETR", "P9ASSETR", "NIMY", "NTLNLSR", "LNATRESR", "NCLNLSR", "ROA", "ROE",
    "RBC1AAJ", "RBCT2", "RBCRWAJ", "LNLSDEPR", "LNLSNTV", "EEFFR", "LNRESNCR", "ELNANTR",
    "IDERNCVR", "NTLNLSQ", "LNRECONS", "LNRENRES", "LNRENROW", "LNRENROT", "LNRERES", "LNREMULT",
    "LNREAG", "LNRECNFM", "LNRECNOT", "LNCOMRE", "CT1BADJ", "EQ", "EQPP",
];

/// Date format used by the BankFind API for `REPDTE`.
const REPDTE_FORMAT: &str = "%Y%m%d";

/// One reporting period for one bank, as raw regulatory fields.
///
/// Immutable once constructed; input contract of the metrics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPeriodRecord {
    /// FDIC certificate number of the reporting institution.
    pub cert: String,
    /// Reporting date the snapshot applies to (quarterly cadence).
    pub report_date: NaiveDate,
    /// Raw field code to value map, exactly as returned by the API.
    pub fields: serde_json::Map<String, Value>,
}

impl RawPeriodRecord {
    /// Build a record from a raw BankFind row.
    ///
    /// Returns `None` when the row has no parseable `REPDTE` or `CERT`;
    /// such rows are skipped during acquisition rather than surfaced to the
    /// engine, which assumes every record carries a reporting date.
    pub fn from_row(row: serde_json::Map<String, Value>) -> Option<Self> {
        let report_date = parse_repdte(row.get("REPDTE")?)?;
        let cert = match row.get("CERT")? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            _ => return None,
        };

        Some(Self {
            cert,
            report_date,
            fields: row,
        })
    }

    /// Raw value of a regulatory field code, if present.
    pub fn raw(&self, code: &str) -> Option<&Value> {
        self.fields.get(code)
    }
}

/// Parse a `REPDTE` value (YYYYMMDD, seen both as string and number).
fn parse_repdte(value: &Value) -> Option<NaiveDate> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    NaiveDate::parse_from_str(&text, REPDTE_FORMAT).ok()
}

impl FdicClient {
    /// Fetch all reporting periods for one institution in a date range.
    ///
    /// Results are sorted ascending by reporting date. An institution with
    /// no reports in the range yields an empty vector, not an error.
    ///
    /// # Arguments
    /// * `cert` - FDIC certificate number
    /// * `start` - First reporting date of interest (inclusive)
    /// * `end` - Last reporting date of interest (inclusive)
    pub async fn fetch_financials(
        &self,
        cert: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawPeriodRecord>> {
        if cert.is_empty() || !cert.chars().all(|c| c.is_ascii_digit()) {
            return Err(DataError::InvalidCert(cert.to_string()));
        }
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let filters = format!(
            "CERT:{} AND REPDTE:[{} TO {}]",
            cert,
            start.format(REPDTE_FORMAT),
            end.format(REPDTE_FORMAT)
        );
        let fields = FINANCIAL_FIELDS.join(",");

        let rows = self.query("financials", &filters, &fields).await?;

        let mut records: Vec<RawPeriodRecord> =
            rows.into_iter().filter_map(RawPeriodRecord::from_row).collect();
        records.sort_by_key(|r| r.report_date);

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_record_from_row() {
        let record = RawPeriodRecord::from_row(row(json!({
            "CERT": 32541,
            "REPDTE": "20240630",
            "ASSET": 113500000,
            "NIMY": 2.81
        })))
        .unwrap();

        assert_eq!(record.cert, "32541");
        assert_eq!(record.report_date, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert_eq!(record.raw("ASSET"), Some(&json!(113500000)));
        assert_eq!(record.raw("LNRE"), None);
    }

    #[test]
    fn test_numeric_repdte() {
        let record =
            RawPeriodRecord::from_row(row(json!({"CERT": 628, "REPDTE": 20231231}))).unwrap();
        assert_eq!(record.report_date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_unparseable_rows_are_skipped() {
        assert!(RawPeriodRecord::from_row(row(json!({"CERT": 628}))).is_none());
        assert!(RawPeriodRecord::from_row(row(json!({"REPDTE": "20231231"}))).is_none());
        assert!(
            RawPeriodRecord::from_row(row(json!({"CERT": 628, "REPDTE": "not-a-date"}))).is_none()
        );
    }

    #[test]
    fn test_field_list_covers_capital_inputs() {
        for code in ["CT1BADJ", "EQ", "EQPP", "RBCT1J", "LNATRES", "NTLNLSQ"] {
            assert!(FINANCIAL_FIELDS.contains(&code), "missing {}", code);
        }
    }

    #[test]
    fn test_record_roundtrips_through_json() {
        let record = RawPeriodRecord::from_row(row(json!({
            "CERT": 32541,
            "REPDTE": "20240630",
            "ASSET": 113500000
        })))
        .unwrap();

        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: RawPeriodRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
    }
}
