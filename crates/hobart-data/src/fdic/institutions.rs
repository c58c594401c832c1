//! Institution lookup via the BankFind `institutions` endpoint.

use crate::error::{DataError, Result};
use crate::fdic::FdicClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields requested from the `institutions` endpoint.
const INSTITUTION_FIELDS: &str = "NAME,CERT";

/// An FDIC-insured institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    /// FDIC certificate number, the institution's primary identifier.
    pub cert: String,
    /// Legal name as registered with the FDIC.
    pub name: String,
}

impl Institution {
    /// Build an institution from a raw BankFind row.
    ///
    /// CERT arrives as a JSON number in practice, but older snapshots have
    /// been seen with string values, so both are accepted.
    fn from_row(row: &serde_json::Map<String, Value>) -> Option<Self> {
        let cert = match row.get("CERT")? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            _ => return None,
        };
        let name = row.get("NAME")?.as_str()?.to_string();
        Some(Self { cert, name })
    }
}

impl FdicClient {
    /// Look up an institution by its FDIC certificate number.
    ///
    /// # Errors
    /// Returns `DataError::InstitutionNotFound` if the cert is unknown.
    pub async fn institution_by_cert(&self, cert: &str) -> Result<Institution> {
        if cert.is_empty() || !cert.chars().all(|c| c.is_ascii_digit()) {
            return Err(DataError::InvalidCert(cert.to_string()));
        }

        let filters = format!("CERT:{}", cert);
        let rows = self.query("institutions", &filters, INSTITUTION_FIELDS).await?;

        rows.iter()
            .find_map(Institution::from_row)
            .ok_or_else(|| DataError::InstitutionNotFound(cert.to_string()))
    }

    /// Look up an institution by its exact registered name.
    ///
    /// # Errors
    /// Returns `DataError::InstitutionNotFound` if no institution matches.
    pub async fn institution_by_name(&self, name: &str) -> Result<Institution> {
        if name.is_empty() {
            return Err(DataError::InstitutionNotFound("empty name".to_string()));
        }

        let filters = format!("NAME:\"{}\"", name);
        let rows = self.query("institutions", &filters, INSTITUTION_FIELDS).await?;

        rows.iter()
            .find_map(Institution::from_row)
            .ok_or_else(|| DataError::InstitutionNotFound(name.to_string()))
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
    fn test_institution_from_numeric_cert() {
        let inst = Institution::from_row(&row(json!({
            "CERT": 32541,
            "NAME": "Flagstar Bank, National Association"
        })))
        .unwrap();

        assert_eq!(inst.cert, "32541");
        assert_eq!(inst.name, "Flagstar Bank, National Association");
    }

    #[test]
    fn test_institution_from_string_cert() {
        let inst = Institution::from_row(&row(json!({"CERT": "628", "NAME": "JPMorgan"}))).unwrap();
        assert_eq!(inst.cert, "628");
    }

    #[test]
    fn test_institution_missing_fields() {
        assert!(Institution::from_row(&row(json!({"CERT": 628}))).is_none());
        assert!(Institution::from_row(&row(json!({"NAME": "JPMorgan"}))).is_none());
        assert!(Institution::from_row(&row(json!({"CERT": true, "NAME": "x"}))).is_none());
    }
}
