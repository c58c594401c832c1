//! Export functionality for derived bank metrics.
//!
//! CSV and JSON export of metric observations in long form: one record
//! per (bank, reporting date, metric).

use chrono::NaiveDate;
use hobart_metrics::{MetricRow, catalog};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// A single metric observation for one bank at one reporting date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricObservation {
    /// Bank display name.
    pub bank: String,

    /// Reporting date.
    pub date: NaiveDate,

    /// Metric name from the catalog.
    pub metric: String,

    /// Metric value; `None` when undefined at this date.
    pub value: Option<f64>,
}

impl MetricObservation {
    /// Create a new metric observation.
    pub const fn new(bank: String, date: NaiveDate, metric: String, value: Option<f64>) -> Self {
        Self {
            bank,
            date,
            metric,
            value,
        }
    }
}

/// Flatten derived rows into long-form observations.
///
/// Metrics appear in catalog display order within each row.
pub fn to_observations(rows: &[MetricRow]) -> Vec<MetricObservation> {
    let order = catalog::display_order();
    let mut observations = Vec::with_capacity(rows.len() * order.len());

    for row in rows {
        for metric in &order {
            observations.push(MetricObservation::new(
                row.bank.clone(),
                row.date,
                (*metric).to_string(),
                row.value(metric),
            ));
        }
    }

    observations
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for MetricObservation {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                wtr.serialize(self)?;
                let data = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)
                    .map_err(|e| ExportError::InvalidFormat(e.to_string()))?;
                Ok(data)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<MetricObservation> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in self {
                    wtr.serialize(record)?;
                }
                let data = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)
                    .map_err(|e| ExportError::InvalidFormat(e.to_string()))?;
                Ok(data)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
