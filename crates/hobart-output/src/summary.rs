//! Cross-bank metric snapshots.
//!
//! Summary statistics for a single metric at a single reporting date,
//! with bank attribution for the extremes and a ranked listing for
//! terminal display.

use chrono::NaiveDate;
use hobart_metrics::MetricRow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One bank's value for the snapshot metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankValue {
    /// Bank display name.
    pub bank: String,

    /// Metric value.
    pub value: f64,
}

/// Summary of one metric across banks at one reporting date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSnapshot {
    /// Metric name from the catalog.
    pub metric: String,

    /// Reporting date of the snapshot.
    pub date: NaiveDate,

    /// Mean across banks with a defined value.
    pub mean: f64,

    /// Median across banks with a defined value.
    pub median: f64,

    /// Bank with the lowest value.
    pub min: BankValue,

    /// Bank with the highest value.
    pub max: BankValue,

    /// All defined values, sorted descending.
    pub values: Vec<BankValue>,
}

impl MetricSnapshot {
    /// Build a snapshot of `metric` at `date` from derived rows.
    ///
    /// Rows for other dates are ignored; banks whose value is undefined
    /// at the date are excluded. Returns `None` when no bank has a
    /// defined value.
    pub fn new(rows: &[MetricRow], metric: &str, date: NaiveDate) -> Option<Self> {
        let mut values: Vec<BankValue> = rows
            .iter()
            .filter(|row| row.date == date)
            .filter_map(|row| {
                row.value(metric).map(|value| BankValue {
                    bank: row.bank.clone(),
                    value,
                })
            })
            .collect();

        if values.is_empty() {
            return None;
        }

        values.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().map(|v| v.value).sum::<f64>() / values.len() as f64;
        let median = {
            let mid = values.len() / 2;
            if values.len() % 2 == 0 {
                (values[mid - 1].value + values[mid].value) / 2.0
            } else {
                values[mid].value
            }
        };

        Some(Self {
            metric: metric.to_string(),
            date,
            mean,
            median,
            min: values.last().cloned()?,
            max: values.first().cloned()?,
            values,
        })
    }

    /// Number of banks with a defined value.
    pub fn bank_count(&self) -> usize {
        self.values.len()
    }

    /// Rank of a bank, 1 being the highest value.
    pub fn rank_of(&self, bank: &str) -> Option<usize> {
        self.values.iter().position(|v| v.bank == bank).map(|i| i + 1)
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{} at {}\n", self.metric, self.date));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("  Banks:   {}\n", self.bank_count()));
        output.push_str(&format!("  Mean:    {:.2}\n", self.mean));
        output.push_str(&format!("  Median:  {:.2}\n", self.median));
        output.push_str(&format!("  Max:     {:.2} ({})\n", self.max.value, self.max.bank));
        output.push_str(&format!("  Min:     {:.2} ({})\n", self.min.value, self.min.bank));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for (i, entry) in self.values.iter().enumerate() {
            output.push_str(&format!("{:>4}  {:<40} {:>12.2}\n", i + 1, entry.bank, entry.value));
        }

        output.push_str(&"=".repeat(60));
        output.push('\n');

        output
    }
}

impl fmt::Display for MetricSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}: mean {:.2}, median {:.2}, range {:.2} ({}) to {:.2} ({})",
            self.metric,
            self.date,
            self.mean,
            self.median,
            self.min.value,
            self.min.bank,
            self.max.value,
            self.max.bank
        )
    }
}

/// Most recent reporting date present in the rows.
pub fn latest_date(rows: &[MetricRow]) -> Option<NaiveDate> {
    rows.iter().map(|row| row.date).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hobart_data::RawPeriodRecord;
    use hobart_metrics::derive_metrics;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn rows() -> Vec<MetricRow> {
        let record = |cert: &str, roa: f64| RawPeriodRecord {
            cert: cert.to_string(),
            report_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            fields: json!({"ROA": roa}).as_object().unwrap().clone(),
        };

        let raw = BTreeMap::from([
            ("Citibank".to_string(), vec![record("7213", 0.9)]),
            ("JPMorgan Chase".to_string(), vec![record("628", 1.4)]),
            ("Wells Fargo".to_string(), vec![record("3511", 1.1)]),
        ]);
        derive_metrics(&raw)
    }

    #[test]
    fn test_snapshot_statistics() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let snapshot = MetricSnapshot::new(&rows(), "Return on Assets", date).unwrap();

        assert_eq!(snapshot.bank_count(), 3);
        assert_relative_eq!(snapshot.mean, 1.1333333333333333, max_relative = 1e-12);
        assert_relative_eq!(snapshot.median, 1.1);
        assert_eq!(snapshot.max.bank, "JPMorgan Chase");
        assert_eq!(snapshot.min.bank, "Citibank");
    }

    #[test]
    fn test_snapshot_ranking() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let snapshot = MetricSnapshot::new(&rows(), "Return on Assets", date).unwrap();

        assert_eq!(snapshot.rank_of("JPMorgan Chase"), Some(1));
        assert_eq!(snapshot.rank_of("Wells Fargo"), Some(2));
        assert_eq!(snapshot.rank_of("Citibank"), Some(3));
        assert_eq!(snapshot.rank_of("Ally Bank"), None);
    }

    #[test]
    fn test_snapshot_skips_undefined_metric_values() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        // Growth rate is undefined with a single period of history
        let snapshot =
            MetricSnapshot::new(&rows(), "Non-Owner Occupied CRE 3-Year Growth Rate", date);
        assert!(snapshot.is_none());
    }

    #[test]
    fn test_snapshot_wrong_date_is_none() {
        let date = NaiveDate::from_ymd_opt(2019, 6, 30).unwrap();
        assert!(MetricSnapshot::new(&rows(), "Return on Assets", date).is_none());
    }

    #[test]
    fn test_latest_date() {
        assert_eq!(
            latest_date(&rows()),
            NaiveDate::from_ymd_opt(2024, 6, 30)
        );
        assert_eq!(latest_date(&[]), None);
    }

    #[test]
    fn test_ascii_table_and_display() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let snapshot = MetricSnapshot::new(&rows(), "Return on Assets", date).unwrap();

        let table = snapshot.to_ascii_table();
        assert!(table.contains("Return on Assets"));
        assert!(table.contains("JPMorgan Chase"));
        assert!(table.contains("Mean"));

        let display = format!("{}", snapshot);
        assert!(display.contains("median 1.10"));
    }
}
