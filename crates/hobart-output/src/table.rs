//! Tidy metric table construction.
//!
//! One row per (bank, reporting date), one column per metric, in a
//! Polars `DataFrame`. Dollar columns lead, derived ratios follow.

use chrono::NaiveDate;
use hobart_metrics::{MetricRow, catalog};
use polars::prelude::*;

/// Build the tidy metric table from derived rows.
///
/// Row order follows the input (the engine emits rows sorted ascending
/// by reporting date). Undefined metric values become nulls.
pub fn metrics_frame(rows: &[MetricRow]) -> PolarsResult<DataFrame> {
    let banks: Vec<&str> = rows.iter().map(|r| r.bank.as_str()).collect();
    let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();

    let mut columns: Vec<Column> = vec![
        Series::new("Bank".into(), banks).into(),
        Series::new("Date".into(), dates).into(),
    ];

    for metric in catalog::column_order() {
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.value(metric)).collect();
        columns.push(Series::new(metric.into(), values).into());
    }

    let df = DataFrame::new(columns)?;
    df.lazy()
        .with_column(col("Date").cast(DataType::Date))
        .collect()
}

/// Restrict a metric table to the named banks.
pub fn filter_banks(df: &DataFrame, banks: &[&str]) -> PolarsResult<DataFrame> {
    let mask: BooleanChunked = df
        .column("Bank")?
        .str()?
        .into_iter()
        .map(|bank| bank.is_some_and(|b| banks.contains(&b)))
        .collect();
    df.filter(&mask)
}

/// Restrict a metric table to a single reporting date.
pub fn filter_date(df: &DataFrame, date: NaiveDate) -> PolarsResult<DataFrame> {
    let mask: BooleanChunked = df
        .column("Date")?
        .date()?
        .as_date_iter()
        .map(|d| d == Some(date))
        .collect();
    df.filter(&mask)
}

/// Restrict a metric table to the named metrics (plus the Bank and Date
/// key columns).
pub fn select_metrics(df: &DataFrame, metrics: &[&str]) -> PolarsResult<DataFrame> {
    let mut selected = vec!["Bank", "Date"];
    selected.extend_from_slice(metrics);
    df.select(selected)
}

/// The values of one metric column, as a float chunked array.
pub fn metric_series<'a>(df: &'a DataFrame, metric: &str) -> PolarsResult<&'a Float64Chunked> {
    df.column(metric)?.f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hobart_data::RawPeriodRecord;
    use hobart_metrics::derive_metrics;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn sample_rows() -> Vec<MetricRow> {
        let record = |cert: &str, date: (i32, u32, u32), asset: i64| RawPeriodRecord {
            cert: cert.to_string(),
            report_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            fields: json!({"ASSET": asset}).as_object().unwrap().clone(),
        };

        let raw = BTreeMap::from([
            (
                "Citibank".to_string(),
                vec![
                    record("7213", (2023, 12, 31), 1_700_000),
                    record("7213", (2024, 3, 31), 1_720_000),
                ],
            ),
            (
                "Wells Fargo".to_string(),
                vec![record("3511", (2023, 12, 31), 1_900_000)],
            ),
        ]);
        derive_metrics(&raw)
    }

    #[test]
    fn test_metrics_frame_shape() {
        let df = metrics_frame(&sample_rows()).unwrap();

        // Bank + Date + every cataloged metric
        assert_eq!(df.width(), 2 + 58);
        assert_eq!(df.height(), 3);
        assert_eq!(df.column("Date").unwrap().dtype(), &DataType::Date);

        let assets = df.column("Total Assets").unwrap().f64().unwrap();
        assert_eq!(assets.get(0), Some(1_700_000.0));
    }

    #[test]
    fn test_growth_column_is_null_without_lookback() {
        let df = metrics_frame(&sample_rows()).unwrap();
        let growth = df
            .column("Non-Owner Occupied CRE 3-Year Growth Rate")
            .unwrap();
        assert_eq!(growth.null_count(), 3);
    }

    #[test]
    fn test_filter_banks() {
        let df = metrics_frame(&sample_rows()).unwrap();
        let filtered = filter_banks(&df, &["Wells Fargo"]).unwrap();

        assert_eq!(filtered.height(), 1);
        let assets = filtered.column("Total Assets").unwrap().f64().unwrap();
        assert_eq!(assets.get(0), Some(1_900_000.0));
    }

    #[test]
    fn test_filter_date() {
        let df = metrics_frame(&sample_rows()).unwrap();

        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let filtered = filter_date(&df, date).unwrap();
        assert_eq!(filtered.height(), 2);

        let absent = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();
        assert_eq!(filter_date(&df, absent).unwrap().height(), 0);
    }

    #[test]
    fn test_metric_series() {
        let df = metrics_frame(&sample_rows()).unwrap();

        let assets = metric_series(&df, "Total Assets").unwrap();
        assert_eq!(assets.len(), 3);
        assert_eq!(assets.get(2), Some(1_720_000.0));

        assert!(metric_series(&df, "Total Liabilities").is_err());
    }

    #[test]
    fn test_select_metrics() {
        let df = metrics_frame(&sample_rows()).unwrap();
        let selected = select_metrics(&df, &["Total Assets", "Return on Assets"]).unwrap();

        assert_eq!(selected.width(), 4);
        assert_eq!(selected.height(), 3);
    }

    #[test]
    fn test_empty_rows_build_empty_frame() {
        let df = metrics_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2 + 58);
    }
}
