//! Integration tests for the full derivation-to-output pipeline.

use chrono::NaiveDate;
use hobart_data::RawPeriodRecord;
use hobart_metrics::{catalog, derive_metrics};
use hobart_output::{
    ExportFormat, Exporter, MetricSnapshot, filter_banks, latest_date, metrics_frame,
    to_observations,
};
use serde_json::json;
use std::collections::BTreeMap;

fn record(cert: &str, year: i32, month: u32, fields: serde_json::Value) -> RawPeriodRecord {
    let day = match month {
        3 | 12 => 31,
        _ => 30,
    };
    RawPeriodRecord {
        cert: cert.to_string(),
        report_date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        fields: fields.as_object().unwrap().clone(),
    }
}

fn sample_universe() -> BTreeMap<String, Vec<RawPeriodRecord>> {
    BTreeMap::from([
        (
            "JPMorgan Chase".to_string(),
            vec![
                record(
                    "628",
                    2023,
                    12,
                    json!({
                        "ASSET": 3_400_000, "LNRE": 500_000, "RBCT1J": 270_000,
                        "LNATRES": 22_000, "CT1BADJ": 260_000, "EQ": 255_000,
                        "EQPP": 0, "ROA": 1.3, "NTLNLSQ": 1_100
                    }),
                ),
                record(
                    "628",
                    2024,
                    3,
                    json!({
                        "ASSET": 3_500_000, "LNRE": 510_000, "RBCT1J": 275_000,
                        "LNATRES": 23_000, "CT1BADJ": 266_000, "EQ": 260_000,
                        "EQPP": 0, "ROA": 1.4, "NTLNLSQ": 1_200
                    }),
                ),
            ],
        ),
        (
            "Citizens Bank".to_string(),
            vec![record(
                "57957",
                2024,
                3,
                json!({"ASSET": 220_000, "LNRE": 60_000, "RBCT1J": 20_000, "LNATRES": 2_000, "ROA": 0.8}),
            )],
        ),
    ])
}

#[test]
fn test_derive_to_frame_workflow() {
    let rows = derive_metrics(&sample_universe());
    assert_eq!(rows.len(), 3);

    let df = metrics_frame(&rows).unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(df.width(), 2 + catalog::all_metrics().len());

    // Rows are date-sorted: the 2023 period comes first
    let banks = df.column("Bank").unwrap().str().unwrap();
    assert_eq!(banks.get(0), Some("JPMorgan Chase"));

    let filtered = filter_banks(&df, &["Citizens Bank"]).unwrap();
    assert_eq!(filtered.height(), 1);
}

#[test]
fn test_derive_to_export_workflow() {
    let rows = derive_metrics(&sample_universe());
    let observations = to_observations(&rows);
    assert_eq!(observations.len(), 3 * catalog::all_metrics().len());

    let csv = observations.export_to_string(ExportFormat::Csv).unwrap();
    assert!(csv.starts_with("bank,date,metric,value"));
    assert!(csv.contains("JPMorgan Chase,2024-03-31,Return on Assets,1.4"));

    let json = observations.export_to_string(ExportFormat::Json).unwrap();
    assert!(json.contains("\"Citizens Bank\""));
}

#[test]
fn test_snapshot_at_latest_date() {
    let rows = derive_metrics(&sample_universe());
    let date = latest_date(&rows).unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());

    let snapshot = MetricSnapshot::new(&rows, "Return on Assets", date).unwrap();
    assert_eq!(snapshot.bank_count(), 2);
    assert_eq!(snapshot.max.bank, "JPMorgan Chase");
    assert_eq!(snapshot.rank_of("Citizens Bank"), Some(2));
}

#[test]
fn test_cecl_adjusted_concentration_flows_to_frame() {
    let rows = derive_metrics(&sample_universe());
    let df = metrics_frame(&rows).unwrap();

    let concentration = df
        .column("Real Estate Loans to Tier 1 + ACL")
        .unwrap()
        .f64()
        .unwrap();

    // 2023 JPM row: transition = 260000 - 255000 = 5000,
    // base = 270000 + 22000 - 5000 = 287000
    let expected = 500_000.0 / 287_000.0 * 100.0;
    assert!((concentration.get(0).unwrap() - expected).abs() < 1e-9);
}
