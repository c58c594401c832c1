//! The metric derivation engine.
//!
//! Pure transformation from raw reporting periods to named metric rows.
//! The engine performs no I/O and cannot fail: sparse or malformed
//! fields degrade to `0.0` (or `null` for the growth rate) per metric,
//! never to a dropped row.

use crate::capital::{CapitalInputs, capital_base, concentration_ratio};
use crate::catalog::names;
use crate::growth::{non_owner_occupied_cre, three_year_growth};
use crate::mapping::{BASE_FIELDS, safe_float};
use chrono::NaiveDate;
use hobart_data::RawPeriodRecord;
use std::collections::BTreeMap;

/// One row of derived metrics for one bank at one reporting date.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    /// Display name of the bank.
    pub bank: String,
    /// Reporting date.
    pub date: NaiveDate,
    values: BTreeMap<&'static str, Option<f64>>,
}

impl MetricRow {
    /// Value of a metric; `None` when the metric is undefined for this
    /// row (growth rate without a full lookback) or unknown.
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.values.get(metric).copied().flatten()
    }

    /// Whether the row carries the named metric, defined or not.
    pub fn contains(&self, metric: &str) -> bool {
        self.values.contains_key(metric)
    }

    /// Iterate over all (metric, value) pairs in the row.
    pub fn metrics(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> + '_ {
        self.values.iter().map(|(name, value)| (*name, *value))
    }
}

/// Derive all metrics for a set of banks.
///
/// Input maps a bank's display name to its reporting periods, in any
/// order; each bank's history is sorted by reporting date before
/// position-sensitive metrics are computed. The output holds one row
/// per (bank, reporting date), sorted ascending by date; rows sharing a
/// date keep the banks in input order.
pub fn derive_metrics(raw: &BTreeMap<String, Vec<RawPeriodRecord>>) -> Vec<MetricRow> {
    let mut rows = Vec::new();

    for (bank, records) in raw {
        let mut history = records.clone();
        history.sort_by_key(|r| r.report_date);

        for (i, record) in history.iter().enumerate() {
            rows.push(derive_row(bank, &history, i, record));
        }
    }

    rows.sort_by_key(|row| row.date);
    rows
}

/// Derive the metric row at position `i` of one bank's sorted history.
fn derive_row(
    bank: &str,
    history: &[RawPeriodRecord],
    i: usize,
    record: &RawPeriodRecord,
) -> MetricRow {
    let mut values: BTreeMap<&'static str, Option<f64>> = BTreeMap::new();

    for &(code, name) in BASE_FIELDS {
        values.insert(name, Some(safe_float(record.raw(code))));
    }

    let capital = capital_base(
        record.report_date,
        CapitalInputs {
            ct1badj: safe_float(record.raw("CT1BADJ")),
            equity: safe_float(record.raw("EQ")),
            preferred: safe_float(record.raw("EQPP")),
            tier1: safe_float(record.raw("RBCT1J")),
            allowance: safe_float(record.raw("LNATRES")),
        },
    );
    values.insert(names::CECL_TRANSITION_AMOUNT, Some(capital.cecl_transition));

    values.insert(
        names::RE_LOANS_TO_CAPITAL,
        Some(concentration_ratio(safe_float(record.raw("LNRE")), &capital)),
    );
    values.insert(
        names::CONSTRUCTION_TO_CAPITAL,
        Some(concentration_ratio(
            safe_float(record.raw("LNRECONS")),
            &capital,
        )),
    );
    values.insert(
        names::CI_TO_CAPITAL,
        Some(concentration_ratio(safe_float(record.raw("LNCI")), &capital)),
    );
    values.insert(
        names::AG_TO_CAPITAL,
        Some(concentration_ratio(safe_float(record.raw("LNAG")), &capital)),
    );
    values.insert(
        names::CARDS_TO_CAPITAL,
        Some(concentration_ratio(
            safe_float(record.raw("LNCRCD")),
            &capital,
        )),
    );

    let commercial_re = safe_float(record.raw("LNRECONS"))
        + safe_float(record.raw("LNREMULT"))
        + safe_float(record.raw("LNRENRES"))
        + safe_float(record.raw("LNCOMRE"));
    values.insert(
        names::CRE_TO_CAPITAL,
        Some(concentration_ratio(commercial_re, &capital)),
    );

    values.insert(names::NOO_CRE_GROWTH, three_year_growth(history, i));

    let allowance = safe_float(record.raw("LNATRES"));
    let quarterly_nco = safe_float(record.raw("NTLNLSQ"));
    let nco_ratio = if allowance > 0.0 {
        (quarterly_nco / allowance) * 100.0
    } else {
        0.0
    };
    values.insert(names::NCO_TO_ALLOWANCE, Some(nco_ratio));

    MetricRow {
        bank: bank.to_string(),
        date: record.report_date,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use approx::assert_relative_eq;
    use serde_json::{Value, json};

    fn record(cert: &str, date: NaiveDate, fields: Value) -> RawPeriodRecord {
        RawPeriodRecord {
            cert: cert.to_string(),
            report_date: date,
            fields: fields.as_object().unwrap().clone(),
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn one_bank(records: Vec<RawPeriodRecord>) -> BTreeMap<String, Vec<RawPeriodRecord>> {
        BTreeMap::from([("JPMorgan Chase".to_string(), records)])
    }

    #[test]
    fn test_sparse_record_yields_complete_row() {
        let rows = derive_metrics(&one_bank(vec![record(
            "628",
            date(2023, 12, 31),
            json!({"ASSET": "not-a-number", "DEP": null}),
        )]));

        assert_eq!(rows.len(), 1);
        let row = &rows[0];

        // Every cataloged metric is present; the growth rate is the
        // only one allowed to be undefined.
        for metric in catalog::display_order() {
            assert!(row.contains(metric), "missing {}", metric);
            if metric != names::NOO_CRE_GROWTH {
                assert!(row.value(metric).is_some(), "{} undefined", metric);
            }
        }

        assert_relative_eq!(row.value("Total Assets").unwrap(), 0.0);
        assert_relative_eq!(row.value(names::RE_LOANS_TO_CAPITAL).unwrap(), 0.0);
        assert_eq!(row.value(names::NOO_CRE_GROWTH), None);
    }

    #[test]
    fn test_base_fields_and_concentrations() {
        let rows = derive_metrics(&one_bank(vec![record(
            "628",
            date(2018, 12, 31),
            json!({
                "ASSET": 10_000,
                "LNRE": 300,
                "LNRECONS": 80,
                "LNREMULT": 20,
                "LNRENRES": 50,
                "LNCOMRE": 10,
                "LNCI": 120,
                "LNAG": 40,
                "LNCRCD": 60,
                "RBCT1J": 700,
                "LNATRES": 100,
                "ROA": 1.15
            }),
        )]));

        let row = &rows[0];
        assert_relative_eq!(row.value("Total Assets").unwrap(), 10_000.0);
        assert_relative_eq!(row.value("Return on Assets").unwrap(), 1.15);

        // Pre-2019: base is Tier 1 + ACL = 800, no transition amount
        assert_relative_eq!(row.value(names::CECL_TRANSITION_AMOUNT).unwrap(), 0.0);
        assert_relative_eq!(row.value(names::RE_LOANS_TO_CAPITAL).unwrap(), 37.5);
        assert_relative_eq!(row.value(names::CONSTRUCTION_TO_CAPITAL).unwrap(), 10.0);
        assert_relative_eq!(row.value(names::CI_TO_CAPITAL).unwrap(), 15.0);
        assert_relative_eq!(row.value(names::AG_TO_CAPITAL).unwrap(), 5.0);
        assert_relative_eq!(row.value(names::CARDS_TO_CAPITAL).unwrap(), 7.5);
        // CRE = 80 + 20 + 50 + 10 = 160
        assert_relative_eq!(row.value(names::CRE_TO_CAPITAL).unwrap(), 20.0);
    }

    #[test]
    fn test_cecl_adjustment_applies_from_2019() {
        let fields = json!({
            "LNRE": 300,
            "RBCT1J": 700,
            "LNATRES": 100,
            "CT1BADJ": 760,
            "EQ": 720,
            "EQPP": 10
        });
        let rows = derive_metrics(&one_bank(vec![
            record("628", date(2018, 12, 31), fields.clone()),
            record("628", date(2019, 3, 31), fields),
        ]));

        // 2018: base 800
        assert_relative_eq!(rows[0].value(names::RE_LOANS_TO_CAPITAL).unwrap(), 37.5);
        // 2019: transition = 760 - 720 + 10 = 50, base 750
        assert_relative_eq!(rows[1].value(names::CECL_TRANSITION_AMOUNT).unwrap(), 50.0);
        assert_relative_eq!(rows[1].value(names::RE_LOANS_TO_CAPITAL).unwrap(), 40.0);
    }

    #[test]
    fn test_growth_rate_needs_thirteen_periods() {
        let records: Vec<_> = (0..13)
            .map(|q| {
                let year = 2020 + (q / 4) as i32;
                let month = (q % 4) as u32 * 3 + 3;
                let cons = 100.0 + q as f64 * 10.0;
                record(
                    "628",
                    date(year, month, 28),
                    json!({"LNRECONS": cons}),
                )
            })
            .collect();

        let rows = derive_metrics(&one_bank(records));
        assert_eq!(rows.len(), 13);
        for row in &rows[..12] {
            assert_eq!(row.value(names::NOO_CRE_GROWTH), None);
        }
        // 220 / 100 - 1
        assert_relative_eq!(rows[12].value(names::NOO_CRE_GROWTH).unwrap(), 120.0);
    }

    #[test]
    fn test_unsorted_input_is_sorted_per_bank() {
        let rows = derive_metrics(&one_bank(vec![
            record("628", date(2024, 3, 31), json!({"ASSET": 2})),
            record("628", date(2023, 12, 31), json!({"ASSET": 1})),
        ]));

        assert_eq!(rows[0].date, date(2023, 12, 31));
        assert_relative_eq!(rows[0].value("Total Assets").unwrap(), 1.0);
        assert_eq!(rows[1].date, date(2024, 3, 31));
    }

    #[test]
    fn test_rows_sorted_by_date_across_banks() {
        let raw = BTreeMap::from([
            (
                "Citibank".to_string(),
                vec![
                    record("7213", date(2023, 12, 31), json!({"ASSET": 1})),
                    record("7213", date(2024, 3, 31), json!({"ASSET": 2})),
                ],
            ),
            (
                "Wells Fargo".to_string(),
                vec![record("3511", date(2023, 12, 31), json!({"ASSET": 3}))],
            ),
        ]);

        let rows = derive_metrics(&raw);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, date(2023, 12, 31));
        assert_eq!(rows[0].bank, "Citibank");
        assert_eq!(rows[1].bank, "Wells Fargo");
        assert_eq!(rows[2].date, date(2024, 3, 31));
    }

    #[test]
    fn test_charge_off_ratio_guards_zero_allowance() {
        let rows = derive_metrics(&one_bank(vec![
            record(
                "628",
                date(2023, 9, 30),
                json!({"NTLNLSQ": 25, "LNATRES": 500}),
            ),
            record(
                "628",
                date(2023, 12, 31),
                json!({"NTLNLSQ": 25, "LNATRES": 0}),
            ),
        ]));

        assert_relative_eq!(rows[0].value(names::NCO_TO_ALLOWANCE).unwrap(), 5.0);
        assert_relative_eq!(rows[1].value(names::NCO_TO_ALLOWANCE).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(derive_metrics(&BTreeMap::new()).is_empty());
        assert!(derive_metrics(&one_bank(vec![])).is_empty());
    }
}
