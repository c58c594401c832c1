//! Non-owner-occupied CRE aggregation and the 3-year growth rate.

use crate::mapping::safe_float;
use hobart_data::RawPeriodRecord;

/// Number of reporting periods in the growth lookback window.
///
/// Twelve quarterly periods approximate three years. The lookback is
/// positional, not calendar-based: a bank with gaps in its filing
/// history spans more than three calendar years across twelve records,
/// and the rate is still computed against the twelfth-prior record.
pub const LOOKBACK_PERIODS: usize = 12;

/// Sum the non-owner-occupied commercial real estate loan categories
/// for one reporting period.
///
/// Construction and land development, multifamily, non-owner-occupied
/// nonresidential, and CRE loans not secured by real estate.
pub fn non_owner_occupied_cre(record: &RawPeriodRecord) -> f64 {
    ["LNRECONS", "LNREMULT", "LNRENROT", "LNCOMRE"]
        .iter()
        .map(|code| safe_float(record.raw(code)))
        .sum()
}

/// 3-year growth rate of non-owner-occupied CRE at position `index` of
/// a date-sorted filing history, as a percentage.
///
/// `None` when fewer than [`LOOKBACK_PERIODS`] prior records exist, or
/// when the base-period balance is zero or negative (a growth rate off
/// a nonpositive base is meaningless, not infinite).
pub fn three_year_growth(history: &[RawPeriodRecord], index: usize) -> Option<f64> {
    if index < LOOKBACK_PERIODS {
        return None;
    }

    let current = non_owner_occupied_cre(&history[index]);
    let base = non_owner_occupied_cre(&history[index - LOOKBACK_PERIODS]);

    if base > 0.0 {
        Some(((current / base) - 1.0) * 100.0)
    } else {
        None
    }
}
