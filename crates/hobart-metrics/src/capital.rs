//! Capital base and loan concentration ratios.
//!
//! Concentration ratios express a loan category as a percentage of an
//! adjusted capital base: Tier 1 (Core) Capital plus the Allowance for
//! Credit Loss. From the 2019 reporting year onward the base is reduced
//! by the CECL transition amount, so that banks electing the phase-in
//! are compared on the same footing as banks that did not.

use chrono::NaiveDate;

/// First reporting date on which the CECL transition adjustment applies.
pub fn cecl_effective_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).expect("valid calendar date")
}

/// The adjusted capital base for one reporting period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapitalBase {
    /// CECL transition amount; `0.0` for reporting dates before 2019.
    pub cecl_transition: f64,
    /// Tier 1 + ACL, net of the CECL transition amount.
    pub base: f64,
}

/// Raw capital inputs for one reporting period, already coerced to `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CapitalInputs {
    /// Common Equity Tier 1 before adjustments (`CT1BADJ`).
    pub ct1badj: f64,
    /// Bank equity capital (`EQ`).
    pub equity: f64,
    /// Perpetual preferred stock (`EQPP`).
    pub preferred: f64,
    /// Tier 1 (Core) Capital (`RBCT1J`).
    pub tier1: f64,
    /// Allowance for credit loss (`LNATRES`).
    pub allowance: f64,
}

/// Compute the adjusted capital base for a reporting period.
///
/// On or after the CECL effective date the transition amount is
/// `CT1BADJ - EQ + EQPP` and is subtracted from Tier 1 + ACL; before it
/// the transition amount is `0.0` and the base is plain Tier 1 + ACL.
pub fn capital_base(report_date: NaiveDate, inputs: CapitalInputs) -> CapitalBase {
    if report_date >= cecl_effective_date() {
        let cecl_transition = inputs.ct1badj - inputs.equity + inputs.preferred;
        CapitalBase {
            cecl_transition,
            base: inputs.tier1 + inputs.allowance - cecl_transition,
        }
    } else {
        CapitalBase {
            cecl_transition: 0.0,
            base: inputs.tier1 + inputs.allowance,
        }
    }
}

/// A loan category as a percentage of the capital base.
///
/// Returns `0.0` whenever the base is zero or negative; a bank with no
/// usable capital base reports zero concentration rather than a
/// division artifact.
pub fn concentration_ratio(loan_amount: f64, capital: &CapitalBase) -> f64 {
    if capital.base > 0.0 {
        (loan_amount / capital.base) * 100.0
    } else {
        0.0
    }
}
