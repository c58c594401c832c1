//! Raw regulatory field codes to metric names, and safe numeric coercion.

use serde_json::Value;

/// Field code to metric name, for metrics that are direct renames of a
/// reported field. Dollar amounts first, then the ratios the regulator
/// publishes precomputed.
pub const BASE_FIELDS: &[(&str, &str)] = &[
    ("ASSET", "Total Assets"),
    ("DEP", "Total Deposits"),
    ("LNLSGR", "Total Loans and Leases"),
    ("LNLSNET", "Net Loans and Leases"),
    ("SC", "Total Securities"),
    ("LNRE", "Real Estate Loans"),
    ("LNRERES", "Loans to Residential Properties"),
    ("LNREMULT", "Multifamily"),
    ("LNREAG", "Farmland Real Estate Loans"),
    ("LNRENRES", "Loans to Nonresidential Properties"),
    ("LNRENROW", "Owner-Occupied Nonresidential Properties Loans"),
    ("LNRENROT", "Non-OOC Nonresidential Properties Loans"),
    ("LNRECONS", "RE Construction and Land Development"),
    (
        "LNRECNFM",
        "1-4 Family Residential Construction and Land Development Loans",
    ),
    (
        "LNRECNOT",
        "Other Construction, All Land Development and Other Land Loans",
    ),
    ("LNCOMRE", "Commercial Real Estate Loans not Secured by Real Estate"),
    ("LNCI", "Commercial and Industrial Loans"),
    ("LNAG", "Agriculture Loans"),
    ("LNCRCD", "Credit Cards"),
    ("LNCONOTH", "Consumer Loans"),
    ("LNATRES", "Allowance for Credit Loss"),
    ("P3ASSET", "Past Due 30-89 Days"),
    ("P9ASSET", "Past Due 90+ Days"),
    ("RBCT1J", "Tier 1 (Core) Capital"),
    ("DRLNLS", "Total Charge-Offs"),
    ("CRLNLS", "Total Recoveries"),
    ("NTLNLSQ", "Total Loans and Leases Net Charge-Offs Quarterly"),
    ("NETINC", "Net Income"),
    ("CT1BADJ", "Common Equity Tier 1 Before Adjustments"),
    ("EQ", "Bank Equity Capital"),
    ("EQPP", "Perpetual Preferred Stock"),
    ("NIMY", "Net Interest Margin"),
    ("ERNASTR", "Earning Assets / Total Assets"),
    ("NPERFV", "Nonperforming Assets / Total Assets"),
    ("P3ASSETR", "Assets Past Due 30-89 Days / Total Assets"),
    ("P9ASSETR", "Assets Past Due 90+ Days / Total Assets"),
    ("NTLNLSR", "Net Charge-Offs / Total Loans & Leases"),
    ("IDERNCVR", "Earnings Coverage of Net Loan Charge-Offs"),
    ("ELNANTR", "Loan and Lease Loss Provision to Net Charge-Offs"),
    ("LNATRESR", "Loss Allowance / Total Loans & Leases"),
    ("LNRESNCR", "Loss Allowance to Noncurrent Loans and Leases"),
    ("NCLNLSR", "Noncurrent Loans / Total Loans"),
    ("LNLSDEPR", "Net Loans and Leases to Deposits"),
    ("LNLSNTV", "Net Loans and Leases to Assets"),
    ("ROA", "Return on Assets"),
    ("ROE", "Return on Equity"),
    ("RBC1AAJ", "Leverage (Core Capital) Ratio"),
    ("RBCRWAJ", "Total Risk-Based Capital Ratio"),
    ("EEFFR", "Efficiency Ratio"),
];

/// Coerce a raw field value to `f64`.
///
/// Banks report sparsely: absent, null, and unparseable values all
/// coerce to `0.0` so that a single bad field never poisons a row.
/// Numeric strings (the API emits both forms) parse normally, but
/// non-finite parses (`"NaN"`, `"inf"`) coerce to `0.0` as well: the
/// result is always a finite number.
pub fn safe_float(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}
