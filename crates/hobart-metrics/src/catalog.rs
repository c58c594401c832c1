//! Catalog of all derived metrics.
//!
//! Central metadata for every metric the engine emits: display name,
//! value format, and a one-line definition. Names are the stable public
//! identifiers of the table schema; downstream consumers key on them.

use serde::{Deserialize, Serialize};

/// How a metric's values should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricFormat {
    /// Dollar amount (reported in thousands of USD).
    Dollar,
    /// Percentage or multiple.
    Ratio,
}

/// Metadata about a derived metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricInfo {
    /// Display name, also the column name in the output table.
    pub name: &'static str,
    /// Value format.
    pub format: MetricFormat,
    /// One-line definition.
    pub definition: &'static str,
}

/// Names of metrics the engine computes itself (as opposed to direct
/// field renames, which live in [`crate::mapping::BASE_FIELDS`]).
pub mod names {
    /// CECL transition amount, zero before 2019.
    pub const CECL_TRANSITION_AMOUNT: &str = "CECL Transition Amount";
    /// Real estate loan concentration.
    pub const RE_LOANS_TO_CAPITAL: &str = "Real Estate Loans to Tier 1 + ACL";
    /// Construction and land development concentration.
    pub const CONSTRUCTION_TO_CAPITAL: &str = "RE Construction and Land Development to Tier 1 + ACL";
    /// Commercial real estate concentration.
    pub const CRE_TO_CAPITAL: &str = "Commercial RE to Tier 1 + ACL";
    /// Non-owner-occupied CRE growth over twelve reporting periods.
    pub const NOO_CRE_GROWTH: &str = "Non-Owner Occupied CRE 3-Year Growth Rate";
    /// Commercial and industrial loan concentration.
    pub const CI_TO_CAPITAL: &str = "C&I Loans to Tier 1 + ACL";
    /// Agriculture loan concentration.
    pub const AG_TO_CAPITAL: &str = "Agriculture Loans to Tier 1 + ACL";
    /// Credit card loan concentration.
    pub const CARDS_TO_CAPITAL: &str = "Credit Cards to Tier 1 + ACL";
    /// Quarterly net charge-offs against the credit loss allowance.
    pub const NCO_TO_ALLOWANCE: &str = "Net Charge-Offs / Allowance for Credit Loss";
}

/// Get metadata for all metrics the engine emits.
///
/// Ordered for display: ratio metrics first (concentration and credit
/// quality ahead of profitability), then the dollar amounts.
pub fn all_metrics() -> Vec<MetricInfo> {
    use MetricFormat::{Dollar, Ratio};

    vec![
        MetricInfo {
            name: names::RE_LOANS_TO_CAPITAL,
            format: Ratio,
            definition: "(Qtly, %) Real Estate Loans as a percentage of Tier 1 (Core) Capital plus Allowance for Credit Loss.",
        },
        MetricInfo {
            name: names::CONSTRUCTION_TO_CAPITAL,
            format: Ratio,
            definition: "(Qtly, %) Real estate construction and land development loans as a percentage of Tier 1 (Core) Capital plus Allowance for Credit Loss.",
        },
        MetricInfo {
            name: names::CRE_TO_CAPITAL,
            format: Ratio,
            definition: "(Qtly, %) Sum of RE Construction and Land Development, Multifamily, Loans to Nonresidential Properties, and Commercial Real Estate Loans not Secured by Real Estate as a percentage of Tier 1 (Core) Capital plus Allowance for Credit Loss.",
        },
        MetricInfo {
            name: names::NOO_CRE_GROWTH,
            format: Ratio,
            definition: "(%) 3-year growth rate of non-owner-occupied commercial real estate loans, measured over twelve reporting periods.",
        },
        MetricInfo {
            name: names::CI_TO_CAPITAL,
            format: Ratio,
            definition: "(Qtly, %) Commercial and Industrial Loans as a percentage of Tier 1 (Core) Capital plus Allowance for Credit Loss.",
        },
        MetricInfo {
            name: names::AG_TO_CAPITAL,
            format: Ratio,
            definition: "(Qtly, %) Agriculture Loans as a percentage of Tier 1 (Core) Capital plus Allowance for Credit Loss.",
        },
        MetricInfo {
            name: names::CARDS_TO_CAPITAL,
            format: Ratio,
            definition: "(Qtly, %) Credit Card loans as a percentage of Tier 1 (Core) Capital plus Allowance for Credit Loss.",
        },
        MetricInfo {
            name: names::NCO_TO_ALLOWANCE,
            format: Ratio,
            definition: "(Qtly, %) Ratio of Quarterly Net Charge-Offs to Allowance for Credit Loss.",
        },
        MetricInfo {
            name: "Net Charge-Offs / Total Loans & Leases",
            format: Ratio,
            definition: "(YTD, %) Ratio of net charge-offs to total loans and leases.",
        },
        MetricInfo {
            name: "Earnings Coverage of Net Loan Charge-Offs",
            format: Ratio,
            definition: "(X) The number of times that earnings can cover net loan charge-offs.",
        },
        MetricInfo {
            name: "Loan and Lease Loss Provision to Net Charge-Offs",
            format: Ratio,
            definition: "(YTD, %) Ratio of loan loss provision to net charge-offs.",
        },
        MetricInfo {
            name: "Loss Allowance / Total Loans & Leases",
            format: Ratio,
            definition: "(YTD, %) Ratio of loss allowance to total loans and leases.",
        },
        MetricInfo {
            name: "Loss Allowance to Noncurrent Loans and Leases",
            format: Ratio,
            definition: "(Qtly, %) Ratio of loss allowance to noncurrent loans and leases.",
        },
        MetricInfo {
            name: "Nonperforming Assets / Total Assets",
            format: Ratio,
            definition: "(Qtly, %) Ratio of nonperforming assets to total assets.",
        },
        MetricInfo {
            name: "Assets Past Due 30-89 Days / Total Assets",
            format: Ratio,
            definition: "(Qtly, %) Ratio of assets past due 30-89 days to total assets.",
        },
        MetricInfo {
            name: "Assets Past Due 90+ Days / Total Assets",
            format: Ratio,
            definition: "(Qtly, %) Ratio of assets past due 90+ days to total assets.",
        },
        MetricInfo {
            name: "Noncurrent Loans / Total Loans",
            format: Ratio,
            definition: "(Qtly, %) Ratio of noncurrent loans to total loans.",
        },
        MetricInfo {
            name: "Net Loans and Leases to Deposits",
            format: Ratio,
            definition: "(YTD, %) Loans and lease financing receivables net of unearned income, allowances and reserves as a percent of total deposits.",
        },
        MetricInfo {
            name: "Net Loans and Leases to Assets",
            format: Ratio,
            definition: "(Qtly, %) Ratio of net loans and leases to assets.",
        },
        MetricInfo {
            name: "Return on Assets",
            format: Ratio,
            definition: "(YTD, %) Return on assets.",
        },
        MetricInfo {
            name: "Return on Equity",
            format: Ratio,
            definition: "(YTD, %) Return on equity.",
        },
        MetricInfo {
            name: "Leverage (Core Capital) Ratio",
            format: Ratio,
            definition: "(Qtly, %) Leverage ratio (core capital ratio).",
        },
        MetricInfo {
            name: "Total Risk-Based Capital Ratio",
            format: Ratio,
            definition: "(Qtly, %) Total risk-based capital ratio.",
        },
        MetricInfo {
            name: "Efficiency Ratio",
            format: Ratio,
            definition: "(YTD, %) The efficiency ratio of the entity.",
        },
        MetricInfo {
            name: "Earning Assets / Total Assets",
            format: Ratio,
            definition: "(Qtly, %) Ratio of earning assets to total assets.",
        },
        MetricInfo {
            name: "Net Interest Margin",
            format: Ratio,
            definition: "(YTD, %) The net interest margin of the entity.",
        },
        MetricInfo {
            name: "Total Assets",
            format: Dollar,
            definition: "(YTD, $) The sum of all assets owned by the entity.",
        },
        MetricInfo {
            name: "Total Deposits",
            format: Dollar,
            definition: "(YTD, $) The sum of all deposits including demand, savings, and time deposits.",
        },
        MetricInfo {
            name: "Total Loans and Leases",
            format: Dollar,
            definition: "(YTD, $) Total loans and lease financing receivables.",
        },
        MetricInfo {
            name: "Net Loans and Leases",
            format: Dollar,
            definition: "(YTD, $) Loans and leases net of unearned income and reserves.",
        },
        MetricInfo {
            name: "Total Securities",
            format: Dollar,
            definition: "(YTD, $) Sum of held-to-maturity, available-for-sale, and equity securities.",
        },
        MetricInfo {
            name: "Real Estate Loans",
            format: Dollar,
            definition: "(YTD, $) Loans primarily secured by real estate.",
        },
        MetricInfo {
            name: "Loans to Residential Properties",
            format: Dollar,
            definition: "(YTD, $) Total loans for residential properties.",
        },
        MetricInfo {
            name: "Multifamily",
            format: Dollar,
            definition: "(YTD, $) Loans for multifamily residential properties.",
        },
        MetricInfo {
            name: "Farmland Real Estate Loans",
            format: Dollar,
            definition: "(YTD, $) Loans secured by farmland.",
        },
        MetricInfo {
            name: "Loans to Nonresidential Properties",
            format: Dollar,
            definition: "(YTD, $) Total loans for nonresidential properties.",
        },
        MetricInfo {
            name: "Owner-Occupied Nonresidential Properties Loans",
            format: Dollar,
            definition: "(YTD, $) Loans for owner-occupied nonresidential properties.",
        },
        MetricInfo {
            name: "Non-OOC Nonresidential Properties Loans",
            format: Dollar,
            definition: "(YTD, $) Loans for non-owner-occupied nonresidential properties.",
        },
        MetricInfo {
            name: "RE Construction and Land Development",
            format: Dollar,
            definition: "(YTD, $) Real estate construction and land development loans.",
        },
        MetricInfo {
            name: "1-4 Family Residential Construction and Land Development Loans",
            format: Dollar,
            definition: "(YTD, $) Construction and land development loans for 1-4 family residential properties.",
        },
        MetricInfo {
            name: "Other Construction, All Land Development and Other Land Loans",
            format: Dollar,
            definition: "(YTD, $) Other construction loans, all land development and other land loans.",
        },
        MetricInfo {
            name: "Commercial Real Estate Loans not Secured by Real Estate",
            format: Dollar,
            definition: "(YTD, $) Commercial real estate loans that are not secured by real estate.",
        },
        MetricInfo {
            name: "Commercial and Industrial Loans",
            format: Dollar,
            definition: "(YTD, $) Loans for commercial and industrial purposes, excluding real estate-secured loans.",
        },
        MetricInfo {
            name: "Agriculture Loans",
            format: Dollar,
            definition: "(YTD, $) Loans to finance agricultural production and other loans to farmers.",
        },
        MetricInfo {
            name: "Credit Cards",
            format: Dollar,
            definition: "(YTD, $) Consumer loans extended through credit card plans.",
        },
        MetricInfo {
            name: "Consumer Loans",
            format: Dollar,
            definition: "(YTD, $) Other loans to individuals for personal expenditures, including student loans.",
        },
        MetricInfo {
            name: "Allowance for Credit Loss",
            format: Dollar,
            definition: "(YTD, $) Reserve for estimated credit losses associated with the loan and lease portfolio.",
        },
        MetricInfo {
            name: "Past Due 30-89 Days",
            format: Dollar,
            definition: "(Qtly, $) Loans and leases past due 30-89 days, in dollars.",
        },
        MetricInfo {
            name: "Past Due 90+ Days",
            format: Dollar,
            definition: "(Qtly, $) Loans and leases past due 90 days or more, in dollars.",
        },
        MetricInfo {
            name: "Tier 1 (Core) Capital",
            format: Dollar,
            definition: "(Qtly, $) Tier 1 core capital, which includes common equity tier 1 capital and additional tier 1 capital.",
        },
        MetricInfo {
            name: "Total Charge-Offs",
            format: Dollar,
            definition: "(YTD, $) Total charge-offs of loans and leases.",
        },
        MetricInfo {
            name: "Total Recoveries",
            format: Dollar,
            definition: "(YTD, $) Total recoveries of loans and leases previously charged off.",
        },
        MetricInfo {
            name: "Net Income",
            format: Dollar,
            definition: "(YTD, $) Net income earned by the entity.",
        },
        MetricInfo {
            name: "Total Loans and Leases Net Charge-Offs Quarterly",
            format: Dollar,
            definition: "(Qtly, $) Total loans and leases net charge-offs for the quarter.",
        },
        MetricInfo {
            name: "Common Equity Tier 1 Before Adjustments",
            format: Dollar,
            definition: "(YTD, $) Common Equity Tier 1 capital before adjustments.",
        },
        MetricInfo {
            name: "Bank Equity Capital",
            format: Dollar,
            definition: "(YTD, $) Total bank equity capital.",
        },
        MetricInfo {
            name: names::CECL_TRANSITION_AMOUNT,
            format: Dollar,
            definition: "(YTD, $) Current Expected Credit Loss (CECL) Transition Amount, not including Deferred Tax Assets, adjusted for Perpetual Preferred Stock.",
        },
        MetricInfo {
            name: "Perpetual Preferred Stock",
            format: Dollar,
            definition: "(YTD, $) The amount of perpetual preferred stock issued by the bank.",
        },
    ]
}

/// Get metadata for a specific metric by name.
pub fn get_metric_info(name: &str) -> Option<MetricInfo> {
    all_metrics().into_iter().find(|m| m.name == name)
}

/// Metric names in display order (ratios first, then dollar amounts).
pub fn display_order() -> Vec<&'static str> {
    all_metrics().into_iter().map(|m| m.name).collect()
}

/// Metric names in table column order (dollar amounts first).
///
/// The output table leads with the balance-sheet dollar figures and
/// appends the derived ratios after them.
pub fn column_order() -> Vec<&'static str> {
    let metrics = all_metrics();
    let dollars = metrics
        .iter()
        .filter(|m| m.format == MetricFormat::Dollar)
        .map(|m| m.name);
    let ratios = metrics
        .iter()
        .filter(|m| m.format == MetricFormat::Ratio)
        .map(|m| m.name);
    dollars.chain(ratios).collect()
}

/// Names of all dollar-formatted metrics.
pub fn dollar_metrics() -> Vec<&'static str> {
    all_metrics()
        .into_iter()
        .filter(|m| m.format == MetricFormat::Dollar)
        .map(|m| m.name)
        .collect()
}
