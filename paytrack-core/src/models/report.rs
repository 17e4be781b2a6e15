use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::invoice::DerivedInvoice;

/// Invoiced and paid sums for one month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub invoice_amount_sum: Decimal,
    pub paid_amount_sum: Decimal,
}

/// Mean days to pay for invoices issued in one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverageDays {
    /// Month key in `YYYY-MM` form
    pub month: String,

    /// Mean days to pay, rounded to one decimal
    pub avg_days: f64,
}

/// Every view of a single company's invoices, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyReport {
    /// Selected company; empty when nothing is selected
    pub company: String,

    /// The company's invoices in source order, with derived figures
    pub invoices: Vec<DerivedInvoice>,

    /// Mean days to pay over invoices with both dates, if any
    pub average_days_to_pay: Option<f64>,

    /// Sums keyed by `YYYY-MM`; the `""` key holds undated invoices
    pub monthly_totals: BTreeMap<String, MonthlyTotal>,

    /// Per-month mean days to pay, in first-seen month order
    pub monthly_average_days: Vec<MonthlyAverageDays>,

    /// Invoices paid after more than `late_threshold_days` days
    pub late_invoices: Vec<DerivedInvoice>,

    pub late_threshold_days: i64,
}
