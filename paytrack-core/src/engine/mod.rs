//! Invoice aggregation engine.
//!
//! Stateless functions turning a list of [`InvoiceRecord`]s into the views
//! shown for a selected company. Nothing here performs I/O or fails.

pub mod dates;
pub mod filter;
pub mod stats;


pub use dates::{days_between, days_between_dates, month_key, month_key_of, parse_date};
pub use filter::{distinct_companies, filter_by_company};
pub use stats::{
    annotate_days_to_pay, average_days_to_pay, late_invoices, monthly_average_days,
    monthly_totals,
};

use crate::models::{CompanyReport, InvoiceRecord};

/// Invoices paid after more than this many days are late unless configured otherwise.
pub const DEFAULT_LATE_THRESHOLD_DAYS: i64 = 30;

/// Builds every derived view for one company.
///
/// Filters the records down to `company`, annotates each invoice with its
/// days to pay and computes the average, monthly figures and late list.
///
/// # Arguments
///
/// * `records` - All coerced invoice records, in source order
/// * `company` - Exact client name to report on; empty means no selection
/// * `late_threshold_days` - Invoices paid after more days than this are late
///
/// # Returns
///
/// Returns a `CompanyReport`, empty when `company` is empty or unknown.
pub fn company_report(
    records: &[InvoiceRecord],
    company: &str,
    late_threshold_days: i64,
) -> CompanyReport {
    let invoices = annotate_days_to_pay(&filter_by_company(records, company));

    CompanyReport {
        company: company.to_string(),
        average_days_to_pay: average_days_to_pay(&invoices),
        monthly_totals: monthly_totals(&invoices),
        monthly_average_days: monthly_average_days(&invoices),
        late_invoices: late_invoices(&invoices, late_threshold_days),
        late_threshold_days,
        invoices,
    }
}
