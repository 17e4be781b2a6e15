use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tracing::warn;

use crate::engine::dates::{days_between_dates, month_key_of};
use crate::models::{DerivedInvoice, InvoiceRecord, MonthlyAverageDays, MonthlyTotal};

/// Attaches days-to-pay and the fully-paid flag to every record.
///
/// Output has the same length and order as the input.
pub fn annotate_days_to_pay(records: &[InvoiceRecord]) -> Vec<DerivedInvoice> {
    records
        .iter()
        .map(|record| DerivedInvoice {
            days_to_pay: days_between_dates(record.invoice_date, record.paid_date),
            fully_paid: record.invoice_amount == record.paid_amount,
            record: record.clone(),
        })
        .collect()
}

/// Mean days to pay over invoices that have a day count, to one decimal.
///
/// `None` when no invoice has a day count, including the empty input.
pub fn average_days_to_pay(derived: &[DerivedInvoice]) -> Option<f64> {
    let days: Vec<i64> = derived.iter().filter_map(|i| i.days_to_pay).collect();
    if days.is_empty() {
        return None;
    }

    let total: i64 = days.iter().sum();
    Some(round_one_decimal(total as f64 / days.len() as f64))
}

/// Invoiced and paid sums per month of issue.
///
/// Undated invoices are collected under the `""` key. A sum that would leave
/// the `Decimal` range is clamped to `Decimal::MAX` / `Decimal::MIN`.
pub fn monthly_totals(derived: &[DerivedInvoice]) -> BTreeMap<String, MonthlyTotal> {
    let mut totals: BTreeMap<String, MonthlyTotal> = BTreeMap::new();

    for invoice in derived {
        let month = month_key_of(invoice.record.invoice_date);
        let entry = totals.entry(month.clone()).or_default();
        entry.invoice_amount_sum =
            accumulate(entry.invoice_amount_sum, invoice.record.invoice_amount, &month);
        entry.paid_amount_sum =
            accumulate(entry.paid_amount_sum, invoice.record.paid_amount, &month);
    }

    totals
}

fn accumulate(sum: Decimal, amount: Decimal, month: &str) -> Decimal {
    sum.checked_add(amount).unwrap_or_else(|| {
        warn!("Amount total for month {:?} overflowed, clamping", month);
        sum.saturating_add(amount)
    })
}

/// Mean days to pay per month of issue, in first-seen month order.
///
/// Invoices without an issue month or without a day count are skipped, so
/// unlike [`monthly_totals`] there is never a `""` entry.
pub fn monthly_average_days(derived: &[DerivedInvoice]) -> Vec<MonthlyAverageDays> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, i64, u32)> = Vec::new();

    for invoice in derived {
        let month = month_key_of(invoice.record.invoice_date);
        let Some(days) = invoice.days_to_pay else {
            continue;
        };
        if month.is_empty() {
            continue;
        }

        let index = *positions.entry(month.clone()).or_insert_with(|| {
            buckets.push((month, 0, 0));
            buckets.len() - 1
        });
        buckets[index].1 += days;
        buckets[index].2 += 1;
    }

    buckets
        .into_iter()
        .map(|(month, total, count)| MonthlyAverageDays {
            month,
            avg_days: if count > 0 {
                round_one_decimal(total as f64 / f64::from(count))
            } else {
                0.0
            },
        })
        .collect()
}

/// Invoices that took strictly more than `threshold_days` days to pay.
///
/// Invoices without a day count are never late.
pub fn late_invoices(derived: &[DerivedInvoice], threshold_days: i64) -> Vec<DerivedInvoice> {
    derived
        .iter()
        .filter(|i| i.days_to_pay.is_some_and(|days| days > threshold_days))
        .cloned()
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
