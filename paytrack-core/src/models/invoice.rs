use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::engine::dates::parse_date;
use crate::ingest::RawRow;

/// Column names of the invoice source rows.
pub mod fields {
    pub const CLIENT_NAME: &str = "Client Name";
    pub const DATE_INVOICED: &str = "Date Invoiced";
    pub const DATE_PAID: &str = "Date Paid";
    pub const INVOICE_AMOUNT: &str = "Invoice Amount";
    pub const PAID_AMOUNT: &str = "Paid Amount";
    pub const INVOICE_REFERENCE: &str = "Invoice Reference";
}

/// A single invoice after coercion from its raw source row.
///
/// Dates that are missing or unparseable are `None`; amounts that are
/// missing or non-numeric are zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRecord {
    /// Client name, the company selection key
    pub client_name: String,

    /// Date the invoice was issued
    #[serde(serialize_with = "serialize_date")]
    pub invoice_date: Option<NaiveDateTime>,

    /// Date the invoice was paid
    #[serde(serialize_with = "serialize_date")]
    pub paid_date: Option<NaiveDateTime>,

    /// Amount invoiced
    pub invoice_amount: Decimal,

    /// Amount paid
    pub paid_amount: Decimal,

    /// Invoice reference, display only
    pub invoice_reference: String,
}

impl InvoiceRecord {
    /// Coerces a raw source row into a typed record.
    ///
    /// Never fails: every malformed field degrades to its empty value.
    pub fn from_row(row: &RawRow) -> Self {
        Self {
            client_name: text_field(row.get(fields::CLIENT_NAME)),
            invoice_date: date_field(row.get(fields::DATE_INVOICED)),
            paid_date: date_field(row.get(fields::DATE_PAID)),
            invoice_amount: amount_field(row.get(fields::INVOICE_AMOUNT)),
            paid_amount: amount_field(row.get(fields::PAID_AMOUNT)),
            invoice_reference: text_field(row.get(fields::INVOICE_REFERENCE)),
        }
    }
}

/// An invoice together with the figures derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedInvoice {
    #[serde(flatten)]
    pub record: InvoiceRecord,

    /// Whole days between invoicing and payment, if both dates are known
    pub days_to_pay: Option<i64>,

    /// Whether the paid amount equals the invoiced amount
    pub fully_paid: bool,
}

/// Formats a date as `YYYY-MM-DD`, adding the time only when it is not midnight.
pub fn display_date(date: Option<NaiveDateTime>) -> String {
    match date {
        Some(dt) if dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 => {
            dt.format("%Y-%m-%d").to_string()
        }
        Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => String::new(),
    }
}

fn serialize_date<S>(date: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(_) => serializer.serialize_str(&display_date(*date)),
        None => serializer.serialize_none(),
    }
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn date_field(value: Option<&Value>) -> Option<NaiveDateTime> {
    match value {
        Some(Value::String(s)) => parse_date(s),
        Some(Value::Null) | None => None,
        Some(other) => {
            debug!("Ignoring non-text date value: {}", other);
            None
        }
    }
}

fn amount_field(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::String(s)) => parse_amount(s),
        Some(Value::Number(n)) => parse_amount(&n.to_string()),
        _ => Decimal::ZERO,
    }
}

/// Parses a monetary amount, tolerating a leading `$` and thousands separators.
///
/// Blank or non-numeric input is zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or_else(|_| {
            debug!("Treating non-numeric amount {:?} as zero", raw);
            Decimal::ZERO
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> RawRow {
        match value {
            Value::Object(map) => map,
            _ => panic!("test rows must be objects"),
        }
    }

    #[test]
    fn test_from_row_reads_all_fields() {
        let record = InvoiceRecord::from_row(&row(json!({
            "Client Name": "Acme Ltd",
            "Date Invoiced": "2024-01-10",
            "Date Paid": "2024-02-15",
            "Invoice Amount": "1,200.50",
            "Paid Amount": 1200.5,
            "Invoice Reference": "INV-001",
            "Notes": "ignored"
        })));

        assert_eq!(record.client_name, "Acme Ltd");
        assert_eq!(display_date(record.invoice_date), "2024-01-10");
        assert_eq!(display_date(record.paid_date), "2024-02-15");
        assert_eq!(record.invoice_amount, Decimal::new(120050, 2));
        assert_eq!(record.paid_amount, Decimal::new(120050, 2));
        assert_eq!(record.invoice_reference, "INV-001");
    }

    #[test]
    fn test_from_row_degrades_malformed_fields() {
        let record = InvoiceRecord::from_row(&row(json!({
            "Client Name": "Acme Ltd",
            "Date Invoiced": "not a date",
            "Date Paid": "",
            "Invoice Amount": "n/a",
            "Paid Amount": null
        })));

        assert_eq!(record.invoice_date, None);
        assert_eq!(record.paid_date, None);
        assert_eq!(record.invoice_amount, Decimal::ZERO);
        assert_eq!(record.paid_amount, Decimal::ZERO);
        assert_eq!(record.invoice_reference, "");
    }

    #[test]
    fn test_client_name_is_not_trimmed() {
        let record = InvoiceRecord::from_row(&row(json!({ "Client Name": " Acme " })));

        assert_eq!(record.client_name, " Acme ");
    }

    #[test]
    fn test_parse_amount_variants() {
        assert_eq!(parse_amount("100"), Decimal::from(100));
        assert_eq!(parse_amount(" $2,500.25 "), Decimal::new(250025, 2));
        assert_eq!(parse_amount("-40"), Decimal::from(-40));
        assert_eq!(parse_amount("1e3"), Decimal::from(1000));
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("twelve"), Decimal::ZERO);
    }

    #[test]
    fn test_serializes_dates_as_plain_text() {
        let record = InvoiceRecord::from_row(&row(json!({
            "Client Name": "Acme Ltd",
            "Date Invoiced": "2024-03-15",
            "Date Paid": "2024-03-20T14:30:00",
            "Invoice Amount": "10"
        })));

        let value = serde_json::to_value(&record).expect("record serializes");

        assert_eq!(value["invoice_date"], json!("2024-03-15"));
        assert_eq!(value["paid_date"], json!("2024-03-20T14:30:00"));
        assert_eq!(value["invoice_amount"], json!(10.0));
    }

    #[test]
    fn test_missing_dates_serialize_as_null() {
        let record = InvoiceRecord::from_row(&row(json!({ "Client Name": "Acme Ltd" })));

        let value = serde_json::to_value(&record).expect("record serializes");

        assert_eq!(value["invoice_date"], Value::Null);
        assert_eq!(value["paid_date"], Value::Null);
    }
}
