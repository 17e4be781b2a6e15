//! Plain-text rendering of company reports for the terminal.

use std::fmt;

use crate::models::invoice::display_date;
use crate::models::CompanyReport;

/// One company per line, in the given order.
pub fn render_company_list(companies: &[String]) -> String {
    CompanyList(companies).to_string()
}

/// Renders every section of a company report.
///
/// Missing day counts print as `N/A` and amounts use two decimals.
pub fn render_company_report(report: &CompanyReport) -> String {
    ReportText(report).to_string()
}

struct CompanyList<'a>(&'a [String]);

impl fmt::Display for CompanyList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No companies found");
        }

        writeln!(f, "Companies")?;
        for company in self.0 {
            writeln!(f, "  {}", company)?;
        }
        Ok(())
    }
}

struct ReportText<'a>(&'a CompanyReport);

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "Invoices for Company: {}", report.company)?;
        writeln!(
            f,
            "{:<16} {:<12} {:>14} {:>14} {:>11}  Fully Paid?",
            "Invoice Number", "Invoice Date", "Invoice Amount", "Paid Amount", "Days to Pay"
        )?;
        for invoice in &report.invoices {
            let days = invoice
                .days_to_pay
                .map(|d| d.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            writeln!(
                f,
                "{:<16} {:<12} {:>14.2} {:>14.2} {:>11}  {}",
                invoice.record.invoice_reference,
                display_date(invoice.record.invoice_date),
                invoice.record.invoice_amount,
                invoice.record.paid_amount,
                days,
                if invoice.fully_paid { "Yes" } else { "No" }
            )?;
        }

        let average = report
            .average_days_to_pay
            .map(|avg| format!("{:.1}", avg))
            .unwrap_or_else(|| "N/A".to_string());
        writeln!(f, "\nAverage Days to Pay: {}", average)?;

        writeln!(f, "\nAverage Days to Pay Per Month")?;
        for month in &report.monthly_average_days {
            writeln!(f, "  {}: {:.1}", month.month, month.avg_days)?;
        }

        writeln!(f, "\nMonthly Totals")?;
        writeln!(
            f,
            "  {:<8} {:>20} {:>18}",
            "Month", "Invoice Amount Total", "Paid Amount Total"
        )?;
        for (month, totals) in &report.monthly_totals {
            writeln!(
                f,
                "  {:<8} {:>20.2} {:>18.2}",
                month, totals.invoice_amount_sum, totals.paid_amount_sum
            )?;
        }

        writeln!(
            f,
            "\nLate Invoices (Paid after {} days)",
            report.late_threshold_days
        )?;
        if report.late_invoices.is_empty() {
            writeln!(f, "  None")?;
        }
        for invoice in &report.late_invoices {
            writeln!(
                f,
                "  Ref: {} | Days to Pay: {}",
                invoice.record.invoice_reference,
                invoice.days_to_pay.unwrap_or_default()
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{company_report, parse_date};
    use crate::models::InvoiceRecord;
    use rust_decimal::Decimal;

    fn record(
        reference: &str,
        invoiced: &str,
        paid: &str,
        amount: i64,
        paid_amount: i64,
    ) -> InvoiceRecord {
        InvoiceRecord {
            client_name: "A".to_string(),
            invoice_date: parse_date(invoiced),
            paid_date: parse_date(paid),
            invoice_amount: Decimal::from(amount),
            paid_amount: Decimal::from(paid_amount),
            invoice_reference: reference.to_string(),
        }
    }

    #[test]
    fn test_render_company_list() {
        let list = render_company_list(&["A".to_string(), "B".to_string()]);

        assert_eq!(list, "Companies\n  A\n  B\n");
        assert_eq!(render_company_list(&[]), "No companies found\n");
    }

    #[test]
    fn test_render_full_report() {
        let records = vec![
            record("INV-1", "2024-01-01", "2024-01-20", 100, 100),
            record("INV-2", "2024-01-10", "2024-02-15", 200, 150),
            record("INV-3", "", "", 5, 0),
        ];

        let text = render_company_report(&company_report(&records, "A", 30));

        assert!(text.starts_with("Invoices for Company: A\n"));
        assert!(text.contains("INV-2"));
        assert!(text.contains("2024-01-10"));
        assert!(text.contains("200.00"));
        assert!(text.contains("N/A"));
        assert!(text.contains("Average Days to Pay: 27.5"));
        assert!(text.contains("  2024-01: 27.5"));
        assert!(text.contains("300.00"));
        assert!(text.contains("250.00"));
        assert!(text.contains("Ref: INV-2 | Days to Pay: 36"));
        assert!(!text.contains("Ref: INV-1"));
    }

    #[test]
    fn test_render_empty_report() {
        let text = render_company_report(&company_report(&[], "Nobody", 30));

        assert!(text.contains("Average Days to Pay: N/A"));
        assert!(text.contains("Late Invoices (Paid after 30 days)\n  None\n"));
    }
}
