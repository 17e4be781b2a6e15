use std::collections::HashSet;

use crate::models::InvoiceRecord;

/// Records whose client name exactly equals `company`.
///
/// An empty `company` means nothing is selected and yields no records.
pub fn filter_by_company(records: &[InvoiceRecord], company: &str) -> Vec<InvoiceRecord> {
    if company.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|r| r.client_name == company)
        .cloned()
        .collect()
}

/// Client names in first-occurrence order, each listed once.
pub fn distinct_companies(records: &[InvoiceRecord]) -> Vec<String> {
    let mut seen = HashSet::new();

    records
        .iter()
        .filter(|r| seen.insert(r.client_name.as_str()))
        .map(|r| r.client_name.clone())
        .collect()
}
