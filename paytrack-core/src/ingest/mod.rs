//! Retrieval of raw invoice rows and their coercion into typed records.

pub mod csv_file;

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::IngestError;
use crate::models::InvoiceRecord;

pub use csv_file::CsvFileSource;

/// One source row: column name to untyped value.
pub type RawRow = Map<String, Value>;

/// Anything that can hand over the full list of invoice rows.
///
/// Loading is blocking; async callers go through [`load_rows`].
pub trait RecordSource: Send + Sync {
    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;

    /// Reads every row, in source order.
    fn load(&self) -> Result<Vec<RawRow>, IngestError>;
}

/// Loads raw rows on the blocking thread pool.
pub async fn load_rows(source: Arc<dyn RecordSource>) -> Result<Vec<RawRow>, IngestError> {
    tokio::task::spawn_blocking(move || source.load()).await?
}

/// Coerces raw rows into typed records, keeping their order.
pub fn to_records(rows: &[RawRow]) -> Vec<InvoiceRecord> {
    rows.iter().map(InvoiceRecord::from_row).collect()
}

/// Loads and coerces every record, substituting an empty list on failure.
///
/// The aggregation engine never sees a retrieval error: a broken source
/// simply looks like a source without invoices.
///
/// # Arguments
///
/// * `source` - Where to read raw invoice rows from
///
/// # Returns
///
/// Returns the typed records in source order, or an empty `Vec` if the
/// source could not be read (logged at `warn`).
pub async fn load_records_or_empty(source: Arc<dyn RecordSource>) -> Vec<InvoiceRecord> {
    let origin = source.describe();

    match load_rows(source).await {
        Ok(rows) => {
            info!("Loaded {} invoice rows from {}", rows.len(), origin);
            to_records(&rows)
        }
        Err(e) => {
            warn!("Could not load invoices from {}, using an empty list: {}", origin, e);
            Vec::new()
        }
    }
}
