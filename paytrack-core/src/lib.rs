//! PayTrack core library.
//!
//! Loads invoice rows from a CSV file, coerces them into typed
//! [`models::InvoiceRecord`]s and derives payment-timing statistics per
//! company through the pure functions in [`engine`].

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod models;
pub mod render;
pub mod telemetry;

use config::AppConfig;
use ingest::RecordSource;

/// Application state shared with every route handler.
///
/// Holds no invoice data: records are reloaded from the source on each
/// request so the server always reflects the current file.
#[derive(Clone)]
pub struct AppState {
    /// Where invoice rows come from
    pub source: Arc<dyn RecordSource>,

    /// Runtime configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(source: Arc<dyn RecordSource>, config: AppConfig) -> Self {
        Self {
            source,
            config: Arc::new(config),
        }
    }
}
