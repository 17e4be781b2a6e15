use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use serde::Deserialize;
use tracing::info;

use crate::engine::{company_report, distinct_companies};
use crate::error::ApiError;
use crate::ingest::{load_records_or_empty, load_rows, RawRow};
use crate::models::CompanyReport;
use crate::AppState;

/// Query string of the report endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    /// Selected company; missing or empty means no selection
    #[serde(default)]
    pub company: String,

    /// Overrides the configured late threshold
    pub late_after_days: Option<i64>,
}

/// Plain-text greeting at `/`.
pub async fn hello() -> &'static str {
    "Hello World"
}

/// Health check endpoint.
///
/// Returns a simple JSON response indicating the server is running.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "paytrack-core",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Raw invoice rows endpoint.
///
/// Handles GET requests to `/api/invoices`, returning every CSV row as a
/// JSON object keyed by the column headers. A load failure is a 500.
pub async fn list_invoices(State(state): State<AppState>) -> Result<Json<Vec<RawRow>>, ApiError> {
    let rows = load_rows(state.source.clone()).await?;

    info!("Serving {} raw invoice rows", rows.len());
    Ok(Json(rows))
}

/// Company list endpoint.
///
/// Handles GET requests to `/api/companies` with the distinct client names
/// in first-seen order.
pub async fn list_companies(State(state): State<AppState>) -> Json<Vec<String>> {
    let records = load_records_or_empty(state.source.clone()).await;

    Json(distinct_companies(&records))
}

/// Company report endpoint.
///
/// Handles GET requests to `/api/report?company=...&late_after_days=...`
/// and returns every derived view for the selected company. A malformed
/// query string is a 400 with the same JSON error body as other failures.
pub async fn report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<CompanyReport>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let threshold = query
        .late_after_days
        .unwrap_or(state.config.late_threshold_days);
    if threshold < 0 {
        return Err(ApiError::Validation(format!(
            "late_after_days must not be negative, got {}",
            threshold
        )));
    }

    let records = load_records_or_empty(state.source.clone()).await;
    let report = company_report(&records, &query.company, threshold);

    info!(
        "Report for {:?}: {} invoices, {} late",
        query.company,
        report.invoices.len(),
        report.late_invoices.len()
    );
    Ok(Json(report))
}
