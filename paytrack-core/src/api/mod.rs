pub mod handlers;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub use handlers::{health_check, hello, list_companies, list_invoices, report, ReportQuery};

/// Creates the application router.
///
/// Every route is public and read-only. CORS is permissive so a browser
/// dashboard served from another origin can call the API.
///
/// # Arguments
///
/// * `state` - The application state containing the record source and config
///
/// # Returns
///
/// Returns a configured Axum Router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .route("/api/invoices", get(list_invoices))
        .route("/api/companies", get(list_companies))
        .route("/api/report", get(report))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
