use std::path::PathBuf;
use std::sync::Arc;

use dotenv::dotenv;
use paytrack_core::config::AppConfig;
use paytrack_core::engine::{company_report, distinct_companies};
use paytrack_core::ingest::{load_records_or_empty, CsvFileSource};
use paytrack_core::render::{render_company_list, render_company_report};
use paytrack_core::telemetry;
use tracing::info;

/// Command-line invoice report.
///
/// Usage: `report [CSV_PATH] [COMPANY]`
///
/// Without a company the distinct client names are listed; with one, the
/// full payment-timing report for that company is printed. The CSV path
/// defaults to `INVOICE_CSV_PATH`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    telemetry::init();

    let config = AppConfig::from_env()?;

    let mut args = std::env::args().skip(1);
    let csv_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.csv_path.clone());
    let company = args.next();

    info!("Reading invoices from {}", csv_path.display());
    let records = load_records_or_empty(Arc::new(CsvFileSource::new(csv_path))).await;

    let output = match company {
        Some(company) => render_company_report(&company_report(
            &records,
            &company,
            config.late_threshold_days,
        )),
        None => render_company_list(&distinct_companies(&records)),
    };
    print!("{}", output);

    Ok(())
}
