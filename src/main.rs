//! QuoteSync daemon
//!
//! Loads the persisted quote collection, prints a random quote, then keeps
//! the collection reconciled with the remote feed until interrupted.

use quotesync::storage::quotes::load_quotes;
use quotesync::storage::settings::load_settings;
use quotesync::storage;
use quotesync::sync::remote::HttpQuoteSource;
use quotesync::sync::service::SyncService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = storage::get_data_dir()?;
    let settings = load_settings(&data_dir);
    let book = load_quotes(&data_dir)?;
    tracing::info!("Loaded {} quotes", book.len());

    if let Some(quote) = book.random() {
        tracing::info!("[{}] {}", quote.category, quote.text);
    }

    let source = HttpQuoteSource::new(
        settings.endpoint.as_str(),
        Duration::from_secs(settings.timeout_secs),
    )?;
    let service = SyncService::new(Arc::new(source), data_dir);
    let book = Mutex::new(book);
    let interval = Duration::from_secs(settings.interval_secs);

    tokio::select! {
        _ = service.run_periodic(&book, interval) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
        }
    }

    Ok(())
}
