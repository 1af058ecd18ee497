//! Quote collection storage
//!
//! The whole collection is persisted as a single JSON array in `quotes.json`,
//! read at startup and rewritten after every mutation.

use crate::storage::StorageError;
use crate::types::QuoteBook;
use std::fs;
use std::path::{Path, PathBuf};

const QUOTES_FILE: &str = "quotes.json";

fn quotes_path(data_dir: &Path) -> PathBuf {
    data_dir.join(QUOTES_FILE)
}

/// Load the persisted collection.
///
/// A missing file yields the hardcoded seed list. A corrupt file is an
/// error; the caller keeps whatever state it already has.
pub fn load_quotes(data_dir: &Path) -> Result<QuoteBook, StorageError> {
    let path = quotes_path(data_dir);

    if !path.exists() {
        tracing::info!("No quotes file found, starting from the seed list");
        return Ok(QuoteBook::seed());
    }

    let json = fs::read_to_string(&path)?;
    let book: QuoteBook = serde_json::from_str(&json)?;

    tracing::debug!("Loaded {} quotes from disk", book.len());
    Ok(book)
}

/// Save the whole collection to disk
pub fn save_quotes(data_dir: &Path, book: &QuoteBook) -> Result<(), StorageError> {
    let path = quotes_path(data_dir);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(book)?;
    fs::write(path, json)?;

    tracing::debug!("Saved {} quotes to disk", book.len());
    Ok(())
}

/// Parse an imported JSON payload (a JSON array of quotes).
///
/// Malformed JSON is an error and nothing is stored; records missing text or
/// category are dropped from an otherwise valid payload.
pub fn import_json(json: &str) -> Result<QuoteBook, StorageError> {
    let book: QuoteBook = serde_json::from_str(json)?;
    let quotes = book
        .into_quotes()
        .into_iter()
        .filter(|q| q.is_well_formed())
        .collect();
    Ok(QuoteBook::from_quotes(quotes))
}

/// Serialize the collection to the export payload format
pub fn export_json(book: &QuoteBook) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(book)?)
}
