//! Sync service
//!
//! Drives periodic reconciliation: fetch the remote set, merge it into the
//! local collection, persist the outcome. Syncs are serialized with an
//! in-flight flag so a slow fetch never overlaps the next timer tick.

use crate::storage::quotes::save_quotes;
use crate::sync::reconcile::{reconcile, Conflict};
use crate::sync::remote::QuoteSource;
use crate::sync::SyncError;
use crate::types::QuoteBook;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Outcome of one completed sync pass
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Records appended from the remote set
    pub added: usize,
    /// Conflicts resolved in the remote's favor
    pub conflicts: Vec<Conflict>,
    pub finished_at: DateTime<Utc>,
    /// User-facing status line
    pub message: String,
}

fn report_message(added: usize, conflicts: usize) -> String {
    if added == 0 && conflicts == 0 {
        "Quotes are up to date with the server.".to_string()
    } else {
        format!(
            "Quotes synced with server! {} new, {} conflict(s) resolved (server version kept).",
            added, conflicts
        )
    }
}

/// Periodic sync driver
pub struct SyncService {
    source: Arc<dyn QuoteSource>,
    data_dir: PathBuf,
    in_flight: AtomicBool,
}

impl SyncService {
    pub fn new(source: Arc<dyn QuoteSource>, data_dir: PathBuf) -> Self {
        Self {
            source,
            data_dir,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one sync pass: fetch, reconcile, persist.
    ///
    /// The collection lock is only taken after the fetch completes, so the
    /// collection stays usable while network I/O is pending. On failure the
    /// collection is left untouched.
    pub async fn sync_once(&self, book: &Mutex<QuoteBook>) -> Result<SyncReport, SyncError> {
        let remote = self.source.fetch().await?;

        let mut book = book.lock().await;
        let before = book.len();
        let outcome = reconcile(book.clone().into_quotes(), remote);
        let added = outcome.quotes.len() - before;
        let conflicts = outcome.conflicts;

        book.replace_all(outcome.quotes);
        save_quotes(&self.data_dir, &book)?;

        Ok(SyncReport {
            added,
            message: report_message(added, conflicts.len()),
            conflicts,
            finished_at: Utc::now(),
        })
    }

    /// Run one sync pass unless another is already in flight.
    ///
    /// Returns `None` for a skipped pass. The flag is released on failure
    /// too, so the next tick can retry.
    pub async fn try_sync(&self, book: &Mutex<QuoteBook>) -> Option<Result<SyncReport, SyncError>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Sync already in flight, skipping");
            return None;
        }

        let result = self.sync_once(book).await;
        self.in_flight.store(false, Ordering::SeqCst);
        Some(result)
    }

    /// Periodic sync loop. A failed pass is logged and retried on the next
    /// tick; a tick arriving mid-sync is skipped.
    pub async fn run_periodic(&self, book: &Mutex<QuoteBook>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            match self.try_sync(book).await {
                Some(Ok(report)) => tracing::info!("{}", report.message),
                Some(Err(e)) => tracing::warn!("Sync failed: {}", e),
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quote;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    struct FixedSource {
        quotes: Vec<Quote>,
    }

    #[async_trait]
    impl QuoteSource for FixedSource {
        async fn fetch(&self) -> Result<Vec<Quote>, SyncError> {
            Ok(self.quotes.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl QuoteSource for FailingSource {
        async fn fetch(&self) -> Result<Vec<Quote>, SyncError> {
            Err(SyncError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
        }
    }

    /// Blocks fetches until released, to hold a sync in flight
    struct GatedSource {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl QuoteSource for GatedSource {
        async fn fetch(&self) -> Result<Vec<Quote>, SyncError> {
            self.gate.notified().await;
            Ok(vec![])
        }
    }

    fn service(source: Arc<dyn QuoteSource>, dir: &std::path::Path) -> SyncService {
        SyncService::new(source, dir.to_path_buf())
    }

    #[tokio::test]
    async fn test_sync_once_merges_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(
            Arc::new(FixedSource {
                quotes: vec![
                    Quote::new("A", "Server"),
                    Quote::new("fresh from remote", "Server"),
                ],
            }),
            dir.path(),
        );

        let mut local = QuoteBook::new();
        local.add("A", "Motivation").unwrap();
        let book = Mutex::new(local);

        let report = svc.sync_once(&book).await.unwrap();
        assert_eq!(report.added, 1);
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].remote_category, "Server");

        // persisted blob matches in-memory state
        let persisted = crate::storage::quotes::load_quotes(dir.path()).unwrap();
        assert_eq!(persisted, *book.lock().await);
    }

    #[tokio::test]
    async fn test_sync_failure_leaves_collection_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(Arc::new(FailingSource), dir.path());

        let book = Mutex::new(QuoteBook::seed());
        let result = svc.sync_once(&book).await;
        assert!(result.is_err());
        assert_eq!(*book.lock().await, QuoteBook::seed());
        assert!(!dir.path().join("quotes.json").exists());
    }

    #[tokio::test]
    async fn test_try_sync_skips_while_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let gate = Arc::new(Notify::new());
        let svc = Arc::new(service(
            Arc::new(GatedSource { gate: gate.clone() }),
            dir.path(),
        ));
        let book = Arc::new(Mutex::new(QuoteBook::new()));

        let first = {
            let svc = svc.clone();
            let book = book.clone();
            tokio::spawn(async move { svc.try_sync(&book).await })
        };
        tokio::task::yield_now().await;

        // the first sync is parked on the gate; this tick must be skipped
        assert!(svc.try_sync(&book).await.is_none());

        gate.notify_one();
        let first = first.await.unwrap();
        assert!(matches!(first, Some(Ok(_))));

        // flag released, the next tick syncs again
        gate.notify_one();
        assert!(svc.try_sync(&book).await.is_some());
    }

    #[tokio::test]
    async fn test_second_sync_reports_no_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(
            Arc::new(FixedSource {
                quotes: vec![Quote::new("A", "Server")],
            }),
            dir.path(),
        );

        let mut local = QuoteBook::new();
        local.add("A", "Motivation").unwrap();
        let book = Mutex::new(local);

        let first = svc.sync_once(&book).await.unwrap();
        assert_eq!(first.conflicts.len(), 1);

        let second = svc.sync_once(&book).await.unwrap();
        assert_eq!(second.added, 0);
        assert!(second.conflicts.is_empty());
        assert_eq!(second.message, "Quotes are up to date with the server.");
    }
}
