//! Debounced search sessions
//!
//! Collapses keystroke bursts into one request and discards stale in-flight
//! results: every issued request carries a monotonically increasing sequence
//! number, and a response is accepted only while its number is still the
//! latest issued.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::debug;

/// Ticket identifying one issued search request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// One search box's request sequencing and debounce state.
///
/// A session is cheap and independent; each searchable surface (thread
/// search, member filter, unit lookup) owns its own.
pub struct SearchSession {
    latest: AtomicU64,
    debounce: Duration,
}

impl SearchSession {
    /// Create a session with the given debounce window
    pub fn new(debounce: Duration) -> Self {
        Self {
            latest: AtomicU64::new(0),
            debounce,
        }
    }

    /// The configured debounce window
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Issue a new sequence number, superseding every earlier ticket
    pub fn issue(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a ticket is still the latest issued
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Debounce, run the fetch, and gate the result.
    ///
    /// Returns `None` when the query was superseded during the debounce
    /// window or while the fetch was in flight; the caller then leaves its
    /// result list untouched. An empty query is a normal query: it fires
    /// once and lets the caller reset to the unfiltered set.
    pub async fn run<F, Fut, T>(&self, query: String, fetch: F) -> Option<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.issue();

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(ticket) {
            debug!(seq = ticket.0, "search superseded during debounce");
            return None;
        }

        let result = fetch(query).await;

        if !self.is_current(ticket) {
            debug!(seq = ticket.0, "stale search response discarded");
            return None;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_tickets_supersede() {
        let session = SearchSession::new(Duration::from_millis(0));
        let first = session.issue();
        assert!(session.is_current(first));

        let second = session.issue();
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }

    #[tokio::test]
    async fn test_burst_collapses_to_latest_query() {
        let session = Arc::new(SearchSession::new(Duration::from_millis(50)));
        let fetches = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for query in ["o", "op", "opi", "opio"] {
            let session = session.clone();
            let fetches = fetches.clone();
            handles.push(tokio::spawn(async move {
                session
                    .run(query.to_string(), |q| async move {
                        fetches.fetch_add(1, Ordering::SeqCst);
                        q
                    })
                    .await
            }));
            // Keystrokes land well inside the debounce window
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let results: Vec<_> = futures_join(handles).await;
        let accepted: Vec<_> = results.into_iter().flatten().collect();

        assert_eq!(fetches.load(Ordering::SeqCst), 1, "burst should fire one fetch");
        assert_eq!(accepted, vec!["opio".to_string()]);
    }

    #[tokio::test]
    async fn test_stale_in_flight_response_is_discarded() {
        let session = Arc::new(SearchSession::new(Duration::from_millis(0)));

        // Slow first request
        let slow = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .run("old".to_string(), |q| async move {
                        tokio::time::sleep(Duration::from_millis(80)).await;
                        q
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Fast second request supersedes it while in flight
        let fast = session.run("new".to_string(), |q| async move { q }).await;

        assert_eq!(fast.as_deref(), Some("new"));
        assert_eq!(slow.await.unwrap(), None, "stale result must be discarded");
    }

    #[tokio::test]
    async fn test_cleared_query_fires_once_and_resets() {
        let session = SearchSession::new(Duration::from_millis(1));
        let full_set = vec!["t-1", "t-2", "t-3"];

        let filtered = session
            .run("opioid".to_string(), |_q| async { vec!["t-2"] })
            .await
            .unwrap();
        assert_eq!(filtered, vec!["t-2"]);

        // Clearing the box fires a single request with the empty query
        let reset = session
            .run(String::new(), |q| {
                let full_set = full_set.clone();
                async move {
                    assert!(q.is_empty());
                    full_set
                }
            })
            .await
            .unwrap();
        assert_eq!(reset, vec!["t-1", "t-2", "t-3"]);
    }

    async fn futures_join<T>(handles: Vec<tokio::task::JoinHandle<T>>) -> Vec<T> {
        let mut out = Vec::with_capacity(handles.len());
        for handle in handles {
            out.push(handle.await.unwrap());
        }
        out
    }
}
