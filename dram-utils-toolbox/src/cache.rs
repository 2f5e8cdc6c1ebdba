//! Process-scoped WHOIS result cache.
//!
//! Entries never expire. Each key is computed at most once: concurrent callers
//! for the same key wait on the same [`OnceCell`] instead of issuing their own
//! query.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

use crate::error::ToolboxResult;

/// Memoized outcome of one WHOIS query: the raw response text or the error it raised.
pub type WhoisOutcome = ToolboxResult<Arc<str>>;

/// Single-flight cache keyed by host.
#[derive(Default)]
pub struct WhoisCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<WhoisOutcome>>>>,
}

impl WhoisCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached outcome for `key`, running `compute` only if no outcome
    /// exists yet and no other caller is already computing it.
    ///
    /// If the computing future is dropped before it finishes, the entry stays
    /// empty and the next caller computes it again.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> WhoisOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = WhoisOutcome>,
    {
        let cell = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(entries.entry(key.to_string()).or_default())
        };

        cell.get_or_init(compute).await.clone()
    }

    /// Cached outcome for `key`, if one has been computed.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn get(&self, key: &str) -> Option<WhoisOutcome> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Number of hosts with a completed outcome.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.values().filter(|cell| cell.initialized()).count()
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
