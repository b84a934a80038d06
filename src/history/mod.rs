//! Bounded, newest-first history of past analysis results.
//!
//! The store holds at most [`MAX_HISTORY`] items and overwrites its durable
//! representation wholesale on every mutation; the in-memory list is a cache
//! of it, rehydrated when the store is opened. All methods assume a single
//! writer (the controller) — callers on multi-threaded hosts must serialize
//! `add`/`clear` themselves.

mod store;

pub use store::{InMemoryHistoryStore, JsonHistoryStore};

use crate::analysis::AnalysisResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of retained history entries.
pub const MAX_HISTORY: usize = 10;

/// A persisted, labeled, timestamped wrapper around one [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// Unique id, assigned at creation.
    pub id: String,
    /// Epoch milliseconds; display ordering/formatting only.
    pub timestamp: i64,
    /// Human-readable description of the input source.
    pub label: String,
    pub result: AnalysisResult,
}

impl HistoryItem {
    pub fn new(result: AnalysisResult, label: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            label,
            result,
        }
    }
}

/// History persistence contract.
pub trait HistoryStore: Send {
    /// Current items, newest first.
    fn items(&self) -> &[HistoryItem];

    /// Prepend a new item, truncate to capacity, persist, and return the
    /// new sequence. Persistence failures are non-fatal: the in-memory
    /// state still updates.
    fn add(&mut self, result: AnalysisResult, label: String) -> &[HistoryItem];

    /// Empty both the in-memory and durable representations.
    fn clear(&mut self);
}
