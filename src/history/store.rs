use super::{HistoryItem, HistoryStore, MAX_HISTORY};
use crate::analysis::AnalysisResult;
use std::fs;
use std::path::{Path, PathBuf};

/// History store backed by a single JSON file holding the serialized array.
pub struct JsonHistoryStore {
    path: PathBuf,
    capacity: usize,
    items: Vec<HistoryItem>,
}

impl JsonHistoryStore {
    /// Open a store at `path` with the default capacity, rehydrating the
    /// in-memory list from whatever is on disk.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, MAX_HISTORY)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Self {
        let path = path.into();
        let items = load_items(&path);
        Self {
            path,
            capacity,
            items,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(err) = fs::create_dir_all(parent)
        {
            tracing::warn!(path = %parent.display(), error = %err, "failed to create history directory");
            return;
        }

        let serialized = match serde_json::to_string_pretty(&self.items) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize history");
                return;
            }
        };

        if let Err(err) = fs::write(&self.path, serialized) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to persist history");
        }
    }
}

/// Read the persisted array. Missing file yields an empty list; malformed
/// content is deleted and yields an empty list. Never errors.
fn load_items(path: &Path) -> Vec<HistoryItem> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read history file");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<HistoryItem>>(&raw) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "corrupted history file, discarding");
            if let Err(remove_err) = fs::remove_file(path) {
                tracing::warn!(path = %path.display(), error = %remove_err, "failed to remove corrupted history file");
            }
            Vec::new()
        }
    }
}

impl HistoryStore for JsonHistoryStore {
    fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    fn add(&mut self, result: AnalysisResult, label: String) -> &[HistoryItem] {
        self.items.insert(0, HistoryItem::new(result, label));
        self.items.truncate(self.capacity);
        self.persist();
        &self.items
    }

    fn clear(&mut self) {
        self.items.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove history file");
            }
        }
    }
}

/// Ephemeral store with the same bounded, newest-first behavior and no
/// durability. Used where persistence is unwanted (and in tests).
pub struct InMemoryHistoryStore {
    capacity: usize,
    items: Vec<HistoryItem>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    fn add(&mut self, result: AnalysisResult, label: String) -> &[HistoryItem] {
        self.items.insert(0, HistoryItem::new(result, label));
        self.items.truncate(self.capacity);
        &self.items
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{HistoryStore, InMemoryHistoryStore, JsonHistoryStore, MAX_HISTORY, load_items};
    use crate::analysis::{AnalysisResult, VeganConfidence};
    use std::fs;
    use tempfile::TempDir;

    fn sample_result(summary: &str) -> AnalysisResult {
        AnalysisResult {
            is_vegan: true,
            vegan_confidence: VeganConfidence::Medium,
            vegan_reasoning: "All plant-derived ingredients".into(),
            detected_allergens: vec!["Soy".into()],
            technical_terms: vec![],
            summary: summary.into(),
            health_rating: 7.25,
            health_rating_explanation: Some("Minimally processed".into()),
        }
    }

    fn temp_store(dir: &TempDir) -> JsonHistoryStore {
        JsonHistoryStore::open(dir.path().join("history.json"))
    }

    #[test]
    fn open_missing_file_yields_empty_history() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        assert!(store.items().is_empty());
    }

    #[test]
    fn add_prepends_newest_first() {
        let dir = TempDir::new().unwrap();
        let mut store = temp_store(&dir);
        store.add(sample_result("first"), "\"first\"".into());
        store.add(sample_result("second"), "\"second\"".into());

        assert_eq!(store.items().len(), 2);
        assert_eq!(store.items()[0].result.summary, "second");
        assert_eq!(store.items()[1].result.summary, "first");
    }

    #[test]
    fn history_is_bounded_to_capacity() {
        let dir = TempDir::new().unwrap();
        let mut store = temp_store(&dir);
        for n in 0..15 {
            store.add(sample_result(&format!("entry {n}")), "label".into());
        }

        assert_eq!(store.items().len(), MAX_HISTORY);
        // Newest survives, oldest five were truncated.
        assert_eq!(store.items()[0].result.summary, "entry 14");
        assert_eq!(store.items()[MAX_HISTORY - 1].result.summary, "entry 5");
    }

    #[test]
    fn durable_content_matches_in_memory_sequence() {
        let dir = TempDir::new().unwrap();
        let mut store = temp_store(&dir);
        for n in 0..12 {
            store.add(sample_result(&format!("entry {n}")), "label".into());
        }

        let persisted = load_items(store.path());
        assert_eq!(persisted, store.items());
    }

    #[test]
    fn reload_round_trips_field_for_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut store = JsonHistoryStore::open(&path);
        store.add(sample_result("round trip"), "\"Sugar, Salt, Water\"".into());
        let original = store.items()[0].clone();

        let reloaded = JsonHistoryStore::open(&path);
        assert_eq!(reloaded.items(), &[original]);
        // No precision loss on the fractional rating.
        assert!((reloaded.items()[0].result.health_rating - 7.25).abs() < f64::EPSILON);
    }

    #[test]
    fn corrupted_file_is_discarded_and_load_does_not_raise() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json at all").unwrap();

        let store = JsonHistoryStore::open(&path);
        assert!(store.items().is_empty());
        assert!(!path.exists(), "corrupted blob must be deleted");
    }

    #[test]
    fn non_array_content_is_treated_as_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"id": "not-an-array"}"#).unwrap();

        let store = JsonHistoryStore::open(&path);
        assert!(store.items().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn clear_is_total() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut store = JsonHistoryStore::open(&path);
        store.add(sample_result("gone soon"), "label".into());
        store.clear();

        assert!(store.items().is_empty());
        assert!(!path.exists());
        // A fresh load cycle sees the empty state.
        assert!(JsonHistoryStore::open(&path).items().is_empty());
    }

    #[test]
    fn clear_on_empty_store_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let mut store = temp_store(&dir);
        store.clear();
        assert!(store.items().is_empty());
    }

    #[test]
    fn unwritable_path_still_updates_in_memory() {
        // Persistence fails (path is a directory) but the in-memory state
        // must still reflect the add.
        let dir = TempDir::new().unwrap();
        let mut store = JsonHistoryStore::open(dir.path());
        store.add(sample_result("kept in memory"), "label".into());
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn in_memory_store_is_bounded_and_newest_first() {
        let mut store = InMemoryHistoryStore::with_capacity(3);
        for n in 0..5 {
            store.add(sample_result(&format!("entry {n}")), "label".into());
        }
        assert_eq!(store.items().len(), 3);
        assert_eq!(store.items()[0].result.summary, "entry 4");

        store.clear();
        assert!(store.items().is_empty());
    }
}
