//! Context store — shared state and interaction history for one run.
//!
//! The store holds three things: the append-only interaction log, the flat
//! shared-state map (last-write-wins, no schema), and a mirror of
//! pattern-usage data. Lifetime is one process run; the whole store can be
//! exported to and re-imported from a single JSON snapshot file, which is
//! what makes history survive across invocations.
//!
//! Persistence failures are recoverable by design: callers log a warning
//! and continue without memory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use atelier_core::InteractionRecord;
use atelier_core::error::MemoryError;

/// Snapshot wire format: the single JSON object written on export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub session_id: String,

    #[serde(default)]
    pub interactions: Vec<InteractionRecord>,

    #[serde(default)]
    pub shared_state: HashMap<String, serde_json::Value>,

    #[serde(default)]
    pub pattern_memory: HashMap<String, serde_json::Value>,
}

/// Summary statistics over the interaction log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextStats {
    pub session_id: String,
    pub total_interactions: usize,
    pub avg_confidence: f32,
    pub avg_duration_ms: f64,
    pub shared_state_keys: Vec<String>,
}

/// The process-lifetime holder of shared state and interaction history.
pub struct ContextStore {
    session_id: String,
    interactions: RwLock<Vec<InteractionRecord>>,
    shared_state: RwLock<HashMap<String, serde_json::Value>>,
    pattern_memory: RwLock<HashMap<String, serde_json::Value>>,
}

impl ContextStore {
    /// Create an empty store with a fresh session ID.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            interactions: RwLock::new(Vec::new()),
            shared_state: RwLock::new(HashMap::new()),
            pattern_memory: RwLock::new(HashMap::new()),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    // ── Interaction log ────────────────────────────────────────────────

    /// Append a record to the log. Records are never mutated afterwards.
    pub async fn record(&self, record: InteractionRecord) {
        debug!(agent = %record.agent, confidence = record.confidence, "Recording interaction");
        self.interactions.write().await.push(record);
    }

    /// Number of logged interactions.
    pub async fn len(&self) -> usize {
        self.interactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.interactions.read().await.is_empty()
    }

    /// The most recent `limit` records, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<InteractionRecord> {
        let log = self.interactions.read().await;
        log.iter().rev().take(limit).cloned().collect()
    }

    /// Keyword recall: records whose input contains any query word,
    /// case-insensitive, newest first.
    pub async fn recall(&self, query: &str, limit: usize) -> Vec<InteractionRecord> {
        let words: Vec<String> = query.split_whitespace().map(|w| w.to_lowercase()).collect();
        if words.is_empty() {
            return Vec::new();
        }

        let log = self.interactions.read().await;
        log.iter()
            .rev()
            .filter(|r| {
                let input = r.input.to_lowercase();
                words.iter().any(|w| input.contains(w.as_str()))
            })
            .take(limit)
            .cloned()
            .collect()
    }

    // ── Shared state ───────────────────────────────────────────────────

    /// Set a shared-state value (last-write-wins).
    pub async fn set_state(&self, key: impl Into<String>, value: serde_json::Value) {
        self.shared_state.write().await.insert(key.into(), value);
    }

    /// Get a shared-state value.
    pub async fn get_state(&self, key: &str) -> Option<serde_json::Value> {
        self.shared_state.read().await.get(key).cloned()
    }

    /// Merge a batch of updates into shared state.
    pub async fn merge_state(&self, updates: HashMap<String, serde_json::Value>) {
        if updates.is_empty() {
            return;
        }
        self.shared_state.write().await.extend(updates);
    }

    // ── Pattern memory mirror ──────────────────────────────────────────

    /// Store pattern data under its name (overwrites previous data).
    pub async fn set_pattern_memory(&self, name: impl Into<String>, data: serde_json::Value) {
        self.pattern_memory.write().await.insert(name.into(), data);
    }

    /// Get stored pattern data by name.
    pub async fn get_pattern_memory(&self, name: &str) -> Option<serde_json::Value> {
        self.pattern_memory.read().await.get(name).cloned()
    }

    /// The whole pattern-memory map.
    pub async fn pattern_memory(&self) -> HashMap<String, serde_json::Value> {
        self.pattern_memory.read().await.clone()
    }

    // ── Stats ──────────────────────────────────────────────────────────

    pub async fn stats(&self) -> ContextStats {
        let log = self.interactions.read().await;
        let total = log.len();
        let (avg_confidence, avg_duration_ms) = if total > 0 {
            let conf: f32 = log.iter().map(|r| r.confidence).sum();
            let dur: u64 = log.iter().map(|r| r.duration_ms).sum();
            (conf / total as f32, dur as f64 / total as f64)
        } else {
            (0.0, 0.0)
        };

        let mut shared_state_keys: Vec<String> =
            self.shared_state.read().await.keys().cloned().collect();
        shared_state_keys.sort_unstable();

        ContextStats {
            session_id: self.session_id.clone(),
            total_interactions: total,
            avg_confidence,
            avg_duration_ms,
            shared_state_keys,
        }
    }

    /// Drop everything: log, shared state, pattern memory.
    pub async fn clear(&self) {
        self.interactions.write().await.clear();
        self.shared_state.write().await.clear();
        self.pattern_memory.write().await.clear();
        info!("Context store cleared");
    }

    // ── Snapshot export / import ───────────────────────────────────────

    /// Capture the store as a snapshot object.
    pub async fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            session_id: self.session_id.clone(),
            interactions: self.interactions.read().await.clone(),
            shared_state: self.shared_state.read().await.clone(),
            pattern_memory: self.pattern_memory.read().await.clone(),
        }
    }

    /// Write the snapshot to a JSON file.
    pub async fn export(&self, path: &Path) -> Result<(), MemoryError> {
        let snapshot = self.snapshot().await;
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| MemoryError::Encode(e.to_string()))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| MemoryError::Storage(e.to_string()))?;
        }

        std::fs::write(path, json).map_err(|e| MemoryError::Storage(e.to_string()))?;
        info!(path = %path.display(), interactions = snapshot.interactions.len(), "Memory exported");
        Ok(())
    }

    /// Read a snapshot file and merge it into this store: interactions are
    /// appended, shared state and pattern memory are extended
    /// (last-write-wins against current contents).
    pub async fn import(&self, path: &Path) -> Result<usize, MemoryError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MemoryError::Storage(e.to_string()))?;
        let snapshot: MemorySnapshot =
            serde_json::from_str(&content).map_err(|e| MemoryError::Decode(e.to_string()))?;

        let imported = snapshot.interactions.len();
        self.interactions.write().await.extend(snapshot.interactions);
        self.shared_state.write().await.extend(snapshot.shared_state);
        self.pattern_memory.write().await.extend(snapshot.pattern_memory);

        info!(path = %path.display(), interactions = imported, "Memory imported");
        Ok(imported)
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(agent: &str, input: &str, confidence: f32) -> InteractionRecord {
        InteractionRecord::new(agent, input, "output", confidence, 10)
    }

    #[tokio::test]
    async fn record_and_stats() {
        let store = ContextStore::new();
        store.record(record("design", "make a layout", 0.8)).await;
        store.record(record("evaluator", "score it", 0.6)).await;

        let stats = store.stats().await;
        assert_eq!(stats.total_interactions, 2);
        assert!((stats.avg_confidence - 0.7).abs() < 1e-6);
        assert!((stats.avg_duration_ms - 10.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_store_stats_are_zero() {
        let store = ContextStore::new();
        let stats = store.stats().await;
        assert_eq!(stats.total_interactions, 0);
        assert_eq!(stats.avg_confidence, 0.0);
    }

    #[tokio::test]
    async fn recall_matches_keywords_newest_first() {
        let store = ContextStore::new();
        store.record(record("design", "design a dashboard", 0.8)).await;
        store.record(record("design", "audit the checkout", 0.8)).await;
        store.record(record("design", "redesign the dashboard header", 0.8)).await;

        let hits = store.recall("dashboard", 5).await;
        assert_eq!(hits.len(), 2);
        assert!(hits[0].input.contains("header")); // newest first

        let none = store.recall("unrelated", 5).await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn shared_state_last_write_wins() {
        let store = ContextStore::new();
        store.set_state("tone", serde_json::json!("friendly")).await;
        store.set_state("tone", serde_json::json!("cinematic")).await;
        assert_eq!(
            store.get_state("tone").await,
            Some(serde_json::json!("cinematic"))
        );
    }

    #[tokio::test]
    async fn export_import_roundtrip_on_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");

        let store = ContextStore::new();
        store.record(record("design", "first", 0.9)).await;
        store.record(record("evaluator", "second", 0.5)).await;
        store.set_state("key", serde_json::json!({"nested": true})).await;
        store.set_pattern_memory("design_enhancement", serde_json::json!({"use_count": 3})).await;
        store.export(&path).await.unwrap();

        let fresh = ContextStore::new();
        let imported = fresh.import(&path).await.unwrap();
        assert_eq!(imported, 2);
        assert_eq!(fresh.len().await, 2);
        assert_eq!(
            fresh.get_state("key").await,
            Some(serde_json::json!({"nested": true}))
        );
        assert_eq!(
            fresh.get_pattern_memory("design_enhancement").await,
            Some(serde_json::json!({"use_count": 3}))
        );
    }

    #[tokio::test]
    async fn import_appends_to_existing_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");

        let store = ContextStore::new();
        store.record(record("design", "exported", 0.9)).await;
        store.export(&path).await.unwrap();

        let other = ContextStore::new();
        other.record(record("creative", "already here", 0.7)).await;
        other.import(&path).await.unwrap();
        assert_eq!(other.len().await, 2);
    }

    #[tokio::test]
    async fn import_missing_file_is_storage_error() {
        let store = ContextStore::new();
        let err = store.import(Path::new("/nonexistent/memory.json")).await.unwrap_err();
        assert!(matches!(err, MemoryError::Storage(_)));
    }

    #[tokio::test]
    async fn import_corrupted_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = ContextStore::new();
        let err = store.import(&path).await.unwrap_err();
        assert!(matches!(err, MemoryError::Decode(_)));
    }

    #[tokio::test]
    async fn clear_empties_everything() {
        let store = ContextStore::new();
        store.record(record("design", "x", 0.5)).await;
        store.set_state("k", serde_json::json!(1)).await;
        store.clear().await;
        assert!(store.is_empty().await);
        assert!(store.get_state("k").await.is_none());
    }
}
