//! Interaction records — the append-only history of agent and tool runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::report::clamp_confidence;

/// One completed agent or tool invocation.
///
/// Records are append-only: once created they are never mutated, and the
/// context store's log is their only owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Unique ID for this record
    pub id: String,

    /// When the interaction completed
    pub timestamp: DateTime<Utc>,

    /// Name of the agent or tool that ran
    pub agent: String,

    /// The input prompt
    pub input: String,

    /// The rendered output text
    pub output: String,

    /// Heuristic confidence in [0, 1]
    pub confidence: f32,

    /// Tools that contributed to the run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools_used: Vec<String>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,

    /// Pattern applied during this run, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_applied: Option<String>,
}

impl InteractionRecord {
    /// Create a record stamped with a fresh ID and the current time.
    pub fn new(
        agent: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
        confidence: f32,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            agent: agent.into(),
            input: input.into(),
            output: output.into(),
            confidence: clamp_confidence(confidence),
            tools_used: Vec::new(),
            duration_ms,
            pattern_applied: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.tools_used = tools;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern_applied = Some(pattern.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_gets_id_and_timestamp() {
        let record = InteractionRecord::new("design", "input", "output", 0.8, 12);
        assert!(!record.id.is_empty());
        assert_eq!(record.agent, "design");
        assert_eq!(record.duration_ms, 12);
        assert!(record.pattern_applied.is_none());
    }

    #[test]
    fn confidence_clamped_on_construction() {
        let record = InteractionRecord::new("design", "i", "o", 3.0, 0);
        assert_eq!(record.confidence, 1.0);
    }

    #[test]
    fn builder_attaches_tools_and_pattern() {
        let record = InteractionRecord::new("design", "i", "o", 0.9, 5)
            .with_tools(vec!["ux_audit".into()])
            .with_pattern("design_enhancement");
        assert_eq!(record.tools_used, vec!["ux_audit".to_string()]);
        assert_eq!(record.pattern_applied.as_deref(), Some("design_enhancement"));
    }

    #[test]
    fn record_serialization_roundtrip() {
        let record = InteractionRecord::new("evaluator", "score this", "scored", 0.77, 3);
        let json = serde_json::to_string(&record).unwrap();
        let parsed: InteractionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.confidence, record.confidence);
    }
}
