//! Agent report types — the structured result of one agent run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How urgent a recommendation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// A single actionable recommendation inside a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,

    /// Recommendation category (ux_improvement, accessibility, technical, …)
    pub category: String,

    pub priority: Priority,

    pub detail: String,

    /// Heuristic confidence in this recommendation, in [0, 1]
    pub confidence: f32,
}

/// The structured result of running an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReport {
    /// Name of the agent that produced this report
    pub agent: String,

    /// The rendered report text
    pub output: String,

    /// Heuristic confidence in [0, 1]
    pub confidence: f32,

    /// Recommendations backing the report
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Recommendation>,

    /// Names of tools that contributed sections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools_used: Vec<String>,

    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,

    /// Shared-state updates to merge into the context store (last-write-wins)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub state_updates: HashMap<String, serde_json::Value>,
}

impl AgentReport {
    /// Create a report with the confidence clamped into [0, 1].
    pub fn new(agent: impl Into<String>, output: impl Into<String>, confidence: f32) -> Self {
        Self {
            agent: agent.into(),
            output: output.into(),
            confidence: clamp_confidence(confidence),
            recommendations: Vec::new(),
            tools_used: Vec::new(),
            duration_ms: 0,
            state_updates: HashMap::new(),
        }
    }
}

/// Clamp a heuristic confidence value into [0, 1].
///
/// NaN collapses to 0 so a malformed heuristic can never poison the
/// interaction log's averages.
pub fn clamp_confidence(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
