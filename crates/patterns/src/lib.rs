//! Pattern registry — keyword-triggered enhancement templates.
//!
//! A pattern names a target agent, an enhancement text appended to the
//! prompt, a trigger keyword list for routing, and a fallback chain for
//! low-confidence results. The registry is an explicit object owned by the
//! orchestrator; usage counters are mutated only through
//! [`PatternRegistry::record_usage`] so state writes stay in one place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use atelier_core::brief::contains_any;
use atelier_core::error::PatternError;
use atelier_core::report::clamp_confidence;

/// How a pattern changes the run it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Appends the enhancement text to the prompt
    PromptEnhancement,
    /// Additionally routes named tools to the target agent
    ToolEnhancement,
    /// Re-runs the target agent with stronger instructions
    AgentEnhancement,
}

/// A named enhancement template with usage counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternEntry {
    pub name: String,

    pub kind: PatternKind,

    /// Target agent the pattern dispatches to
    pub agent: String,

    /// Keywords that route a prompt to this pattern
    #[serde(default)]
    pub triggers: Vec<String>,

    /// Extra keywords that must also appear for the triggers to count.
    /// Empty means the triggers alone decide.
    #[serde(default)]
    pub context_triggers: Vec<String>,

    /// Tools this pattern asks the agent to apply
    #[serde(default)]
    pub tools: Vec<String>,

    /// Text appended to the prompt when the pattern is applied
    pub enhancement: String,

    /// Results below this confidence trigger the fallback chain
    pub confidence_threshold: f32,

    /// Patterns to try when this one's result stays below threshold
    #[serde(default)]
    pub fallbacks: Vec<String>,

    pub category: String,

    #[serde(default)]
    pub tags: Vec<String>,

    // -- usage counters, mutated only via record_usage --
    #[serde(default)]
    pub use_count: u64,

    #[serde(default)]
    pub success_count: u64,

    /// Running mean of recorded confidences
    #[serde(default)]
    pub mean_confidence: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

impl PatternEntry {
    /// `success_count / use_count`, 0 when the pattern was never used.
    pub fn success_rate(&self) -> f64 {
        if self.use_count == 0 {
            0.0
        } else {
            self.success_count as f64 / self.use_count as f64
        }
    }

    /// True if this pattern's keywords route the given (lowercased) prompt.
    fn matches(&self, prompt_lower: &str) -> bool {
        if self.triggers.is_empty() {
            return false;
        }
        let triggers: Vec<&str> = self.triggers.iter().map(|s| s.as_str()).collect();
        if !contains_any(prompt_lower, &triggers) {
            return false;
        }
        if self.context_triggers.is_empty() {
            return true;
        }
        let context: Vec<&str> = self.context_triggers.iter().map(|s| s.as_str()).collect();
        contains_any(prompt_lower, &context)
    }
}

/// Counter snapshot for one pattern, as mirrored into the memory export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternStats {
    pub name: String,
    pub use_count: u64,
    pub success_count: u64,
    pub success_rate: f64,
    pub mean_confidence: f32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

/// Registry of patterns with routing order and a default.
pub struct PatternRegistry {
    patterns: HashMap<String, PatternEntry>,
    /// Routing priority: first match wins
    order: Vec<String>,
    default_pattern: String,
}

impl PatternRegistry {
    /// An empty registry with the given default pattern name.
    pub fn new(default_pattern: impl Into<String>) -> Self {
        Self {
            patterns: HashMap::new(),
            order: Vec::new(),
            default_pattern: default_pattern.into(),
        }
    }

    /// The registry pre-loaded with the built-in patterns.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new("design_enhancement");

        // Routing order matters: the specific audit/trust patterns are
        // checked before the broad design default.
        registry.register(PatternEntry {
            name: "ux_audit".into(),
            kind: PatternKind::ToolEnhancement,
            agent: "design".into(),
            triggers: vec!["audit".into(), "evaluate".into()],
            context_triggers: vec!["design".into(), "ui".into(), "ux".into(), "interface".into()],
            tools: vec!["ux_audit".into()],
            enhancement: "Perform a full usability audit using heuristic evaluation and \
                          metrics analysis."
                .into(),
            confidence_threshold: 0.85,
            fallbacks: vec!["design_enhancement".into()],
            category: "ux".into(),
            tags: vec!["audit".into(), "heuristics".into(), "metrics".into()],
            use_count: 0,
            success_count: 0,
            mean_confidence: 0.0,
            last_used: None,
        });

        registry.register(PatternEntry {
            name: "trust_building".into(),
            kind: PatternKind::ToolEnhancement,
            agent: "design".into(),
            triggers: vec!["trust".into(), "confidence".into()],
            context_triggers: vec!["design".into(), "ui".into(), "ux".into(), "interface".into()],
            tools: vec!["trust_report".into()],
            enhancement: "Analyze and strengthen the trust-building elements of the \
                          experience."
                .into(),
            confidence_threshold: 0.8,
            fallbacks: vec!["design_enhancement".into()],
            category: "trust".into(),
            tags: vec!["transparency".into(), "security".into(), "social_proof".into()],
            use_count: 0,
            success_count: 0,
            mean_confidence: 0.0,
            last_used: None,
        });

        registry.register(PatternEntry {
            name: "design_enhancement".into(),
            kind: PatternKind::PromptEnhancement,
            agent: "design".into(),
            triggers: vec!["design".into(), "ui".into(), "ux".into(), "interface".into()],
            context_triggers: vec![],
            tools: vec![],
            enhancement: "Apply user-centered design principles and ensure accessibility \
                          compliance. Focus on visual hierarchy, consistency, and user \
                          experience optimization."
                .into(),
            confidence_threshold: 0.8,
            fallbacks: vec!["ux_audit".into(), "trust_building".into()],
            category: "design".into(),
            tags: vec!["ui".into(), "ux".into(), "accessibility".into()],
            use_count: 0,
            success_count: 0,
            mean_confidence: 0.0,
            last_used: None,
        });

        registry.register(PatternEntry {
            name: "comprehensive_evaluation".into(),
            kind: PatternKind::AgentEnhancement,
            agent: "evaluator".into(),
            triggers: vec!["evaluate".into(), "assess".into(), "score".into(), "analyze".into()],
            context_triggers: vec![],
            tools: vec![],
            enhancement: "Perform a comprehensive evaluation across all criteria with \
                          detailed scoring and recommendations."
                .into(),
            confidence_threshold: 0.9,
            fallbacks: vec!["basic_evaluation".into()],
            category: "evaluation".into(),
            tags: vec!["scoring".into(), "analysis".into(), "recommendations".into()],
            use_count: 0,
            success_count: 0,
            mean_confidence: 0.0,
            last_used: None,
        });

        registry.register(PatternEntry {
            name: "basic_evaluation".into(),
            kind: PatternKind::AgentEnhancement,
            agent: "evaluator".into(),
            // Never keyword-routed: reachable only through fallback chains
            triggers: vec![],
            context_triggers: vec![],
            tools: vec![],
            enhancement: "Perform a basic evaluation with the essential criteria only.".into(),
            confidence_threshold: 0.7,
            fallbacks: vec![],
            category: "evaluation".into(),
            tags: vec!["basic".into(), "essential".into()],
            use_count: 0,
            success_count: 0,
            mean_confidence: 0.0,
            last_used: None,
        });

        registry
    }

    /// Register a pattern. Re-registering keeps the routing position.
    pub fn register(&mut self, entry: PatternEntry) {
        if !self.patterns.contains_key(&entry.name) {
            self.order.push(entry.name.clone());
        }
        info!(pattern = %entry.name, agent = %entry.agent, "Registered pattern");
        self.patterns.insert(entry.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&PatternEntry> {
        self.patterns.get(name)
    }

    /// Pattern names in routing order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Patterns in a category.
    pub fn in_category(&self, category: &str) -> Vec<&PatternEntry> {
        self.order
            .iter()
            .filter_map(|name| self.patterns.get(name))
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Route a prompt to the best pattern: first match in routing order,
    /// falling back to the default pattern.
    pub fn find_best(&self, prompt: &str) -> &str {
        let lower = prompt.to_lowercase();
        for name in &self.order {
            if let Some(entry) = self.patterns.get(name)
                && entry.matches(&lower)
            {
                debug!(pattern = %name, "Pattern routed by keywords");
                return name;
            }
        }
        &self.default_pattern
    }

    /// The fallback chain for a pattern (empty for unknown names).
    pub fn fallbacks(&self, name: &str) -> Vec<String> {
        self.patterns
            .get(name)
            .map(|p| p.fallbacks.clone())
            .unwrap_or_default()
    }

    /// Whether a result's confidence is below the pattern's threshold,
    /// i.e. the fallback chain should be tried.
    pub fn should_fall_back(&self, name: &str, confidence: f32) -> bool {
        match self.patterns.get(name) {
            Some(p) => confidence < p.confidence_threshold,
            None => false,
        }
    }

    /// The single mutation path for usage counters.
    ///
    /// Updates use/success counts, the running mean confidence, and the
    /// last-used timestamp.
    pub fn record_usage(
        &mut self,
        name: &str,
        confidence: f32,
        success: bool,
    ) -> Result<(), PatternError> {
        let entry = self
            .patterns
            .get_mut(name)
            .ok_or_else(|| PatternError::Unknown(name.into()))?;

        let confidence = clamp_confidence(confidence);
        entry.use_count += 1;
        if success {
            entry.success_count += 1;
        }
        entry.mean_confidence = ((entry.mean_confidence * (entry.use_count - 1) as f32)
            + confidence)
            / entry.use_count as f32;
        entry.last_used = Some(Utc::now());

        debug!(
            pattern = %name,
            confidence,
            success,
            use_count = entry.use_count,
            "Recorded pattern usage"
        );
        Ok(())
    }

    /// Counter snapshot for one pattern.
    pub fn stats(&self, name: &str) -> Option<PatternStats> {
        self.patterns.get(name).map(|p| PatternStats {
            name: p.name.clone(),
            use_count: p.use_count,
            success_count: p.success_count,
            success_rate: p.success_rate(),
            mean_confidence: p.mean_confidence,
            category: p.category.clone(),
            last_used: p.last_used,
        })
    }

    /// Snapshots for every pattern, in routing order.
    pub fn all_stats(&self) -> Vec<PatternStats> {
        self.order.iter().filter_map(|name| self.stats(name)).collect()
    }

    /// Best-performing patterns by (success rate, use count), descending.
    pub fn top(&self, limit: usize) -> Vec<PatternStats> {
        let mut stats = self.all_stats();
        stats.sort_by(|a, b| {
            b.success_rate
                .partial_cmp(&a.success_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.use_count.cmp(&a.use_count))
        });
        stats.truncate(limit);
        stats
    }

    /// Mirror of all counters as a JSON map, for the memory export's
    /// `pattern_memory` object.
    pub fn snapshot(&self) -> HashMap<String, serde_json::Value> {
        self.all_stats()
            .into_iter()
            .filter_map(|s| {
                let name = s.name.clone();
                serde_json::to_value(s).ok().map(|v| (name, v))
            })
            .collect()
    }

    /// Restore counters from a previously exported `pattern_memory` object.
    /// Unknown patterns and malformed entries are ignored.
    pub fn load_snapshot(&mut self, snapshot: &HashMap<String, serde_json::Value>) {
        for (name, value) in snapshot {
            let Ok(stats) = serde_json::from_value::<PatternStats>(value.clone()) else {
                continue;
            };
            if let Some(entry) = self.patterns.get_mut(name) {
                entry.use_count = stats.use_count;
                entry.success_count = stats.success_count;
                entry.mean_confidence = stats.mean_confidence;
                entry.last_used = stats.last_used;
            }
        }
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
