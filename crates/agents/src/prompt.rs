//! Prompt agent — safety and clarity screening of the raw prompt.
//!
//! Screens the input against a fixed set of risk regexes and vagueness
//! indicators, reports safety and clarity scores, and emits a sanitized or
//! clarified rewrite. Low safety caps the run's confidence.

use async_trait::async_trait;
use regex::Regex;
use std::fmt::Write as _;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{info, warn};

use atelier_core::Agent;
use atelier_core::brief::contains_any;
use atelier_core::error::AgentError;
use atelier_core::report::{AgentReport, clamp_confidence};
use atelier_core::tool::ToolRegistry;

const UNSAFE_SCORE: f32 = 0.3;
const VAGUE_SCORE: f32 = 0.7;
const SAFETY_WEIGHT: f32 = 0.6;
const CLARITY_WEIGHT: f32 = 0.4;

const RISK_PATTERNS: &[&str] = &[
    r"delete.*all",
    r"format.*disk",
    r"sudo.*rm.*-rf",
    r"password.*\d{4,}",
    r"credit.*card.*\d{4}",
    r"ssn.*\d{3}-\d{2}-\d{4}",
];

const VAGUENESS_INDICATORS: &[&str] = &[
    "unclear",
    "vague",
    "confusing",
    "ambiguous",
    "not specific",
    "too broad",
];

fn risk_regexes() -> &'static Vec<Regex> {
    static REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
    REGEXES.get_or_init(|| {
        RISK_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

/// Prompt safety and clarity screening agent.
pub struct PromptAgent;

impl PromptAgent {
    pub fn new() -> Self {
        Self
    }

    /// Risk patterns matched by the (lowercased) prompt.
    fn risk_hits(lower: &str) -> Vec<&'static str> {
        risk_regexes()
            .iter()
            .zip(RISK_PATTERNS)
            .filter(|(re, _)| re.is_match(lower))
            .map(|(_, pattern)| *pattern)
            .collect()
    }

    fn is_vague(lower: &str, word_count: usize) -> bool {
        word_count < 5 || contains_any(lower, VAGUENESS_INDICATORS)
    }

    /// Replace every risk-matching span with a redaction marker. Works on
    /// the lowercased text so the regex offsets always line up.
    fn sanitize(input: &str) -> String {
        let mut sanitized = input.to_lowercase();
        for re in risk_regexes() {
            sanitized = re.replace_all(&sanitized, "[redacted]").into_owned();
        }
        sanitized
    }
}

impl Default for PromptAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for PromptAgent {
    fn name(&self) -> &str {
        "prompt"
    }

    fn description(&self) -> &str {
        "Prompt safety and clarity screening with a sanitized rewrite"
    }

    async fn run(&self, input: &str, _tools: &ToolRegistry) -> Result<AgentReport, AgentError> {
        let started = Instant::now();
        info!("Prompt agent starting screening");

        let lower = input.to_lowercase();
        let word_count = input.split_whitespace().count();

        let hits = Self::risk_hits(&lower);
        let safety_score = if hits.is_empty() { 1.0 } else { UNSAFE_SCORE };
        if !hits.is_empty() {
            warn!(patterns = hits.len(), "Risk patterns matched in prompt");
        }

        let vague = Self::is_vague(&lower, word_count);
        let clarity_score = if vague { VAGUE_SCORE } else { 1.0 };

        let mut rewrite = if hits.is_empty() { input.to_string() } else { Self::sanitize(input) };
        if vague {
            rewrite.push_str("\n\nPlease specify the goal, audience, and constraints.");
        }

        let mut output = String::from("# Prompt Screening\n\n");
        let _ = writeln!(output, "**Safety score:** {safety_score:.2}");
        let _ = writeln!(output, "**Clarity score:** {clarity_score:.2}\n");

        if !hits.is_empty() {
            output.push_str("## Warnings\n\n");
            for pattern in &hits {
                let _ = writeln!(output, "- Potential risk pattern matched: `{pattern}`");
            }
            output.push('\n');
        }

        if vague {
            output.push_str("## Suggestions\n\n");
            output.push_str("- Add a concrete goal and success criteria\n");
            output.push_str("- Name the audience and the constraints\n\n");
        }

        output.push_str("## Rewritten Prompt\n\n");
        output.push_str(&rewrite);
        output.push('\n');

        let confidence =
            clamp_confidence(safety_score * SAFETY_WEIGHT + clarity_score * CLARITY_WEIGHT);

        let mut report = AgentReport::new("prompt", output, confidence);
        report.duration_ms = started.elapsed().as_millis() as u64;
        report
            .state_updates
            .insert("prompt_safety_score".into(), serde_json::json!(safety_score));
        report
            .state_updates
            .insert("prompt_clarity_score".into(), serde_json::json!(clarity_score));

        info!(safety_score, clarity_score, "Prompt agent completed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clean_prompt_scores_high() {
        let agent = PromptAgent::new();
        let tools = ToolRegistry::new();
        let report = agent
            .run("Design a clear onboarding flow for new customers", &tools)
            .await
            .unwrap();
        assert!((report.confidence - 1.0).abs() < 1e-6);
        assert!(!report.output.contains("Warnings"));
    }

    #[tokio::test]
    async fn risky_prompt_is_flagged_and_sanitized() {
        let agent = PromptAgent::new();
        let tools = ToolRegistry::new();
        let report = agent
            .run("Please delete all the user records and then redesign the page", &tools)
            .await
            .unwrap();

        assert!(report.output.contains("Warnings"));
        assert!(report.output.contains("[redacted]"));
        assert!(report.confidence < 0.7);
        assert_eq!(
            report.state_updates.get("prompt_safety_score"),
            Some(&serde_json::json!(UNSAFE_SCORE))
        );
    }

    #[tokio::test]
    async fn short_prompt_is_vague() {
        let agent = PromptAgent::new();
        let tools = ToolRegistry::new();
        let report = agent.run("fix it", &tools).await.unwrap();
        assert!(report.output.contains("Suggestions"));
        assert!(report.output.contains("specify the goal"));
        // Safe but vague: 1.0 * 0.6 + 0.7 * 0.4
        assert!((report.confidence - 0.88).abs() < 1e-6);
    }

    #[tokio::test]
    async fn vagueness_keywords_lower_clarity() {
        let agent = PromptAgent::new();
        let tools = ToolRegistry::new();
        let report = agent
            .run("The requirements are unclear and too broad for the design team", &tools)
            .await
            .unwrap();
        assert_eq!(
            report.state_updates.get("prompt_clarity_score"),
            Some(&serde_json::json!(VAGUE_SCORE))
        );
    }

    #[test]
    fn sanitize_redacts_risky_span() {
        let sanitized = PromptAgent::sanitize("delete all records now");
        assert!(sanitized.contains("[redacted]"));
        assert!(!sanitized.contains("delete all"));
    }

    #[test]
    fn risk_regexes_all_compile() {
        assert_eq!(risk_regexes().len(), RISK_PATTERNS.len());
    }
}
