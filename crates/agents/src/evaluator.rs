//! Evaluator agent — weighted-criteria scoring of the input.
//!
//! Seven criteria with fixed weights; each criterion is scored by keyword
//! and length checks, the overall score is the weight-normalized sum, and
//! the report lists reasoning plus improvement suggestions for weak
//! criteria. The confidence of the run IS the overall score.

use async_trait::async_trait;
use std::fmt::Write as _;
use std::time::Instant;
use tracing::info;

use atelier_core::Agent;
use atelier_core::brief::contains_any;
use atelier_core::error::AgentError;
use atelier_core::report::{AgentReport, clamp_confidence};
use atelier_core::tool::ToolRegistry;

const WEAK_SCORE: f32 = 0.7;

struct Criterion {
    name: &'static str,
    weight: f32,
    description: &'static str,
    improvement: &'static str,
}

const CRITERIA: &[Criterion] = &[
    Criterion {
        name: "clarity",
        weight: 0.15,
        description: "How clear and understandable is the input?",
        improvement: "State the goal explicitly and avoid ambiguous phrasing",
    },
    Criterion {
        name: "completeness",
        weight: 0.15,
        description: "How complete is the request?",
        improvement: "Include requirements, success criteria, and scope",
    },
    Criterion {
        name: "actionability",
        weight: 0.20,
        description: "How actionable is the request?",
        improvement: "Phrase the request around concrete actions and next steps",
    },
    Criterion {
        name: "accuracy",
        weight: 0.15,
        description: "How well-grounded is the information provided?",
        improvement: "Reference data, research, or measurable observations",
    },
    Criterion {
        name: "relevance",
        weight: 0.15,
        description: "How relevant is the input to the product domain?",
        improvement: "Tie the request to users, product, or design outcomes",
    },
    Criterion {
        name: "innovation",
        weight: 0.10,
        description: "How innovative or creative is the approach?",
        improvement: "Consider novel directions beyond the established pattern",
    },
    Criterion {
        name: "product_value",
        weight: 0.10,
        description: "How much business or product value does it carry?",
        improvement: "Connect the work to business value or user outcomes",
    },
];

/// Weighted-criteria evaluation agent.
pub struct EvaluatorAgent;

impl EvaluatorAgent {
    pub fn new() -> Self {
        Self
    }

    /// Placeholder per-criterion heuristic: base score plus keyword and
    /// length bumps, capped at 1.0.
    fn score(criterion: &str, input: &str) -> f32 {
        let lower = input.to_lowercase();
        let words = input.split_whitespace().count();

        let score: f32 = match criterion {
            "clarity" => {
                let mut s = 0.7;
                if words > 50 {
                    s += 0.1;
                }
                if contains_any(&lower, &["clear", "specific", "detailed"]) {
                    s += 0.1;
                }
                s
            }
            "completeness" => {
                let mut s = 0.7;
                if words > 30 {
                    s += 0.1;
                }
                if contains_any(&lower, &["requirements", "criteria", "scope"]) {
                    s += 0.1;
                }
                s
            }
            "actionability" => {
                let mut s = 0.7;
                if contains_any(&lower, &["improve", "create", "implement", "redesign", "build"]) {
                    s += 0.1;
                }
                if contains_any(&lower, &["steps", "plan", "roadmap"]) {
                    s += 0.1;
                }
                s
            }
            "accuracy" => {
                let mut s = 0.7;
                if contains_any(&lower, &["data", "metric", "research", "measured"]) {
                    s += 0.15;
                }
                s
            }
            "relevance" => {
                let mut s = 0.7;
                if contains_any(&lower, &["design", "product", "user", "interface"]) {
                    s += 0.1;
                }
                if words > 10 {
                    s += 0.05;
                }
                s
            }
            "innovation" => {
                let mut s = 0.6;
                if contains_any(&lower, &["innovative", "creative", "novel", "bold"]) {
                    s += 0.2;
                }
                s
            }
            "product_value" => {
                let mut s = 0.7;
                if contains_any(&lower, &["value", "revenue", "business", "growth", "conversion"]) {
                    s += 0.15;
                }
                s
            }
            _ => 0.7,
        };

        score.min(1.0)
    }

    fn reasoning(score: f32) -> &'static str {
        if score >= 0.85 {
            "strong signal in the input"
        } else if score >= 0.7 {
            "adequate, with room to sharpen"
        } else {
            "weak signal; see improvement suggestion"
        }
    }

    /// Weight-normalized overall score.
    fn overall(scores: &[(f32, f32)]) -> f32 {
        let total_weight: f32 = scores.iter().map(|(_, w)| w).sum();
        if total_weight <= 0.0 {
            return 0.0;
        }
        let total: f32 = scores.iter().map(|(s, w)| s * w).sum();
        total / total_weight
    }
}

impl Default for EvaluatorAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for EvaluatorAgent {
    fn name(&self) -> &str {
        "evaluator"
    }

    fn description(&self) -> &str {
        "Weighted-criteria evaluation and scoring of the input"
    }

    async fn run(&self, input: &str, _tools: &ToolRegistry) -> Result<AgentReport, AgentError> {
        let started = Instant::now();
        info!("Evaluator agent starting analysis");

        let scored: Vec<(&Criterion, f32)> = CRITERIA
            .iter()
            .map(|c| (c, Self::score(c.name, input)))
            .collect();
        let overall = Self::overall(
            &scored.iter().map(|(c, s)| (*s, c.weight)).collect::<Vec<_>>(),
        );

        let mut output = String::from("# Evaluation Report\n\n");
        let excerpt: String = input.chars().take(100).collect();
        let _ = writeln!(
            output,
            "## Input\n{excerpt}{}\n",
            if input.chars().count() > 100 { "…" } else { "" }
        );
        let _ = writeln!(output, "## Overall Score: {overall:.2}/1.00\n");

        output.push_str("## Detailed Evaluation\n\n");
        for (criterion, score) in &scored {
            let _ = writeln!(output, "### {}", criterion.name);
            let _ = writeln!(output, "**Score:** {score:.2}/1.00");
            let _ = writeln!(output, "**Weight:** {:.2}", criterion.weight);
            let _ = writeln!(output, "**Description:** {}", criterion.description);
            let _ = writeln!(output, "**Reasoning:** {}\n", Self::reasoning(*score));
        }

        let weak: Vec<&(&Criterion, f32)> =
            scored.iter().filter(|(_, s)| *s < WEAK_SCORE).collect();
        output.push_str("## Recommendations\n\n");
        if weak.is_empty() {
            output.push_str("All criteria meet the baseline. Proceed as planned.\n");
        } else {
            output.push_str("**Areas for improvement:**\n");
            for (criterion, _) in weak {
                let _ = writeln!(output, "- **{}:** {}", criterion.name, criterion.improvement);
            }
        }

        let mut report = AgentReport::new("evaluator", output, clamp_confidence(overall));
        report.duration_ms = started.elapsed().as_millis() as u64;
        report
            .state_updates
            .insert("evaluation_overall".into(), serde_json::json!(overall));

        info!(overall, "Evaluator agent completed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_cover_all_criteria() {
        let total: f32 = CRITERIA.iter().map(|c| c.weight).sum();
        assert!(total > 0.0);
        assert_eq!(CRITERIA.len(), 7);
    }

    #[test]
    fn overall_is_weight_normalized() {
        // Uniform scores come out unchanged regardless of weights
        let scores: Vec<(f32, f32)> = CRITERIA.iter().map(|c| (0.8, c.weight)).collect();
        assert!((EvaluatorAgent::overall(&scores) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn keyword_bumps_raise_scores() {
        let plain = EvaluatorAgent::score("innovation", "fix the page");
        let keyed = EvaluatorAgent::score("innovation", "try a bold, creative direction");
        assert!(keyed > plain);
    }

    #[test]
    fn scores_never_exceed_one() {
        let loaded = "a clear, specific, detailed plan with requirements and criteria to \
                      improve and implement innovative, bold design steps with data and \
                      research for business value and growth in the product interface for \
                      every user across many many many many many many many many many many \
                      many many many many many many many many words";
        for criterion in CRITERIA {
            let score = EvaluatorAgent::score(criterion.name, loaded);
            assert!((0.0..=1.0).contains(&score), "{} out of range", criterion.name);
        }
    }

    #[tokio::test]
    async fn confidence_equals_overall_score() {
        let agent = EvaluatorAgent::new();
        let tools = ToolRegistry::new();
        let report = agent
            .run("Evaluate this design proposal for clarity", &tools)
            .await
            .unwrap();

        assert!((0.0..=1.0).contains(&report.confidence));
        let stored = report.state_updates.get("evaluation_overall").unwrap();
        assert!((stored.as_f64().unwrap() as f32 - report.confidence).abs() < 1e-6);
    }

    #[tokio::test]
    async fn report_lists_all_criteria() {
        let agent = EvaluatorAgent::new();
        let tools = ToolRegistry::new();
        let report = agent.run("Assess the onboarding flow", &tools).await.unwrap();
        for criterion in CRITERIA {
            assert!(report.output.contains(criterion.name));
        }
        assert!(report.output.contains("Overall Score"));
    }

    #[tokio::test]
    async fn weak_innovation_gets_suggestion() {
        let agent = EvaluatorAgent::new();
        let tools = ToolRegistry::new();
        // No innovation keywords: innovation scores 0.6 < 0.7
        let report = agent.run("Check the form", &tools).await.unwrap();
        assert!(report.output.contains("Areas for improvement"));
        assert!(report.output.contains("novel directions"));
    }
}
