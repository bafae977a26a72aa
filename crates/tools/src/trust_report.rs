//! Trust report tool — trust-building analysis over a design brief.
//!
//! Walks fixed tables of trust elements and trust indicators, rates each
//! against the brief, and renders an enhancement plan. Like the audit tool,
//! the scores are placeholder constants, not a model.

use async_trait::async_trait;
use std::fmt::Write as _;
use tracing::debug;

use atelier_core::brief::{Audience, Brief};
use atelier_core::error::ToolError;
use atelier_core::tool::{AnalysisTool, ToolReport};

const BASE_SCORE: f32 = 0.7;
const EMPHASIS_BONUS: f32 = 0.15;

const TRUST_ELEMENTS: &[(&str, &[&str])] = &[
    ("transparency", &["clear_pricing", "data_usage", "privacy_policy", "terms_of_service"]),
    ("security", &["encryption", "secure_payment", "data_protection", "compliance"]),
    ("social_proof", &["reviews", "testimonials", "user_count", "expert_endorsements"]),
    ("reliability", &["uptime", "performance", "support_quality", "update_frequency"]),
    ("expertise", &["credentials", "experience", "certifications", "industry_recognition"]),
];

const TRUST_INDICATORS: &[(&str, &[&str])] = &[
    ("visual", &["professional_design", "brand_consistency", "quality_icons", "modern_ui"]),
    ("content", &["clear_messaging", "helpful_information", "transparent_processes"]),
    ("interaction", &["responsive_feedback", "error_handling", "loading_states", "progress_indicators"]),
    ("social", &["user_reviews", "social_media", "community_features", "expert_opinions"]),
];

/// Trust-building analysis over a design brief.
pub struct TrustReportTool;

impl TrustReportTool {
    pub fn new() -> Self {
        Self
    }

    /// Which trust element categories the brief emphasizes.
    fn emphasized(brief: &Brief) -> Vec<&'static str> {
        let prompt = brief.prompt.to_lowercase();
        let mut emphasized = Vec::new();

        if prompt.contains("privacy") || prompt.contains("transparent") || prompt.contains("pricing")
        {
            emphasized.push("transparency");
        }
        if prompt.contains("secur") || prompt.contains("payment") || brief.audience == Audience::Business
        {
            emphasized.push("security");
        }
        if brief.audience == Audience::Consumer || prompt.contains("review") {
            emphasized.push("social_proof");
        }
        if brief.needs.iter().any(|n| n == "performance") {
            emphasized.push("reliability");
        }
        if brief.audience == Audience::Technical {
            emphasized.push("expertise");
        }

        emphasized
    }

    fn element_score(category: &str, emphasized: &[&str]) -> f32 {
        let bonus = if emphasized.contains(&category) { EMPHASIS_BONUS } else { 0.0 };
        (BASE_SCORE + bonus).min(1.0)
    }
}

impl Default for TrustReportTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisTool for TrustReportTool {
    fn name(&self) -> &str {
        "trust_report"
    }

    fn description(&self) -> &str {
        "Trust-element analysis and enhancement plan over a design brief"
    }

    async fn run(&self, brief: &Brief) -> Result<ToolReport, ToolError> {
        let emphasized = Self::emphasized(brief);
        debug!(emphasized = emphasized.len(), "Trust analysis starting");

        let mut output = String::from("### Trust Analysis\n\n");
        let _ = writeln!(
            output,
            "**Emphasized categories:** {}\n",
            if emphasized.is_empty() { "none".to_string() } else { emphasized.join(", ") }
        );

        output.push_str("**Trust elements:**\n\n");
        let mut total = 0.0f32;
        for (category, items) in TRUST_ELEMENTS {
            let score = Self::element_score(category, &emphasized);
            total += score;
            let _ = writeln!(output, "- {category} — score {score:.2} ({})", items.join(", "));
        }

        output.push_str("\n**Trust indicators to surface:**\n\n");
        for (kind, items) in TRUST_INDICATORS {
            let _ = writeln!(output, "- {kind}: {}", items.join(", "));
        }

        output.push_str("\n**Enhancement plan:**\n\n");
        if emphasized.is_empty() {
            output.push_str("- Establish baseline trust signals across all categories\n");
        } else {
            for category in &emphasized {
                let _ = writeln!(
                    output,
                    "- Prioritize {category} signals in the first design iteration"
                );
            }
        }

        let confidence = total / TRUST_ELEMENTS.len() as f32;
        Ok(ToolReport::new("trust_report", output, confidence))
    }
}
