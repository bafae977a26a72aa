//! Design agent — critique, recommendations, and tool coordination.
//!
//! Distills the prompt into a [`Brief`], applies a fixed set of design
//! principles to generate recommendations, and folds in whichever analysis
//! tools are available. A failing tool is logged and skipped; it never
//! fails the agent run.

use async_trait::async_trait;
use std::fmt::Write as _;
use std::time::Instant;
use tracing::{info, warn};

use atelier_core::brief::{Brief, RequestKind};
use atelier_core::error::AgentError;
use atelier_core::report::{AgentReport, Priority, Recommendation, clamp_confidence};
use atelier_core::tool::ToolRegistry;
use atelier_core::Agent;

const BASE_CONFIDENCE: f32 = 0.8;
const FACET_BONUS: f32 = 0.05;
const CONFIDENCE_CAP: f32 = 0.95;

/// Tools this agent knows how to fold into its report, in order.
const PREFERRED_TOOLS: &[&str] = &["ux_audit", "trust_report"];

/// A design principle and the recommendation it produces when it applies.
struct Principle {
    name: &'static str,
    category: &'static str,
    title: &'static str,
    detail: &'static str,
    priority: Priority,
    confidence: f32,
}

const PRINCIPLES: &[Principle] = &[
    Principle {
        name: "User-centered design",
        category: "ux_improvement",
        title: "Implement User-Centered Design",
        detail: "Focus on user needs and behaviors throughout the design process",
        priority: Priority::High,
        confidence: 0.95,
    },
    Principle {
        name: "Accessibility first",
        category: "accessibility",
        title: "Ensure Accessibility Compliance",
        detail: "Implement WCAG guidelines and ensure inclusive design",
        priority: Priority::High,
        confidence: 0.9,
    },
    Principle {
        name: "Consistent visual hierarchy",
        category: "ui_improvement",
        title: "Establish Visual Hierarchy",
        detail: "Use typography, color, and spacing to create clear information hierarchy",
        priority: Priority::Medium,
        confidence: 0.85,
    },
    Principle {
        name: "Clear information architecture",
        category: "ux_improvement",
        title: "Optimize Information Architecture",
        detail: "Organize content and navigation for intuitive user flow",
        priority: Priority::High,
        confidence: 0.9,
    },
    Principle {
        name: "Responsive design patterns",
        category: "technical",
        title: "Implement Responsive Design",
        detail: "Ensure optimal experience across all device sizes",
        priority: Priority::Medium,
        confidence: 0.8,
    },
    Principle {
        name: "Performance optimization",
        category: "technical",
        title: "Optimize Performance",
        detail: "Ensure fast loading times and smooth interactions",
        priority: Priority::Medium,
        confidence: 0.8,
    },
    Principle {
        name: "Brand consistency",
        category: "brand",
        title: "Maintain Brand Consistency",
        detail: "Ensure design elements align with brand guidelines",
        priority: Priority::Medium,
        confidence: 0.85,
    },
];

/// Design critique and recommendation agent.
pub struct DesignAgent;

impl DesignAgent {
    pub fn new() -> Self {
        Self
    }

    fn principle_applies(principle: &Principle, brief: &Brief) -> bool {
        match principle.name {
            "User-centered design" => true,
            "Accessibility first" => brief.needs.iter().any(|n| n == "accessibility"),
            "Consistent visual hierarchy" => {
                matches!(brief.kind, RequestKind::Ui | RequestKind::General)
            }
            "Clear information architecture" => {
                matches!(brief.kind, RequestKind::Ux | RequestKind::General)
            }
            "Responsive design patterns" => brief.needs.iter().any(|n| n == "mobile_friendly"),
            "Performance optimization" => brief.needs.iter().any(|n| n == "performance"),
            "Brand consistency" => brief.kind == RequestKind::Brand,
            _ => false,
        }
    }

    fn recommendations(brief: &Brief) -> Vec<Recommendation> {
        let mut recs: Vec<Recommendation> = PRINCIPLES
            .iter()
            .filter(|p| Self::principle_applies(p, brief))
            .map(|p| Recommendation {
                title: p.title.to_string(),
                category: p.category.to_string(),
                priority: p.priority,
                detail: p.detail.to_string(),
                confidence: p.confidence,
            })
            .collect();

        // Kind-specific additions on top of the principle-driven set
        match brief.kind {
            RequestKind::Ui => recs.push(Recommendation {
                title: "Enhance Visual Hierarchy".into(),
                category: "ui_improvement".into(),
                priority: Priority::High,
                detail: "Implement clear visual hierarchy to improve user navigation".into(),
                confidence: 0.9,
            }),
            RequestKind::Ux => recs.push(Recommendation {
                title: "Optimize User Flow".into(),
                category: "ux_improvement".into(),
                priority: Priority::High,
                detail: "Streamline user journey to reduce friction points".into(),
                confidence: 0.85,
            }),
            RequestKind::Brand | RequestKind::General => {}
        }

        recs
    }

    fn confidence(brief: &Brief, recommendations: &[Recommendation]) -> f32 {
        let mut confidence = BASE_CONFIDENCE + FACET_BONUS * brief.facet_count() as f32;

        if !recommendations.is_empty() {
            let mean: f32 = recommendations.iter().map(|r| r.confidence).sum::<f32>()
                / recommendations.len() as f32;
            confidence = (confidence + mean) / 2.0;
        }

        clamp_confidence(confidence.min(CONFIDENCE_CAP))
    }

    fn render(input: &str, brief: &Brief, recommendations: &[Recommendation]) -> String {
        let mut output = String::from("# Design Analysis & Recommendations\n\n");
        let _ = writeln!(output, "## Original Request\n{input}\n");

        let _ = writeln!(output, "## Brief");
        let _ = writeln!(output, "- Request kind: {}", brief.kind.as_str());
        let _ = writeln!(output, "- Audience: {}", brief.audience.as_str());
        if !brief.elements.is_empty() {
            let _ = writeln!(output, "- Elements: {}", brief.elements.join(", "));
        }
        if !brief.needs.is_empty() {
            let _ = writeln!(output, "- Needs: {}", brief.needs.join(", "));
        }
        if !brief.constraints.is_empty() {
            let _ = writeln!(output, "- Constraints: {}", brief.constraints.join(", "));
        }
        output.push('\n');

        output.push_str("## Key Recommendations\n\n");
        for (i, rec) in recommendations.iter().enumerate() {
            let _ = writeln!(output, "### {}. {}", i + 1, rec.title);
            let _ = writeln!(output, "**Category:** {}", rec.category);
            let _ = writeln!(output, "**Priority:** {}", rec.priority.as_str());
            let _ = writeln!(output, "**Detail:** {}", rec.detail);
            let _ = writeln!(output, "**Confidence:** {:.2}\n", rec.confidence);
        }

        output.push_str("## Implementation Notes\n\n");
        output.push_str("- Apply design principles systematically\n");
        output.push_str("- Test with the target audience\n");
        output.push_str("- Iterate based on feedback\n");
        output.push_str("- Monitor performance metrics\n");

        output
    }
}

impl Default for DesignAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for DesignAgent {
    fn name(&self) -> &str {
        "design"
    }

    fn description(&self) -> &str {
        "Design critique and recommendations, with UX audit and trust analysis tools"
    }

    async fn run(&self, input: &str, tools: &ToolRegistry) -> Result<AgentReport, AgentError> {
        let started = Instant::now();
        info!("Design agent starting analysis");

        let brief = Brief::from_prompt(input);
        let recommendations = Self::recommendations(&brief);
        let mut output = Self::render(input, &brief, &recommendations);

        // Fold in available tools; a failing tool degrades, never aborts.
        let mut tools_used = Vec::new();
        for tool_name in PREFERRED_TOOLS {
            if tools.get(tool_name).is_none() {
                continue;
            }
            match tools.run(tool_name, &brief).await {
                Ok(section) => {
                    output.push('\n');
                    output.push_str(&section.output);
                    tools_used.push((*tool_name).to_string());
                    info!(tool = %tool_name, "Applied analysis tool");
                }
                Err(e) => {
                    warn!(tool = %tool_name, error = %e, "Analysis tool failed, skipping");
                }
            }
        }

        let confidence = Self::confidence(&brief, &recommendations);

        let mut report = AgentReport::new("design", output, confidence);
        report.recommendations = recommendations;
        report.tools_used = tools_used;
        report.duration_ms = started.elapsed().as_millis() as u64;
        report.state_updates.insert(
            "design_request_kind".into(),
            serde_json::json!(brief.kind.as_str()),
        );
        report.state_updates.insert(
            "design_principles_applied".into(),
            serde_json::json!(
                PRINCIPLES
                    .iter()
                    .filter(|p| Self::principle_applies(p, &brief))
                    .map(|p| p.name)
                    .collect::<Vec<_>>()
            ),
        );

        info!(
            confidence = report.confidence,
            recommendations = report.recommendations.len(),
            "Design agent completed"
        );
        Ok(report)
    }
}
