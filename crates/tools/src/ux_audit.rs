//! UX audit tool — heuristic evaluation and metrics analysis.
//!
//! Scores ten usability heuristics and four metric families against the
//! brief. Scores are fixed-constant placeholders: a base of 0.7 with a bump
//! when the heuristic is relevant to the brief's focus areas. Heuristics
//! rated high priority get their improvement notes included in the report.

use async_trait::async_trait;
use std::fmt::Write as _;
use tracing::debug;

use atelier_core::brief::{Audience, Brief, RequestKind};
use atelier_core::error::ToolError;
use atelier_core::tool::{AnalysisTool, ToolReport};

const BASE_SCORE: f32 = 0.7;
const RELEVANCE_BONUS: f32 = 0.1;

/// One usability heuristic and the focus areas that raise its priority.
struct Heuristic {
    name: &'static str,
    focus_areas: &'static [&'static str],
    improvement_notes: &'static [&'static str],
}

const HEURISTICS: &[Heuristic] = &[
    Heuristic {
        name: "Visibility of system status",
        focus_areas: &["interaction_design", "user_journey"],
        improvement_notes: &[
            "Implement clear loading states and progress indicators",
            "Provide immediate feedback for user actions",
        ],
    },
    Heuristic {
        name: "Match between system and real world",
        focus_areas: &["user_research", "information_architecture"],
        improvement_notes: &[
            "Use familiar language and concepts from the user's domain",
            "Follow established conventions and patterns",
        ],
    },
    Heuristic {
        name: "User control and freedom",
        focus_areas: &["interaction_design", "user_journey"],
        improvement_notes: &[
            "Provide clear exit options and undo functionality",
            "Allow users to easily navigate back and forth",
        ],
    },
    Heuristic {
        name: "Consistency and standards",
        focus_areas: &["visual_design", "interaction_design"],
        improvement_notes: &[
            "Maintain consistent design patterns throughout the interface",
            "Follow platform-specific design guidelines",
        ],
    },
    Heuristic {
        name: "Error prevention",
        focus_areas: &["usability_testing", "user_journey"],
        improvement_notes: &[
            "Implement validation and confirmation for critical actions",
            "Design interfaces that prevent common user errors",
        ],
    },
    Heuristic {
        name: "Recognition rather than recall",
        focus_areas: &["information_architecture", "interaction_design"],
        improvement_notes: &[
            "Make options and actions visible rather than hidden",
            "Provide clear navigation and search functionality",
        ],
    },
    Heuristic {
        name: "Flexibility and efficiency of use",
        focus_areas: &["user_research", "usability_testing"],
        improvement_notes: &[
            "Offer shortcuts and accelerators for expert users",
            "Allow customization of workflows",
        ],
    },
    Heuristic {
        name: "Aesthetic and minimalist design",
        focus_areas: &["visual_design"],
        improvement_notes: &[
            "Remove unnecessary elements and focus on essential content",
            "Use whitespace effectively to improve readability",
        ],
    },
    Heuristic {
        name: "Help users recover from errors",
        focus_areas: &["usability_testing", "user_journey"],
        improvement_notes: &[
            "Provide clear, actionable error messages",
            "Offer suggestions for error resolution",
        ],
    },
    Heuristic {
        name: "Help and documentation",
        focus_areas: &["user_research", "usability_testing"],
        improvement_notes: &[
            "Provide contextual help and tooltips",
            "Create comprehensive but accessible documentation",
        ],
    },
];

const METRIC_FAMILIES: &[(&str, &[&str])] = &[
    ("usability", &["ease_of_use", "learnability", "efficiency"]),
    ("accessibility", &["wcag_compliance", "screen_reader", "keyboard_navigation"]),
    ("performance", &["load_time", "response_time", "smoothness"]),
    ("engagement", &["user_retention", "time_on_site", "interaction_rate"]),
];

/// Usability audit over a design brief.
pub struct UxAuditTool;

impl UxAuditTool {
    pub fn new() -> Self {
        Self
    }

    /// Focus areas implied by the brief.
    fn focus_areas(brief: &Brief) -> Vec<&'static str> {
        let mut areas = Vec::new();

        match brief.kind {
            RequestKind::Ui => {
                areas.extend(["visual_design", "interaction_design", "information_architecture"]);
            }
            RequestKind::Ux => {
                areas.extend(["user_research", "user_journey", "usability_testing"]);
            }
            RequestKind::Brand | RequestKind::General => {}
        }

        if brief.needs.iter().any(|n| n == "accessibility") {
            areas.push("accessibility");
        }
        if brief.needs.iter().any(|n| n == "mobile_friendly") {
            areas.push("responsive_design");
        }
        if brief.needs.iter().any(|n| n == "performance") {
            areas.push("performance_optimization");
        }

        areas
    }

    /// Usability priorities by audience.
    fn priorities(brief: &Brief) -> Vec<&'static str> {
        let mut priorities = vec!["ease_of_use", "learnability"];
        match brief.audience {
            Audience::Technical => priorities.push("efficiency"),
            Audience::Business => priorities.push("productivity"),
            Audience::Consumer => priorities.push("engagement"),
            Audience::General => {}
        }
        priorities
    }

    fn metric_score(metric: &str, focus_areas: &[&str]) -> f32 {
        let bonus = match metric {
            "ease_of_use" if focus_areas.contains(&"usability_testing") => RELEVANCE_BONUS,
            "learnability" if focus_areas.contains(&"user_research") => RELEVANCE_BONUS,
            "wcag_compliance" | "screen_reader" | "keyboard_navigation"
                if focus_areas.contains(&"accessibility") =>
            {
                0.15
            }
            "load_time" | "response_time" | "smoothness"
                if focus_areas.contains(&"performance_optimization") =>
            {
                RELEVANCE_BONUS
            }
            _ => 0.0,
        };
        (BASE_SCORE + bonus).min(1.0)
    }
}

impl Default for UxAuditTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisTool for UxAuditTool {
    fn name(&self) -> &str {
        "ux_audit"
    }

    fn description(&self) -> &str {
        "Heuristic usability evaluation and metrics analysis over a design brief"
    }

    async fn run(&self, brief: &Brief) -> Result<ToolReport, ToolError> {
        let focus_areas = Self::focus_areas(brief);
        let priorities = Self::priorities(brief);
        debug!(focus_areas = focus_areas.len(), "UX audit starting");

        let mut output = String::from("### UX Audit\n\n");
        let _ = writeln!(
            output,
            "**Focus areas:** {}",
            if focus_areas.is_empty() { "general".to_string() } else { focus_areas.join(", ") }
        );
        let _ = writeln!(output, "**Usability priorities:** {}\n", priorities.join(", "));

        // Heuristic evaluation
        output.push_str("**Heuristic evaluation:**\n\n");
        let mut heuristic_total = 0.0f32;
        let mut notes: Vec<&str> = Vec::new();
        for heuristic in HEURISTICS {
            let relevant = heuristic.focus_areas.iter().any(|a| focus_areas.contains(a));
            let score = if relevant { (BASE_SCORE + RELEVANCE_BONUS).min(1.0) } else { BASE_SCORE };
            let priority = if relevant { "high" } else { "medium" };
            heuristic_total += score;
            let _ = writeln!(output, "- {} — score {score:.2}, priority {priority}", heuristic.name);
            if relevant {
                notes.extend(heuristic.improvement_notes);
            }
        }

        // Metrics analysis
        output.push_str("\n**Metrics analysis:**\n\n");
        let mut metric_total = 0.0f32;
        let mut metric_count = 0usize;
        for (family, metrics) in METRIC_FAMILIES {
            let scores: Vec<String> = metrics
                .iter()
                .map(|m| {
                    let score = Self::metric_score(m, &focus_areas);
                    metric_total += score;
                    metric_count += 1;
                    format!("{m} {score:.2}")
                })
                .collect();
            let _ = writeln!(output, "- {family}: {}", scores.join(", "));
        }

        if !notes.is_empty() {
            output.push_str("\n**Recommendations:**\n\n");
            for note in notes {
                let _ = writeln!(output, "- {note}");
            }
        }

        let heuristic_avg = heuristic_total / HEURISTICS.len() as f32;
        let metric_avg = metric_total / metric_count as f32;
        let confidence = (heuristic_avg + metric_avg) / 2.0;

        Ok(ToolReport::new("ux_audit", output, confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ui_brief_gets_visual_focus() {
        let brief = Brief::from_prompt("Redesign the settings interface layout");
        let report = UxAuditTool::new().run(&brief).await.unwrap();
        assert!(report.output.contains("visual_design"));
        assert!(report.output.contains("Heuristic evaluation"));
        assert!(report.confidence > 0.0 && report.confidence <= 1.0);
    }

    #[tokio::test]
    async fn accessibility_need_raises_focus() {
        let brief = Brief::from_prompt("Make the signup flow accessible");
        let report = UxAuditTool::new().run(&brief).await.unwrap();
        assert!(report.output.contains("accessibility"));
    }

    #[tokio::test]
    async fn general_brief_still_reports() {
        let brief = Brief::from_prompt("something vague");
        let report = UxAuditTool::new().run(&brief).await.unwrap();
        assert!(report.output.contains("Focus areas:** general"));
        // All heuristics at base score, no relevance notes
        assert!(!report.output.contains("Recommendations"));
    }

    #[tokio::test]
    async fn relevant_heuristics_rank_high() {
        let brief = Brief::from_prompt("Audit the checkout user experience flow");
        let report = UxAuditTool::new().run(&brief).await.unwrap();
        assert!(report.output.contains("priority high"));
        assert!(report.output.contains("Recommendations"));
    }

    #[test]
    fn audience_sets_priorities() {
        let brief = Brief::from_prompt("Dashboard for enterprise teams");
        assert!(UxAuditTool::priorities(&brief).contains(&"productivity"));

        let brief = Brief::from_prompt("App for personal use");
        assert!(UxAuditTool::priorities(&brief).contains(&"engagement"));
    }

    #[test]
    fn metric_scores_are_bounded() {
        let focus = vec!["accessibility", "performance_optimization"];
        for (_, metrics) in METRIC_FAMILIES {
            for metric in *metrics {
                let score = UxAuditTool::metric_score(metric, &focus);
                assert!((0.0..=1.0).contains(&score));
            }
        }
    }
}
