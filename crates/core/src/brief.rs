//! Brief — the structured reading of a free-text prompt.
//!
//! Agents distill the incoming prompt into a `Brief` through fixed keyword
//! containment checks, then hand it to analysis tools. The keyword lists are
//! deliberate placeholders: they classify, they do not understand.

use serde::{Deserialize, Serialize};

/// What kind of request the prompt describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Interface / visual work
    Ui,
    /// Experience / flow work
    Ux,
    /// Brand / identity work
    Brand,
    /// Anything else
    #[default]
    General,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Ui => "ui",
            RequestKind::Ux => "ux",
            RequestKind::Brand => "brand",
            RequestKind::General => "general",
        }
    }
}

/// Who the work is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Business,
    Consumer,
    Technical,
    #[default]
    General,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Business => "business",
            Audience::Consumer => "consumer",
            Audience::Technical => "technical",
            Audience::General => "general",
        }
    }
}

/// Structured prompt analysis shared between agents and tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Brief {
    /// The raw prompt this brief was distilled from
    pub prompt: String,

    /// Request classification
    pub kind: RequestKind,

    /// Design elements mentioned (color, typography, layout, …)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<String>,

    /// User needs surfaced by the prompt (accessibility, performance, …)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub needs: Vec<String>,

    /// Constraints surfaced by the prompt (budget, deadline, legacy, …)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,

    /// Target audience
    pub audience: Audience,
}

const ELEMENT_KEYWORDS: &[(&str, &[&str])] = &[
    ("color", &["color", "palette", "hue", "theme"]),
    ("typography", &["font", "text", "typography", "typeface"]),
    ("layout", &["layout", "grid", "spacing", "alignment"]),
    ("interaction", &["button", "click", "hover", "animation"]),
    ("navigation", &["menu", "nav", "breadcrumb", "sidebar"]),
];

impl Brief {
    /// Distill a prompt into a brief via keyword containment.
    pub fn from_prompt(prompt: &str) -> Self {
        let lower = prompt.to_lowercase();

        let kind = if contains_any(&lower, &["ui", "interface", "visual"]) {
            RequestKind::Ui
        } else if contains_any(&lower, &["ux", "user experience", "flow"]) {
            RequestKind::Ux
        } else if contains_any(&lower, &["brand", "identity", "logo"]) {
            RequestKind::Brand
        } else {
            RequestKind::General
        };

        let elements = ELEMENT_KEYWORDS
            .iter()
            .filter(|(_, keywords)| contains_any(&lower, keywords))
            .map(|(element, _)| (*element).to_string())
            .collect();

        let mut needs = Vec::new();
        if contains_any(&lower, &["accessibility", "accessible"]) {
            needs.push("accessibility".to_string());
        }
        if contains_any(&lower, &["mobile", "responsive"]) {
            needs.push("mobile_friendly".to_string());
        }
        if contains_any(&lower, &["fast", "performance"]) {
            needs.push("performance".to_string());
        }
        if contains_any(&lower, &["simple", "easy"]) {
            needs.push("simplicity".to_string());
        }

        let mut constraints = Vec::new();
        if contains_any(&lower, &["budget", "cost"]) {
            constraints.push("budget_limited".to_string());
        }
        if contains_any(&lower, &["time", "deadline"]) {
            constraints.push("time_constrained".to_string());
        }
        if contains_any(&lower, &["existing", "legacy"]) {
            constraints.push("existing_system".to_string());
        }

        let audience = if contains_any(&lower, &["business", "enterprise"]) {
            Audience::Business
        } else if contains_any(&lower, &["consumer", "personal"]) {
            Audience::Consumer
        } else if contains_any(&lower, &["developer", "technical"]) {
            Audience::Technical
        } else {
            Audience::General
        };

        Self {
            prompt: prompt.to_string(),
            kind,
            elements,
            needs,
            constraints,
            audience,
        }
    }

    /// Number of populated analysis facets (used by confidence heuristics).
    pub fn facet_count(&self) -> usize {
        [
            !self.elements.is_empty(),
            !self.needs.is_empty(),
            !self.constraints.is_empty(),
        ]
        .iter()
        .filter(|populated| **populated)
        .count()
    }
}

/// True if `haystack` contains any of the given keywords.
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}
