//! Creative agent — tone, audience, and narrative direction.
//!
//! Detects a tone and an audience persona from fixed keyword tables,
//! derives a creative strategy, and sketches a three-beat story arc. The
//! detected tone and audience are contributed to shared state for later
//! pipeline steps.

use async_trait::async_trait;
use std::fmt::Write as _;
use std::time::Instant;
use tracing::info;

use atelier_core::Agent;
use atelier_core::brief::{Brief, contains_any};
use atelier_core::error::AgentError;
use atelier_core::report::{AgentReport, clamp_confidence};
use atelier_core::tool::ToolRegistry;

const BASE_CONFIDENCE: f32 = 0.75;
const DETECTION_BONUS: f32 = 0.05;
const CONFIDENCE_CAP: f32 = 0.9;

const CREATIVE_PRINCIPLES: &[&str] = &[
    "emotional_resonance",
    "visual_hierarchy",
    "narrative_flow",
    "audience_empathy",
    "brand_consistency",
    "innovation_spark",
    "cultural_relevance",
];

/// Tone table: name, detection keywords, qualities, story-arc hook.
const TONES: &[(&str, &[&str], &[&str], &str)] = &[
    (
        "cinematic",
        &["cinematic", "story", "dramatic", "film"],
        &["dramatic", "immersive", "storytelling", "visual_impact"],
        "Open on the user's moment of need, full frame",
    ),
    (
        "professional",
        &["professional", "corporate", "enterprise", "business"],
        &["trustworthy", "competent", "reliable", "authoritative"],
        "Lead with the outcome and the proof behind it",
    ),
    (
        "friendly",
        &["friendly", "warm", "approachable", "welcoming"],
        &["approachable", "warm", "helpful", "conversational"],
        "Greet the user like a regular, not a visitor",
    ),
    (
        "innovative",
        &["innovative", "cutting", "bold", "futuristic"],
        &["cutting_edge", "creative", "bold", "forward_thinking"],
        "Start where the familiar pattern breaks",
    ),
    (
        "luxury",
        &["luxury", "premium", "exclusive", "refined"],
        &["premium", "exclusive", "sophisticated", "refined"],
        "Let restraint and detail carry the first impression",
    ),
];

/// Audience persona table: name, detection keywords, traits.
const PERSONAS: &[(&str, &[&str], &[&str])] = &[
    (
        "executive",
        &["executive", "leadership", "board", "stakeholder"],
        &["decision_maker", "time_constrained", "results_focused"],
    ),
    (
        "creative",
        &["creative", "designer", "artist", "studio"],
        &["visual_thinking", "inspiration_seeking", "aesthetic_appreciation"],
    ),
    (
        "technical",
        &["developer", "engineer", "technical", "api"],
        &["detail_oriented", "logic_driven", "efficiency_focused"],
    ),
    (
        "consumer",
        &["consumer", "customer", "shopper", "everyday"],
        &["user_experience", "emotional_connection", "practical_value"],
    ),
];

/// Tone, audience, and narrative direction agent.
pub struct CreativeAgent;

impl CreativeAgent {
    pub fn new() -> Self {
        Self
    }

    /// Detected tone, or None when no tone keyword appears.
    fn detect_tone(lower: &str) -> Option<&'static (&'static str, &'static [&'static str], &'static [&'static str], &'static str)> {
        TONES.iter().find(|(_, keywords, _, _)| contains_any(lower, keywords))
    }

    /// Detected persona, or None when no persona keyword appears.
    fn detect_persona(lower: &str) -> Option<&'static (&'static str, &'static [&'static str], &'static [&'static str])> {
        PERSONAS.iter().find(|(_, keywords, _)| contains_any(lower, keywords))
    }
}

impl Default for CreativeAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for CreativeAgent {
    fn name(&self) -> &str {
        "creative"
    }

    fn description(&self) -> &str {
        "Tone, audience targeting, and narrative direction"
    }

    async fn run(&self, input: &str, _tools: &ToolRegistry) -> Result<AgentReport, AgentError> {
        let started = Instant::now();
        info!("Creative agent starting analysis");

        let lower = input.to_lowercase();
        let brief = Brief::from_prompt(input);

        let tone = Self::detect_tone(&lower);
        let persona = Self::detect_persona(&lower);

        // Defaults when nothing matches: a professional tone for a consumer
        let (tone_name, qualities, hook) = tone
            .map(|(name, _, qualities, hook)| (*name, *qualities, *hook))
            .unwrap_or(("professional", TONES[1].2, TONES[1].3));
        let (persona_name, traits) = persona
            .map(|(name, _, traits)| (*name, *traits))
            .unwrap_or(("consumer", PERSONAS[3].2));

        let mut output = String::from("# Creative Direction\n\n");
        let _ = writeln!(output, "## Original Request\n{input}\n");
        let _ = writeln!(output, "## Tone: {tone_name}");
        let _ = writeln!(output, "Qualities to hit: {}\n", qualities.join(", "));
        let _ = writeln!(output, "## Audience: {persona_name}");
        let _ = writeln!(output, "Traits to design for: {}\n", traits.join(", "));

        output.push_str("## Creative Strategy\n\n");
        for principle in CREATIVE_PRINCIPLES {
            let _ = writeln!(output, "- {principle}");
        }

        output.push_str("\n## Story Arc\n\n");
        let _ = writeln!(output, "- **Hook:** {hook}");
        let _ = writeln!(
            output,
            "- **Development:** Build the {tone_name} register through {} moments",
            qualities.first().unwrap_or(&"key")
        );
        output.push_str("- **Resolution:** Land on a clear next action for the audience\n");

        let mut confidence = BASE_CONFIDENCE;
        if tone.is_some() {
            confidence += DETECTION_BONUS;
        }
        if persona.is_some() {
            confidence += DETECTION_BONUS;
        }
        if !brief.elements.is_empty() {
            confidence += DETECTION_BONUS;
        }
        let confidence = clamp_confidence(confidence.min(CONFIDENCE_CAP));

        let mut report = AgentReport::new("creative", output, confidence);
        report.duration_ms = started.elapsed().as_millis() as u64;
        report
            .state_updates
            .insert("tone_detected".into(), serde_json::json!(tone_name));
        report
            .state_updates
            .insert("target_audience".into(), serde_json::json!(persona_name));

        info!(tone = tone_name, audience = persona_name, "Creative agent completed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn detects_cinematic_tone() {
        let agent = CreativeAgent::new();
        let tools = ToolRegistry::new();
        let report = agent
            .run("Tell a dramatic story with the landing page", &tools)
            .await
            .unwrap();
        assert!(report.output.contains("Tone: cinematic"));
        assert_eq!(
            report.state_updates.get("tone_detected"),
            Some(&serde_json::json!("cinematic"))
        );
    }

    #[tokio::test]
    async fn detects_technical_persona() {
        let agent = CreativeAgent::new();
        let tools = ToolRegistry::new();
        let report = agent
            .run("Documentation portal for developer onboarding", &tools)
            .await
            .unwrap();
        assert!(report.output.contains("Audience: technical"));
    }

    #[tokio::test]
    async fn defaults_when_nothing_matches() {
        let agent = CreativeAgent::new();
        let tools = ToolRegistry::new();
        let report = agent.run("hello there", &tools).await.unwrap();
        assert!(report.output.contains("Tone: professional"));
        assert!(report.output.contains("Audience: consumer"));
        assert!((report.confidence - BASE_CONFIDENCE).abs() < 1e-6);
    }

    #[tokio::test]
    async fn detection_raises_confidence() {
        let agent = CreativeAgent::new();
        let tools = ToolRegistry::new();

        let plain = agent.run("hello there", &tools).await.unwrap();
        let detected = agent
            .run("A premium, exclusive layout for executive customers", &tools)
            .await
            .unwrap();
        assert!(detected.confidence > plain.confidence);
        assert!(detected.confidence <= CONFIDENCE_CAP);
    }

    #[tokio::test]
    async fn story_arc_present() {
        let agent = CreativeAgent::new();
        let tools = ToolRegistry::new();
        let report = agent.run("warm welcome flow", &tools).await.unwrap();
        assert!(report.output.contains("Story Arc"));
        assert!(report.output.contains("Hook"));
    }
}
