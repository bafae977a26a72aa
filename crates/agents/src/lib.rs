//! Built-in agents for Atelier.
//!
//! Four named handlers, each mapping free text to a heuristic report:
//!
//! - `design` — design critique and recommendations, applies analysis tools
//! - `evaluator` — weighted-criteria scoring of the input
//! - `creative` — tone, audience, and narrative direction
//! - `prompt` — prompt safety and clarity screening
//!
//! Their keyword checks and score constants are deliberate placeholders:
//! they exercise the runtime's plumbing, they do not understand text.

pub mod creative;
pub mod design;
pub mod evaluator;
pub mod prompt;

pub use creative::CreativeAgent;
pub use design::DesignAgent;
pub use evaluator::EvaluatorAgent;
pub use prompt::PromptAgent;

use atelier_core::{Agent, AgentRegistry};

/// Construct a built-in agent by name.
pub fn builtin(name: &str) -> Option<Box<dyn Agent>> {
    match name {
        "design" => Some(Box::new(DesignAgent::new())),
        "evaluator" => Some(Box::new(EvaluatorAgent::new())),
        "creative" => Some(Box::new(CreativeAgent::new())),
        "prompt" => Some(Box::new(PromptAgent::new())),
        _ => None,
    }
}

/// All built-in agent names, in default pipeline order.
pub const BUILTIN_NAMES: &[&str] = &["design", "evaluator", "creative", "prompt"];

/// A registry holding the requested agents, in the given order.
/// Unknown names are skipped with a warning.
pub fn registry_for(enabled: &[String]) -> AgentRegistry {
    let mut registry = AgentRegistry::new();
    for name in enabled {
        match builtin(name) {
            Some(agent) => registry.register(agent),
            None => tracing::warn!(agent = %name, "Unknown agent in enabled_agents, skipping"),
        }
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup() {
        for name in BUILTIN_NAMES {
            assert!(builtin(name).is_some(), "missing builtin {name}");
        }
        assert!(builtin("bogus").is_none());
    }

    #[test]
    fn registry_for_preserves_order_and_skips_unknown() {
        let enabled = vec![
            "evaluator".to_string(),
            "design".to_string(),
            "ghost".to_string(),
        ];
        let registry = registry_for(&enabled);
        assert_eq!(registry.names(), vec!["evaluator", "design"]);
    }
}
