//! Agent trait — named handlers that map free text to a heuristic report.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::AgentError;
use crate::report::AgentReport;
use crate::tool::ToolRegistry;

/// The core Agent trait.
///
/// Each agent (design, evaluator, creative, prompt) implements this trait.
/// Agents are registered in the AgentRegistry; the orchestrator dispatches
/// commands to them by name. The tool registry passed to `run` holds
/// whatever tools the configuration enabled — an agent decides for itself
/// which of them apply.
#[async_trait]
pub trait Agent: Send + Sync {
    /// The unique name of this agent (e.g., "design").
    fn name(&self) -> &str;

    /// A one-line description shown in usage output.
    fn description(&self) -> &str;

    /// Analyze the input and produce a report.
    async fn run(
        &self,
        input: &str,
        tools: &ToolRegistry,
    ) -> std::result::Result<AgentReport, AgentError>;
}

/// A registry of available agents.
///
/// Registration order is preserved: it defines the pipeline execution
/// sequence.
pub struct AgentRegistry {
    agents: HashMap<String, Box<dyn Agent>>,
    order: Vec<String>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register an agent. Replaces any existing agent with the same name
    /// without changing its position in the pipeline order.
    pub fn register(&mut self, agent: Box<dyn Agent>) {
        let name = agent.name().to_string();
        if !self.agents.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.agents.insert(name, agent);
    }

    /// Get an agent by name.
    pub fn get(&self, name: &str) -> Option<&dyn Agent> {
        self.agents.get(name).map(|a| a.as_ref())
    }

    /// Agent names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Owned agent names, for error messages.
    pub fn names_owned(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
