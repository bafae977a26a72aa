//! AnalysisTool trait — secondary analyzers invoked by agents.
//!
//! A tool has the same shape as an agent but consumes the dispatching
//! agent's [`Brief`] instead of raw text, and its report is folded into the
//! agent's output as an extra section.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::brief::Brief;
use crate::error::ToolError;
use crate::report::clamp_confidence;

/// The result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolReport {
    /// Name of the tool that produced this report
    pub tool: String,

    /// The rendered section text
    pub output: String,

    /// Heuristic confidence in [0, 1]
    pub confidence: f32,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl ToolReport {
    pub fn new(tool: impl Into<String>, output: impl Into<String>, confidence: f32) -> Self {
        Self {
            tool: tool.into(),
            output: output.into(),
            confidence: clamp_confidence(confidence),
            duration_ms: 0,
        }
    }
}

/// The core AnalysisTool trait.
///
/// Each tool (ux_audit, trust_report, …) implements this trait. Tools are
/// registered in the ToolRegistry and offered to agents at run time; a
/// failing tool is skipped, never fatal to the agent (callers degrade).
#[async_trait]
pub trait AnalysisTool: Send + Sync {
    /// The unique name of this tool (e.g., "ux_audit").
    fn name(&self) -> &str;

    /// A one-line description of what this tool reports on.
    fn description(&self) -> &str;

    /// Run the tool against an agent's brief.
    async fn run(&self, brief: &Brief) -> std::result::Result<ToolReport, ToolError>;
}

/// A registry of available tools.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn AnalysisTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn AnalysisTool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn AnalysisTool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Run a tool by name against a brief.
    pub async fn run(&self, name: &str, brief: &Brief) -> std::result::Result<ToolReport, ToolError> {
        let tool = self.tools.get(name).ok_or_else(|| ToolError::NotFound(name.into()))?;
        tool.run(brief).await
    }

    /// List all registered tool names, sorted for stable output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A trivial test tool.
    struct EchoTool;

    #[async_trait]
    impl AnalysisTool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes the brief's prompt back"
        }
        async fn run(&self, brief: &Brief) -> std::result::Result<ToolReport, ToolError> {
            Ok(ToolReport::new("echo", brief.prompt.clone(), 0.9))
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
        assert_eq!(registry.names(), vec!["echo"]);
    }

    #[tokio::test]
    async fn registry_run_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let brief = Brief::from_prompt("hello world");
        let report = registry.run("echo", &brief).await.unwrap();
        assert_eq!(report.output, "hello world");
        assert_eq!(report.tool, "echo");
    }

    #[tokio::test]
    async fn registry_run_missing_tool() {
        let registry = ToolRegistry::new();
        let brief = Brief::default();
        let err = registry.run("nonexistent", &brief).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn tool_report_clamps_confidence() {
        let report = ToolReport::new("echo", "out", -1.0);
        assert_eq!(report.confidence, 0.0);
    }
}
