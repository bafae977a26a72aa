//! Execution orchestrator — dispatch, pipeline, and pattern fallback.
//!
//! The orchestrator owns the agent registry, the tool registry, the pattern
//! registry, and a handle to the context store. Execution is strictly
//! sequential: one command per process, each step completes before the next
//! begins. Pattern counters are mutated only through the registry's single
//! mutation path, which the orchestrator invokes from exactly one place.

use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use atelier_agents::registry_for;
use atelier_config::AppConfig;
use atelier_core::error::AgentError;
use atelier_core::{AgentRegistry, AgentReport, Error, InteractionRecord, ToolRegistry};
use atelier_memory::{ContextStats, ContextStore};
use atelier_patterns::{PatternRegistry, PatternStats};
use atelier_tools::default_registry;

/// Outcome of one pipeline step.
#[derive(Debug)]
pub struct PipelineStep {
    pub agent: String,
    pub report: AgentReport,
}

/// Result of a full pipeline run.
///
/// A failing step halts the pipeline; the partial result carries the error
/// instead of discarding the completed steps.
#[derive(Debug)]
pub struct PipelineResult {
    pub steps: Vec<PipelineStep>,
    pub final_output: String,
    pub total_duration_ms: u64,
    pub error: Option<String>,
}

/// Result of a pattern-routed run.
#[derive(Debug)]
pub struct PatternOutcome {
    /// The pattern that produced the winning report
    pub pattern: String,
    pub report: AgentReport,
    /// True when a fallback pattern beat the routed one
    pub fell_back: bool,
}

/// Registered names plus context statistics, for `status` output.
#[derive(Debug)]
pub struct OrchestratorStats {
    pub agents: Vec<String>,
    pub tools: Vec<String>,
    pub patterns: Vec<PatternStats>,
    pub context: ContextStats,
}

/// The execution engine: owns the registries, records every interaction.
pub struct Orchestrator {
    agents: AgentRegistry,
    tools: ToolRegistry,
    /// Empty registry handed to agents when tools are disabled
    no_tools: ToolRegistry,
    patterns: PatternRegistry,
    context: Arc<ContextStore>,
    tools_enabled: bool,
    pattern_fallback: bool,
    max_prompt_tokens: u32,
}

impl Orchestrator {
    /// Wire up the orchestrator from configuration: enabled agents in
    /// pipeline order, built-in tools when enabled, built-in patterns.
    pub fn from_config(config: &AppConfig, context: Arc<ContextStore>) -> Self {
        let agents = registry_for(&config.enabled_agents);
        let tools = if config.tools_enabled { default_registry() } else { ToolRegistry::new() };

        info!(
            agents = agents.len(),
            tools = tools.len(),
            tools_enabled = config.tools_enabled,
            pattern_fallback = config.pattern_fallback,
            "Orchestrator initialized"
        );

        Self {
            agents,
            tools,
            no_tools: ToolRegistry::new(),
            patterns: PatternRegistry::with_builtins(),
            context,
            tools_enabled: config.tools_enabled,
            pattern_fallback: config.pattern_fallback,
            max_prompt_tokens: config.max_prompt_tokens,
        }
    }

    pub fn context(&self) -> &Arc<ContextStore> {
        &self.context
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    pub fn agent_names(&self) -> Vec<String> {
        self.agents.names_owned()
    }

    /// Restore pattern counters from the context store's pattern-memory
    /// mirror (populated by a memory import).
    pub async fn restore_pattern_memory(&mut self) {
        let snapshot = self.context.pattern_memory().await;
        if !snapshot.is_empty() {
            self.patterns.load_snapshot(&snapshot);
        }
    }

    /// Mirror the current pattern counters into the context store so they
    /// land in the next memory export.
    pub async fn sync_pattern_memory(&self) {
        for (name, value) in self.patterns.snapshot() {
            self.context.set_pattern_memory(name, value).await;
        }
    }

    fn validate_input(&self, input: &str) -> Result<(), AgentError> {
        if input.trim().is_empty() {
            return Err(AgentError::EmptyInput);
        }
        let tokens = input.split_whitespace().count();
        if tokens > self.max_prompt_tokens as usize {
            return Err(AgentError::PromptTooLong { tokens, max: self.max_prompt_tokens });
        }
        Ok(())
    }

    /// Run a single agent by name, recording the interaction.
    pub async fn run_agent(&mut self, name: &str, input: &str) -> Result<AgentReport, Error> {
        self.execute(name, input, None).await
    }

    /// The one execution path: validates, dispatches, times, records.
    async fn execute(
        &mut self,
        name: &str,
        input: &str,
        pattern: Option<&str>,
    ) -> Result<AgentReport, Error> {
        self.validate_input(input)?;

        let agent = self.agents.get(name).ok_or_else(|| AgentError::Unknown {
            name: name.to_string(),
            available: self.agents.names_owned(),
        })?;

        let tools = if self.tools_enabled { &self.tools } else { &self.no_tools };

        info!(agent = %name, pattern = ?pattern, "Executing agent");
        let started = Instant::now();

        match agent.run(input, tools).await {
            Ok(mut report) => {
                report.duration_ms = started.elapsed().as_millis() as u64;

                self.context.merge_state(report.state_updates.clone()).await;
                let mut record = InteractionRecord::new(
                    name,
                    input,
                    &report.output,
                    report.confidence,
                    report.duration_ms,
                )
                .with_tools(report.tools_used.clone());
                if let Some(p) = pattern {
                    record = record.with_pattern(p);
                }
                self.context.record(record).await;

                info!(
                    agent = %name,
                    confidence = report.confidence,
                    duration_ms = report.duration_ms,
                    "Agent completed"
                );
                Ok(report)
            }
            Err(e) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                error!(agent = %name, error = %e, "Agent failed");

                // Failures are part of the history too
                let mut record =
                    InteractionRecord::new(name, input, e.to_string(), 0.0, duration_ms);
                if let Some(p) = pattern {
                    record = record.with_pattern(p);
                }
                self.context.record(record).await;

                Err(e.into())
            }
        }
    }

    /// Run the enabled agents in registration order, feeding each report's
    /// output into the next agent.
    pub async fn run_pipeline(&mut self, input: &str) -> Result<PipelineResult, Error> {
        self.validate_input(input)?;

        let sequence = self.agents.names_owned();
        info!(steps = sequence.len(), "Starting pipeline");

        let started = Instant::now();
        let mut result = PipelineResult {
            steps: Vec::with_capacity(sequence.len()),
            final_output: input.to_string(),
            total_duration_ms: 0,
            error: None,
        };

        for (i, agent_name) in sequence.iter().enumerate() {
            info!(step = i + 1, total = sequence.len(), agent = %agent_name, "Pipeline step");

            let current_input = result.final_output.clone();
            match self.execute(agent_name, &current_input, None).await {
                Ok(report) => {
                    result.final_output = report.output.clone();
                    result.steps.push(PipelineStep { agent: agent_name.clone(), report });
                }
                Err(e) => {
                    warn!(agent = %agent_name, error = %e, "Pipeline halted");
                    result.error = Some(e.to_string());
                    break;
                }
            }
        }

        result.total_duration_ms = started.elapsed().as_millis() as u64;
        info!(
            steps = result.steps.len(),
            total_duration_ms = result.total_duration_ms,
            failed = result.error.is_some(),
            "Pipeline finished"
        );
        Ok(result)
    }

    /// Route the input through the best-matching pattern, falling back
    /// through the pattern's chain when confidence stays below threshold.
    pub async fn run_with_pattern_fallback(
        &mut self,
        input: &str,
    ) -> Result<PatternOutcome, Error> {
        self.validate_input(input)?;

        let primary = self.patterns.find_best(input).to_string();
        info!(pattern = %primary, "Pattern routed");

        let outcome = match self.apply_pattern(&primary, input).await {
            Ok(report) => {
                let met_threshold = !self.patterns.should_fall_back(&primary, report.confidence);
                self.patterns.record_usage(&primary, report.confidence, met_threshold)?;

                if met_threshold || !self.pattern_fallback {
                    PatternOutcome { pattern: primary, report, fell_back: false }
                } else {
                    self.try_fallbacks(&primary, input, Some(report)).await?
                }
            }
            Err(e) => {
                warn!(pattern = %primary, error = %e, "Primary pattern failed");
                self.patterns.record_usage(&primary, 0.0, false)?;
                if !self.pattern_fallback {
                    return Err(e);
                }
                self.try_fallbacks(&primary, input, None).await.map_err(|_| e)?
            }
        };

        self.sync_pattern_memory().await;
        Ok(outcome)
    }

    /// Walk the fallback chain; the highest-confidence report wins. With no
    /// survivor, this is an internal error for the caller to map.
    async fn try_fallbacks(
        &mut self,
        primary: &str,
        input: &str,
        primary_report: Option<AgentReport>,
    ) -> Result<PatternOutcome, Error> {
        let mut best = primary_report.map(|report| PatternOutcome {
            pattern: primary.to_string(),
            report,
            fell_back: false,
        });

        for fallback in self.patterns.fallbacks(primary) {
            match self.apply_pattern(&fallback, input).await {
                Ok(report) => {
                    let met = !self.patterns.should_fall_back(&fallback, report.confidence);
                    self.patterns.record_usage(&fallback, report.confidence, met)?;

                    let improves = best
                        .as_ref()
                        .map(|b| report.confidence > b.report.confidence)
                        .unwrap_or(true);
                    if improves {
                        info!(pattern = %fallback, confidence = report.confidence, "Fallback improved result");
                        best = Some(PatternOutcome {
                            pattern: fallback.clone(),
                            report,
                            fell_back: true,
                        });
                    }
                }
                Err(e) => {
                    warn!(pattern = %fallback, error = %e, "Fallback pattern failed");
                    self.patterns.record_usage(&fallback, 0.0, false)?;
                }
            }
        }

        best.ok_or_else(|| Error::Internal("all patterns failed".into()))
    }

    /// Apply one pattern: append its enhancement to the prompt and run the
    /// target agent, tagging the interaction with the pattern name.
    async fn apply_pattern(&mut self, name: &str, input: &str) -> Result<AgentReport, Error> {
        let (agent, enhancement) = {
            let entry = self
                .patterns
                .get(name)
                .ok_or_else(|| atelier_core::PatternError::Unknown(name.to_string()))?;
            (entry.agent.clone(), entry.enhancement.clone())
        };

        let enhanced = if enhancement.is_empty() {
            input.to_string()
        } else {
            format!("{input}\n\n{enhancement}")
        };

        self.execute(&agent, &enhanced, Some(name)).await
    }

    /// Registered names plus context statistics.
    pub async fn stats(&self) -> OrchestratorStats {
        OrchestratorStats {
            agents: self.agents.names_owned(),
            tools: self.tools.names().into_iter().map(String::from).collect(),
            patterns: self.patterns.all_stats(),
            context: self.context.stats().await,
        }
    }
}
