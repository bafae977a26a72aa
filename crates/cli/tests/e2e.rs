//! End-to-end integration tests for the Atelier runtime.
//!
//! These exercise the full path a CLI command takes — config, orchestrator,
//! agents, tools, patterns, context store, memory snapshots — without
//! touching the network or any external service. The agents are
//! deterministic keyword heuristics, so outcomes are stable.

use std::path::Path;
use std::sync::Arc;

use atelier_config::AppConfig;
use atelier_memory::ContextStore;
use atelier_orchestrator::Orchestrator;

fn orchestrator_with(config: &AppConfig) -> Orchestrator {
    Orchestrator::from_config(config, Arc::new(ContextStore::new()))
}

// ── Confidence bounds across the whole command surface ───────────────────

#[tokio::test]
async fn e2e_every_agent_command_yields_confidence_in_unit_interval() {
    let config = AppConfig::default();
    let mut orch = orchestrator_with(&config);

    for agent in ["design", "evaluator", "creative", "prompt"] {
        let report = orch
            .run_agent(agent, "Design a clear, accessible checkout flow for consumers")
            .await
            .unwrap();
        assert!(
            (0.0..=1.0).contains(&report.confidence),
            "agent {agent} returned confidence {}",
            report.confidence
        );
    }

    let pipeline = orch.run_pipeline("Evaluate the new onboarding design").await.unwrap();
    assert!(pipeline.error.is_none());
    for step in &pipeline.steps {
        assert!((0.0..=1.0).contains(&step.report.confidence));
    }

    let outcome = orch
        .run_with_pattern_fallback("Audit this interface design for trust issues")
        .await
        .unwrap();
    assert!((0.0..=1.0).contains(&outcome.report.confidence));
}

// ── Unknown agent: error + usage, not a crash ────────────────────────────

#[tokio::test]
async fn e2e_unknown_agent_fails_without_crashing() {
    let config = AppConfig::default();
    let mut orch = orchestrator_with(&config);

    let err = orch.run_agent("bogus_agent", "x").await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("bogus_agent"));
    // The error names the agents a usage message would list
    for agent in ["design", "evaluator", "creative", "prompt"] {
        assert!(msg.contains(agent), "usage should list {agent}");
    }

    // The runtime is still usable afterwards
    let report = orch.run_agent("design", "Design a widget").await.unwrap();
    assert!(report.confidence > 0.0);
}

// ── Memory round-trip through the snapshot file ──────────────────────────

#[tokio::test]
async fn e2e_memory_export_import_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let memory_file = dir.path().join("atelier_memory.json");
    let config = AppConfig::default();

    // Session 1: run commands, export
    let context = Arc::new(ContextStore::new());
    let mut orch = Orchestrator::from_config(&config, context.clone());
    orch.run_agent("design", "Design a dashboard interface").await.unwrap();
    orch.run_agent("evaluator", "Assess the dashboard proposal").await.unwrap();
    orch.run_with_pattern_fallback("Audit this interface design").await.unwrap();
    orch.sync_pattern_memory().await;

    let exported_count = context.len().await;
    let exported_state = context.get_state("design_request_kind").await;
    context.export(&memory_file).await.unwrap();

    // Session 2: fresh empty store, import reproduces count and state
    let fresh = Arc::new(ContextStore::new());
    let imported = fresh.import(&memory_file).await.unwrap();
    assert_eq!(imported, exported_count);
    assert_eq!(fresh.len().await, exported_count);
    assert_eq!(fresh.get_state("design_request_kind").await, exported_state);

    // Pattern counters travel with the snapshot
    let mut orch2 = Orchestrator::from_config(&config, fresh);
    orch2.restore_pattern_memory().await;
    assert!(orch2.patterns().stats("ux_audit").unwrap().use_count >= 1);
}

// ── Pattern counters: success_rate == success_count / use_count ──────────

#[tokio::test]
async fn e2e_pattern_success_rate_invariant_holds_under_load() {
    let config = AppConfig::default();
    let mut orch = orchestrator_with(&config);

    let prompts = [
        "Audit this interface design",
        "Make the checkout design trustworthy",
        "Evaluate and score the proposal",
        "Design a landing page",
        "hello there",
    ];
    for prompt in prompts {
        orch.run_with_pattern_fallback(prompt).await.unwrap();
    }

    for stats in orch.patterns().all_stats() {
        if stats.use_count == 0 {
            assert_eq!(stats.success_rate, 0.0);
        } else {
            let expected = stats.success_count as f64 / stats.use_count as f64;
            assert!(
                (stats.success_rate - expected).abs() < 1e-12,
                "{}: {} != {}",
                stats.name,
                stats.success_rate,
                expected
            );
        }
    }
}

// ── Pipeline chaining and shared state ───────────────────────────────────

#[tokio::test]
async fn e2e_pipeline_runs_all_enabled_agents_in_config_order() {
    let config = AppConfig {
        enabled_agents: vec!["prompt".into(), "design".into()],
        ..AppConfig::default()
    };
    let mut orch = orchestrator_with(&config);

    let result = orch.run_pipeline("Design a friendly signup form").await.unwrap();
    assert_eq!(result.steps.len(), 2);
    assert_eq!(result.steps[0].agent, "prompt");
    assert_eq!(result.steps[1].agent, "design");
    assert_eq!(result.final_output, result.steps[1].report.output);

    // Both interactions were logged
    assert_eq!(orch.context().len().await, 2);
}

// ── Config toggles reach the runtime ─────────────────────────────────────

#[tokio::test]
async fn e2e_tools_toggle_controls_report_sections() {
    let with_tools = AppConfig::default();
    let mut orch = orchestrator_with(&with_tools);
    let report = orch.run_agent("design", "Audit the checkout interface").await.unwrap();
    assert!(!report.tools_used.is_empty());

    let without_tools = AppConfig { tools_enabled: false, ..AppConfig::default() };
    let mut orch = orchestrator_with(&without_tools);
    let report = orch.run_agent("design", "Audit the checkout interface").await.unwrap();
    assert!(report.tools_used.is_empty());
}

#[tokio::test]
async fn e2e_config_file_drives_enabled_agents() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("atelier.json");
    std::fs::write(
        &config_path,
        r#"{"enabled_agents": ["evaluator"], "tools_enabled": false, "memory_enabled": false}"#,
    )
    .unwrap();

    let config = AppConfig::load_from(&config_path).unwrap();
    let mut orch = orchestrator_with(&config);

    assert!(orch.run_agent("evaluator", "Assess this").await.is_ok());
    assert!(orch.run_agent("design", "Design this").await.is_err());
}

#[tokio::test]
async fn e2e_missing_config_uses_defaults() {
    let config = AppConfig::load_from(Path::new("/definitely/not/here/atelier.json")).unwrap();
    assert_eq!(config.enabled_agents.len(), 4);

    let mut orch = orchestrator_with(&config);
    let report = orch.run_agent("creative", "A premium brand story").await.unwrap();
    assert!(report.confidence > 0.0);
}

// ── Degradation: memory failures never block a command ───────────────────

#[tokio::test]
async fn e2e_corrupt_memory_file_degrades_gracefully() {
    let dir = tempfile::tempdir().unwrap();
    let memory_file = dir.path().join("atelier_memory.json");
    std::fs::write(&memory_file, "{{{ this is not json").unwrap();

    let context = Arc::new(ContextStore::new());
    // Import fails…
    assert!(context.import(&memory_file).await.is_err());

    // …but the runtime continues without memory
    let config = AppConfig::default();
    let mut orch = Orchestrator::from_config(&config, context);
    let report = orch.run_agent("design", "Design the settings page").await.unwrap();
    assert!(report.confidence > 0.0);
}
