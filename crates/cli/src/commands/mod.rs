//! CLI command implementations.

pub mod memory;
pub mod pattern;
pub mod pipeline;
pub mod push;
pub mod run;
pub mod status;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use atelier_config::AppConfig;
use atelier_core::AgentReport;
use atelier_memory::ContextStore;
use atelier_orchestrator::Orchestrator;

/// One CLI invocation's wiring: context store, orchestrator, and the
/// memory file that brackets the command when memory is enabled.
pub struct Session {
    pub orchestrator: Orchestrator,
    memory_file: PathBuf,
    memory_enabled: bool,
}

impl Session {
    /// Build the session: create the store, import the memory snapshot
    /// when enabled (tolerating failure), wire the orchestrator.
    pub async fn open(config: &AppConfig, config_path: &Path) -> Self {
        let context = Arc::new(ContextStore::new());
        let memory_file = AppConfig::memory_path(config_path);

        if config.memory_enabled && memory_file.exists() {
            // A broken snapshot must not block the command
            if let Err(e) = context.import(&memory_file).await {
                warn!(error = %e, "Could not import memory, continuing without it");
            }
        }

        let mut orchestrator = Orchestrator::from_config(config, context);
        orchestrator.restore_pattern_memory().await;

        Self {
            orchestrator,
            memory_file,
            memory_enabled: config.memory_enabled,
        }
    }

    /// Persist the session: mirror pattern counters and export the
    /// snapshot when memory is enabled (tolerating failure).
    pub async fn close(&self) {
        if !self.memory_enabled {
            return;
        }
        self.orchestrator.sync_pattern_memory().await;
        if let Err(e) = self.orchestrator.context().export(&self.memory_file).await {
            warn!(error = %e, "Could not export memory");
        }
    }
}

/// Render one agent report the way the original runner did.
pub fn display_report(report: &AgentReport) {
    println!("\n{}", "=".repeat(50));
    println!("EXECUTION RESULT");
    println!("{}", "=".repeat(50));
    println!("{}", report.output);
    println!("\nConfidence: {:.2}", report.confidence);
    println!("Execution Time: {}ms", report.duration_ms);
    println!("{}", "=".repeat(50));
}
