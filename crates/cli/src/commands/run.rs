//! `atelier run <agent> <input…>` — Run a single agent.

use std::path::Path;

use atelier_config::AppConfig;

use super::{Session, display_report};

pub async fn run(
    config: &AppConfig,
    config_path: &Path,
    agent: &str,
    input: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(config, config_path).await;

    println!("🚀 Running agent '{agent}'…");
    match session.orchestrator.run_agent(agent, input).await {
        Ok(report) => {
            display_report(&report);
            session.close().await;
            Ok(())
        }
        Err(e) => {
            session.close().await;
            eprintln!("❌ {e}");
            eprintln!("Usage: atelier run <agent> <input…>");
            eprintln!(
                "Available agents: {}",
                session.orchestrator.agent_names().join(", ")
            );
            Err(e.to_string().into())
        }
    }
}
