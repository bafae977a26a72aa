//! `atelier pattern <input…>` — Run with keyword-routed pattern fallback.

use std::path::Path;

use atelier_config::AppConfig;

use super::{Session, display_report};

pub async fn run(
    config: &AppConfig,
    config_path: &Path,
    input: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(config, config_path).await;

    let outcome = session.orchestrator.run_with_pattern_fallback(input).await;
    session.close().await;

    match outcome {
        Ok(outcome) => {
            println!(
                "🧩 Pattern: {}{}",
                outcome.pattern,
                if outcome.fell_back { " (via fallback)" } else { "" }
            );
            display_report(&outcome.report);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {e}");
            Err(e.to_string().into())
        }
    }
}
