//! `atelier pipeline <input…>` — Run the full agent pipeline.

use std::path::Path;

use atelier_config::AppConfig;

use super::Session;

pub async fn run(
    config: &AppConfig,
    config_path: &Path,
    input: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(config, config_path).await;

    let agents = session.orchestrator.agent_names();
    println!("🚀 Running pipeline with agents: {}", agents.join(", "));

    let result = session.orchestrator.run_pipeline(input).await;
    session.close().await;
    let result = result.map_err(|e| e.to_string())?;

    println!("\n{}", "=".repeat(50));
    println!("PIPELINE RESULT");
    println!("{}", "=".repeat(50));

    for (i, step) in result.steps.iter().enumerate() {
        println!(
            "Step {}/{}: {} — confidence {:.2}, {}ms",
            i + 1,
            result.steps.len(),
            step.agent,
            step.report.confidence,
            step.report.duration_ms
        );
    }

    println!("\n{}", result.final_output);
    println!("\nTotal Execution Time: {}ms", result.total_duration_ms);
    println!("{}", "=".repeat(50));

    if let Some(error) = result.error {
        eprintln!("❌ Pipeline halted: {error}");
        return Err(error.into());
    }

    Ok(())
}
