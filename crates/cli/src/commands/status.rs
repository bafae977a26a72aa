//! `atelier status` — Show configuration and runtime status.

use std::path::Path;

use atelier_config::AppConfig;

use super::Session;

pub async fn run(config: &AppConfig, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(config, config_path).await;
    let stats = session.orchestrator.stats().await;

    println!("🎨 Atelier Status");
    println!("=================");
    println!("  Version:          {}", config.version);
    println!("  Entry:            {}", config.entry);
    println!("  Config file:      {}", config_path.display());
    println!("  Max prompt toks:  {}", config.max_prompt_tokens);
    println!("  Tools:            {}", if config.tools_enabled { "enabled" } else { "disabled" });
    println!("  Pattern fallback: {}", if config.pattern_fallback { "enabled" } else { "disabled" });
    println!("  Memory:           {}", if config.memory_enabled { "enabled" } else { "disabled" });
    println!("  Auto-commit:      {}", if config.auto_commit { "enabled" } else { "disabled" });
    println!("  GitHub push:      {}", if config.github_push { "enabled" } else { "disabled" });
    println!("  Log level:        {}", config.effective_log_level());

    println!("\n  Agents ({}):      {}", stats.agents.len(), stats.agents.join(", "));
    println!("  Tools ({}):       {}", stats.tools.len(), stats.tools.join(", "));
    println!("  Patterns ({}):", stats.patterns.len());
    for pattern in &stats.patterns {
        println!(
            "    - {}: {} uses, {:.2} success rate",
            pattern.name, pattern.use_count, pattern.success_rate
        );
    }

    println!("\n  Session:          {}", stats.context.session_id);
    println!("  Interactions:     {}", stats.context.total_interactions);
    println!("  Avg confidence:   {:.2}", stats.context.avg_confidence);

    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file at {} — using defaults", config_path.display());
    }

    Ok(())
}
