//! `atelier memory` — Memory snapshot management.

use std::path::{Path, PathBuf};

use atelier_config::AppConfig;

use super::Session;

fn target_file(config_path: &Path, file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| AppConfig::memory_path(config_path))
}

pub async fn export(
    config: &AppConfig,
    config_path: &Path,
    file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(config, config_path).await;
    let path = target_file(config_path, file);

    session.orchestrator.sync_pattern_memory().await;
    session
        .orchestrator
        .context()
        .export(&path)
        .await
        .map_err(|e| format!("Failed to export memory: {e}"))?;

    let count = session.orchestrator.context().len().await;
    println!("💾 Exported {count} interactions to {}", path.display());
    Ok(())
}

pub async fn import(
    config: &AppConfig,
    config_path: &Path,
    file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(config, config_path).await;
    let path = target_file(config_path, file);

    match session.orchestrator.context().import(&path).await {
        Ok(count) => {
            println!("📥 Imported {count} interactions from {}", path.display());
            // Persist the merged store to the default memory file
            session.close().await;
            Ok(())
        }
        Err(e) => {
            // Memory failures are recoverable: report, keep going empty
            eprintln!("⚠️  Could not import memory: {e}");
            eprintln!("Continuing without imported memory");
            Ok(())
        }
    }
}

pub async fn stats(config: &AppConfig, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(config, config_path).await;
    let stats = session.orchestrator.context().stats().await;
    let path = AppConfig::memory_path(config_path);

    println!("🧠 Memory Statistics");
    println!("====================");
    println!("  Enabled:        {}", config.memory_enabled);
    println!("  Snapshot file:  {}", path.display());
    if path.exists() {
        let meta = std::fs::metadata(&path)?;
        println!("  File size:      {:.1} KB", meta.len() as f64 / 1024.0);
    } else {
        println!("  File size:      (not created yet)");
    }
    println!("  Session:        {}", stats.session_id);
    println!("  Interactions:   {}", stats.total_interactions);
    println!("  Avg confidence: {:.2}", stats.avg_confidence);
    println!("  Avg duration:   {:.1}ms", stats.avg_duration_ms);
    if !stats.shared_state_keys.is_empty() {
        println!("  State keys:     {}", stats.shared_state_keys.join(", "));
    }

    Ok(())
}
