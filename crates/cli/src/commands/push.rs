//! `atelier push` — Commit workspace changes and push to the remote.

use atelier_config::AppConfig;
use atelier_vcs::{PushOutcome, for_current_dir};

pub async fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let auto_push = for_current_dir(config.github_push, config.auto_commit);

    match auto_push.run().await {
        Ok(PushOutcome::NoChanges) => {
            println!("✅ No changes — nothing to commit");
            Ok(())
        }
        Ok(PushOutcome::Committed { files_changed, message }) => {
            println!("✅ Committed {files_changed} changed files (push disabled)");
            println!("   {message}");
            Ok(())
        }
        Ok(PushOutcome::Pushed { files_changed, message }) => {
            println!("✅ Committed and pushed {files_changed} changed files");
            println!("   {message}");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {e}");
            Err(e.to_string().into())
        }
    }
}
