//! Configuration check command.

use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::{report, Project};
use crate::watch::{FileWatcher, WatchEvent};

/// Run the check command.
pub async fn run(config_path: &Path, watch: bool, strict: bool) -> Result<()> {
    if watch {
        return watch_loop(config_path, strict).await;
    }

    check_once(config_path, strict)
}

/// Load, validate and resolve once. Fails if any error is found.
pub fn check_once(config_path: &Path, strict: bool) -> Result<()> {
    let project = Project::load(config_path)?;
    let (index, mut diag) = project.diagnose()?;

    if strict {
        diag.promote_warnings();
    }

    report(&diag);

    let errors = diag.errors().count();
    let warnings = diag.warnings().count();
    tracing::info!(
        "Checked {} sidebar entries against {} pages: {} error(s), {} warning(s)",
        project.config.site.slugs().count(),
        index.len(),
        errors,
        warnings
    );

    if errors > 0 {
        anyhow::bail!("{} found {} error(s)", config_path.display(), errors);
    }

    Ok(())
}

/// Re-run the check whenever the config or content changes, until Ctrl-C.
async fn watch_loop(config_path: &Path, strict: bool) -> Result<()> {
    loop {
        if let Err(e) = check_once(config_path, strict) {
            tracing::error!("{:#}", e);
        }

        // The content directory may move when docs.toml changes, so resolve it each round.
        let content_dir = Project::load(config_path)
            .map(|p| p.content_dir())
            .unwrap_or_default();

        let (watcher, mut rx) = FileWatcher::new(config_path, &content_dir)
            .with_context(|| format!("Failed to watch {}", config_path.display()))?;

        tracing::info!("Watching for changes (Ctrl-C to stop)");

        loop {
            tokio::select! {
                event = rx.recv() => {
                    let Some(event) = event else {
                        return Ok(());
                    };
                    tracing::info!("Change detected: {}", event.path().display());
                    if matches!(event, WatchEvent::ConfigChanged(_)) {
                        break;
                    }
                    if let Err(e) = check_once(config_path, strict) {
                        tracing::error!("{:#}", e);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    return Ok(());
                }
            }
        }

        drop(watcher);
    }
}
