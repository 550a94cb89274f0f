//! System status dashboard command.

use anyhow::Result;
use console::style;

use folio_types::config::MediaBackend;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows content counts, site settings, storage info, and version.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    // Gather stats
    let stats = state.project_service.stats().await?;
    let experiences = state.experience_service.list().await?;
    let uploads = state.media_service.list().await.unwrap_or_default();

    let media_backend = match state.config.media.backend {
        MediaBackend::Local => "local",
        MediaBackend::Remote => "remote",
    };

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "projects": {
                "total": stats.total,
                "published": stats.published,
                "draft": stats.draft,
                "featured": stats.featured,
            },
            "experiences": experiences.len(),
            "uploads": uploads.len(),
            "registration_enabled": state.config.registration_enabled,
            "media_backend": media_backend,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Folio v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    // Content counts
    println!("  {}", style("── Content ──").dim());
    println!(
        "  Projects:    {}",
        style(stats.total).bold()
    );
    println!(
        "  Published:   {}",
        style(stats.published).green()
    );
    if stats.draft > 0 {
        println!(
            "  Drafts:      {}",
            style(stats.draft).yellow()
        );
    }
    if stats.featured > 0 {
        println!(
            "  Featured:    {}",
            style(stats.featured).cyan()
        );
    }
    println!(
        "  Experiences: {}",
        style(experiences.len()).bold()
    );
    println!(
        "  Uploads:     {}",
        style(uploads.len()).bold()
    );
    println!();

    // Site settings
    println!("  {}", style("── Site ──").dim());
    println!(
        "  Registration:  {}",
        if state.config.registration_enabled {
            style("open").yellow()
        } else {
            style("closed").green()
        }
    );
    println!(
        "  Media backend: {}",
        media_backend
    );
    println!();

    // System
    println!("  {}", style("── System ──").dim());
    println!(
        "  Data dir: {}",
        style(state.data_dir.display()).dim()
    );
    println!(
        "  Database: {}",
        style("SQLite (WAL mode)").dim()
    );
    println!();

    Ok(())
}
