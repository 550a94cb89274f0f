//! Project CLI commands: list.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use folio_types::project::ProjectStatus;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// List all projects in a table.
    #[command(alias = "ls")]
    List {
        /// Filter by status (draft, published).
        #[arg(long)]
        status: Option<String>,

        /// Sort by field (title, year, created_at, updated_at).
        #[arg(long, default_value = "created_at")]
        sort: String,
    },
}

/// List all projects in a rich colored table.
pub async fn list_projects(
    state: &AppState,
    status: Option<String>,
    sort: &str,
    json: bool,
) -> Result<()> {
    use folio_core::repository::project::ProjectFilter;

    let status_filter = match status {
        Some(s) => Some(s.parse::<ProjectStatus>().map_err(|e| anyhow::anyhow!(e))?),
        None => None,
    };

    let filter = Some(ProjectFilter {
        status: status_filter,
        sort_by: Some(sort.to_string()),
        ..Default::default()
    });

    let projects = state.project_service.list_all(filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!();
        println!(
            "  {} No projects found. Create one via the admin dashboard or {}",
            style("i").blue().bold(),
            style("POST /api/v1/projects").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("Slug").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Year").fg(Color::White),
        Cell::new("Media").fg(Color::White),
    ]);

    for project in &projects {
        let status_cell = match project.status {
            ProjectStatus::Published => Cell::new("● published").fg(Color::Green),
            ProjectStatus::Draft => Cell::new("○ draft").fg(Color::Yellow),
        };

        let title = if project.featured {
            format!("★ {}", project.title)
        } else {
            project.title.clone()
        };

        table.add_row(vec![
            Cell::new(title).fg(Color::Cyan),
            Cell::new(&project.slug).fg(Color::White),
            status_cell,
            Cell::new(project.category.as_deref().unwrap_or("-")),
            Cell::new(project.year.as_deref().unwrap_or("-")),
            Cell::new(project.media.len().to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} project{}",
        style(projects.len()).bold(),
        if projects.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
