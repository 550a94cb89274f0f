//! Admin account CLI commands: create, show.

use anyhow::Result;
use clap::Subcommand;
use console::style;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};

use folio_types::profile::ProfileView;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Create the admin account (bypasses the HTTP registration gate).
    Create {
        /// Login email.
        #[arg(long)]
        email: Option<String>,

        /// Display name shown on the public site.
        #[arg(long)]
        name: Option<String>,

        /// Password (omit for a hidden prompt; flag is for automation).
        #[arg(long)]
        password: Option<String>,
    },

    /// Show the stored profile.
    Show,
}

/// Create the admin account.
///
/// This is the bootstrap path for a fresh data dir: it works even when
/// registration is disabled in config, which it is by default.
///
/// # Examples
///
/// ```bash
/// # Interactive (prompts for anything missing)
/// folio account create
///
/// # Scripted
/// folio account create --email me@example.com --name "Jane Doe" --password s3cret-pw
/// ```
pub async fn create_account(
    state: &AppState,
    email: Option<String>,
    name: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let email = match email {
        Some(e) => e,
        None => Input::<String>::new()
            .with_prompt("Login email")
            .interact_text()?,
    };

    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let name = name.unwrap_or_default();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Creating account...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let profile = state
        .auth_service
        .create_account(&email, &password, &name)
        .await?;

    spinner.finish_and_clear();

    if json {
        let view: ProfileView = profile.into();
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Account created successfully!",
        style("✓").green().bold()
    );
    println!();
    println!("  {}  {}", style("Name:").bold(), style(&profile.name).cyan());
    println!("  {} {}", style("Email:").bold(), &profile.email);
    println!(
        "  {}    {}",
        style("ID:").bold(),
        style(profile.id.to_string()).dim()
    );
    println!();
    println!(
        "  Start the API and log in: {}",
        style("folio serve").yellow()
    );
    println!();

    Ok(())
}

/// Show the stored profile, CV link included.
pub async fn show_account(state: &AppState, json: bool) -> Result<()> {
    let profile = state.profile_service.public_profile().await?;

    if json {
        let view: ProfileView = profile.into();
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&profile.name).cyan().bold());
    if let Some(role) = &profile.role {
        println!("  {}", style(role).dim());
    }
    println!();

    println!("  {}", style("── Profile ──").dim());
    println!("  {}   {}", style("Email:").bold(), &profile.email);
    println!(
        "  {} {}",
        style("Country:").bold(),
        profile.country.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  {}      {}",
        style("CV:").bold(),
        match &profile.cv_url {
            Some(url) => style(url.as_str()).cyan().to_string(),
            None => style("(not set)").dim().to_string(),
        }
    );
    println!(
        "  {}  {}",
        style("Avatar:").bold(),
        profile.avatar_url.as_deref().unwrap_or("(not set)")
    );
    println!();

    if let Some(bio) = &profile.bio {
        println!("  {}", style("── Bio ──").dim());
        for line in bio.lines() {
            println!("  {line}");
        }
        println!();
    }

    if let Some(works_intro) = &profile.works_intro {
        println!("  {}", style("── Works intro ──").dim());
        for line in works_intro.lines() {
            println!("  {line}");
        }
        println!();
    }

    println!("  {}", style("── Timestamps ──").dim());
    println!(
        "  {} {}",
        style("Created:").bold(),
        profile.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "  {} {}",
        style("Updated:").bold(),
        profile.updated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();

    Ok(())
}
