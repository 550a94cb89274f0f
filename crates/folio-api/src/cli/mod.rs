//! CLI command definitions and dispatch for the `folio` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a noun-verb
//! pattern (e.g., `folio account create`, `folio project list`).

pub mod account;
pub mod project;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Manage your portfolio site.
#[derive(Parser)]
#[command(name = "folio", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the admin account (create, show).
    Account {
        #[command(subcommand)]
        action: account::AccountCommand,
    },

    /// Manage projects (list).
    Project {
        #[command(subcommand)]
        action: project::ProjectCommand,
    },

    /// System status dashboard.
    Status,

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
