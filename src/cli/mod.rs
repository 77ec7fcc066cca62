// ABOUTME: CLI argument parsing and command routing for aparceria
//
// Provides command-line interface for:
// - Signing in and out of the backend (login, logout, whoami)
// - Listing projects (projects)
// - Creating a project from a TOML draft (new-project)
// - Launching TUI (tui, default)

pub mod auth;
pub mod new_project;
pub mod projects;
pub mod util;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Aparcería - create and browse sharecropping projects from the terminal
#[derive(Parser)]
#[command(name = "aparceria")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// Sign in to the backend
    Login(LoginArgs),

    /// Forget the stored token and profile
    Logout,

    /// Show who is signed in
    Whoami,

    /// List projects
    Projects(ProjectsArgs),

    /// Create a project from a TOML draft, validating each wizard step
    NewProject(NewProjectArgs),
}

/// Arguments for the login command
#[derive(clap::Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Password (prompted on stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the projects command
#[derive(clap::Args)]
pub struct ProjectsArgs {
    /// List every project (administrators only)
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the new-project command
#[derive(clap::Args)]
pub struct NewProjectArgs {
    /// TOML file with the draft fields
    #[arg(long)]
    pub draft: PathBuf,

    /// File to attach (repeatable, at most 10 are kept)
    #[arg(long = "attach")]
    pub attach: Vec<PathBuf>,
}
