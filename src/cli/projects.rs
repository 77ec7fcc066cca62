// ABOUTME: CLI projects command - list community projects, or all of them for admins

use anyhow::{Result, bail};

use super::util::{output_json, truncate};
use super::{OutputFormat, ProjectsArgs};
use crate::api::{HttpProjectClient, ProjectScope, ProjectService};
use crate::app::{Access, NavigationGuard};
use crate::config::AppConfig;
use crate::models::Project;
use crate::session::SessionContext;

/// Execute the projects command
pub async fn execute(args: ProjectsArgs, format: OutputFormat) -> Result<()> {
    let config = AppConfig::load()?;
    let session = SessionContext::load()?;

    let (scope, access) = if args.all {
        (ProjectScope::All, Access::Admin)
    } else {
        (ProjectScope::Community, Access::Authenticated)
    };
    if let Err(denied) = NavigationGuard::check_access(access, &session) {
        bail!("{denied}");
    }

    let client = HttpProjectClient::new(&config.api, &session)?;
    let projects = client.list_projects(scope).await?;

    match format {
        OutputFormat::Json => output_json(&projects)?,
        OutputFormat::Text => output_text(&projects),
    }
    Ok(())
}

/// Output projects as a text table
fn output_text(projects: &[Project]) {
    if projects.is_empty() {
        println!("No hay proyectos.");
        return;
    }

    println!(
        "{:<26} {:<30} {:<20} {:<20} PARTICIPANTES",
        "ID", "NOMBRE", "UBICACIÓN", "TIPO"
    );
    println!("{}", "-".repeat(110));

    for project in projects {
        println!(
            "{:<26} {:<30} {:<20} {:<20} {}",
            truncate(&project.id, 26),
            truncate(&project.name, 30),
            truncate(&project.location, 20),
            truncate(&project.partnership_type, 20),
            project.expected_participants
        );
    }
}
