// ABOUTME: CLI new-project command - drive the wizard steps from a TOML draft
//
// Every step is validated in order; the first failing step aborts with its message

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::util::output_json;
use super::{NewProjectArgs, OutputFormat};
use crate::api::{HttpProjectClient, ProjectService};
use crate::components::project_wizard::WizardController;
use crate::config::AppConfig;
use crate::models::{Attachment, MAX_ATTACHMENTS, ProjectDraft, clamp_attachments};
use crate::session::SessionContext;

/// On-disk draft: the wire field names plus a list of files to attach
#[derive(Debug, Deserialize)]
struct DraftFile {
    #[serde(flatten)]
    draft: ProjectDraft,
    #[serde(default)]
    files: Vec<PathBuf>,
}

/// Read a draft file and append attachments, `--attach` paths last
pub fn load_draft(path: &Path, extra: &[PathBuf]) -> Result<ProjectDraft> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft from {}", path.display()))?;
    let file: DraftFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse draft from {}", path.display()))?;

    let mut draft = file.draft;
    let selection: Vec<Attachment> = file
        .files
        .iter()
        .chain(extra)
        .map(Attachment::from_path)
        .collect();

    if !selection.is_empty() {
        if selection.len() > MAX_ATTACHMENTS {
            warn!(
                "{} files given, only the first {} are attached",
                selection.len(),
                MAX_ATTACHMENTS
            );
        }
        for attachment in &selection {
            if !attachment.is_declared_type() {
                warn!(
                    "{} has an unexpected type ({})",
                    attachment.file_name, attachment.mime_type
                );
            }
        }
        draft.attachments = clamp_attachments(selection);
    }

    Ok(draft)
}

/// Execute the new-project command
pub async fn execute(args: NewProjectArgs, format: OutputFormat) -> Result<()> {
    let source = load_draft(&args.draft, &args.attach)?;
    let draft = WizardController::complete_from(&source).map_err(|e| {
        anyhow!(
            "Paso {} de 5 ({}): {}",
            e.step.number(),
            e.step.title(),
            e
        )
    })?;

    let config = AppConfig::load()?;
    let session = SessionContext::load()?;
    let client = HttpProjectClient::new(&config.api, &session)?;
    let project = client
        .create_project(&draft)
        .await
        .context("No se pudo crear el proyecto")?;

    match format {
        OutputFormat::Json => output_json(&project)?,
        OutputFormat::Text => {
            println!("✅ Proyecto creado: {} ({})", project.name, project.id);
            if !draft.attachments.is_empty() {
                println!("   {} archivo(s) adjunto(s)", draft.attachments.len());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::project_wizard::WizardStep;
    use crate::models::ParticipationModality;
    use tempfile::TempDir;

    const DRAFT: &str = r#"
name = "Finca Sol"
location = "Huila"
landSize = "5 ha"
duration = "12 meses"
expectedParticipants = "4"
participationModality = "Participación Mixta"
managerName = "Ana Ruiz"
contactEmail = "ana@example.com"
termsAccepted = true
files = ["plano.pdf"]
"#;

    #[test]
    fn test_load_draft_with_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("finca.toml");
        fs::write(&path, DRAFT).unwrap();

        let draft = load_draft(&path, &[PathBuf::from("foto.jpg")]).unwrap();
        assert_eq!(draft.name, "Finca Sol");
        assert_eq!(draft.land_size, "5 ha");
        assert_eq!(
            draft.participation_modality,
            Some(ParticipationModality::Mixed)
        );
        let names: Vec<&str> = draft.attachments.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["plano.pdf", "foto.jpg"]);
    }

    #[test]
    fn test_load_draft_clamps_attachments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("finca.toml");
        fs::write(&path, "name = \"x\"\n").unwrap();

        let extra: Vec<PathBuf> = (0..12).map(|i| PathBuf::from(format!("f{i}.png"))).collect();
        let draft = load_draft(&path, &extra).unwrap();
        assert_eq!(draft.attachments.len(), MAX_ATTACHMENTS);
        assert_eq!(draft.attachments[9].file_name, "f9.png");
    }

    #[test]
    fn test_missing_sizing_fails_on_step_two() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("finca.toml");
        fs::write(&path, "name = \"Finca Sol\"\nmanagerName = \"Ana\"\n").unwrap();

        let draft = load_draft(&path, &[]).unwrap();
        let err = WizardController::complete_from(&draft).unwrap_err();
        assert_eq!(err.step, WizardStep::Sizing);
    }

    #[test]
    fn test_full_draft_completes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("finca.toml");
        fs::write(&path, DRAFT).unwrap();

        let draft = load_draft(&path, &[]).unwrap();
        let done = WizardController::complete_from(&draft).unwrap();
        assert_eq!(done.contact_email, "ana@example.com");
        assert!(done.terms_accepted);
    }
}
