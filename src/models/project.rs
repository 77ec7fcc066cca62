// ABOUTME: Project draft data model accumulated by the creation wizard
// Typed field updates, single-owner field table and the submitted project record

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::components::project_wizard::WizardStep;

/// Maximum number of attachments kept on a draft
pub const MAX_ATTACHMENTS: usize = 10;

/// Declared per-file size limit (100 MB). Shown to the user, not enforced.
pub const MAX_ATTACHMENT_BYTES: u64 = 100 * 1024 * 1024;

/// MIME types the attachment picker advertises
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "image/*",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// How participants take part in the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipationModality {
    #[serde(rename = "Participación Activa (presencial)")]
    Active,
    #[serde(rename = "Participación Remota (virtual)")]
    Remote,
    #[serde(rename = "Participación Mixta")]
    Mixed,
}

impl ParticipationModality {
    pub fn all() -> &'static [ParticipationModality] {
        &[Self::Active, Self::Remote, Self::Mixed]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Participación Activa (presencial)",
            Self::Remote => "Participación Remota (virtual)",
            Self::Mixed => "Participación Mixta",
        }
    }
}

/// How the harvest or profit is shared among participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenefitSharingModel {
    #[serde(rename = "Reparto equitativo según los aportes")]
    ByContribution,
    #[serde(rename = "Reparto en partes iguales")]
    EqualShares,
    #[serde(rename = "Porcentaje fijo acordado")]
    FixedPercentage,
    #[serde(rename = "Reparto según la producción")]
    ByProduction,
}

impl BenefitSharingModel {
    pub fn all() -> &'static [BenefitSharingModel] {
        &[
            Self::ByContribution,
            Self::EqualShares,
            Self::FixedPercentage,
            Self::ByProduction,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ByContribution => "Reparto equitativo según los aportes",
            Self::EqualShares => "Reparto en partes iguales",
            Self::FixedPercentage => "Porcentaje fijo acordado",
            Self::ByProduction => "Reparto según la producción",
        }
    }
}

/// A file chosen in the attachment picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    /// Size on disk when it could be read; `None` for files that vanished
    pub size_bytes: Option<u64>,
}

impl Attachment {
    /// Describe a selected file. Type and size are informational only.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let size_bytes = std::fs::metadata(path).ok().map(|m| m.len());

        Self {
            path: path.to_path_buf(),
            file_name,
            mime_type: guess_mime_type(path).to_string(),
            size_bytes,
        }
    }

    /// Whether the guessed MIME type is one the picker advertises
    pub fn is_declared_type(&self) -> bool {
        self.mime_type.starts_with("image/")
            || ACCEPTED_MIME_TYPES.contains(&self.mime_type.as_str())
    }
}

fn guess_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

/// Keep the first `MAX_ATTACHMENTS` entries of a selection, in order
pub fn clamp_attachments(mut selection: Vec<Attachment>) -> Vec<Attachment> {
    if selection.len() > MAX_ATTACHMENTS {
        tracing::debug!(
            "Dropping {} attachments beyond the limit of {}",
            selection.len() - MAX_ATTACHMENTS,
            MAX_ATTACHMENTS
        );
        selection.truncate(MAX_ATTACHMENTS);
    }
    selection
}

/// Identifies one field of the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Description,
    Location,
    PartnershipType,
    LandSize,
    Duration,
    ExpectedParticipants,
    ParticipantContributions,
    AvailableResources,
    ParticipationModality,
    BenefitSharingModel,
    ManagerName,
    ContactEmail,
    ContactPhone,
    TermsAccepted,
    PublishToCommunity,
    Attachments,
}

impl DraftField {
    pub fn all() -> &'static [DraftField] {
        &[
            Self::Name,
            Self::Description,
            Self::Location,
            Self::PartnershipType,
            Self::LandSize,
            Self::Duration,
            Self::ExpectedParticipants,
            Self::ParticipantContributions,
            Self::AvailableResources,
            Self::ParticipationModality,
            Self::BenefitSharingModel,
            Self::ManagerName,
            Self::ContactEmail,
            Self::ContactPhone,
            Self::TermsAccepted,
            Self::PublishToCommunity,
            Self::Attachments,
        ]
    }

    /// The one step allowed to write this field
    pub fn owner(&self) -> WizardStep {
        match self {
            Self::Name | Self::Description | Self::Location | Self::PartnershipType => {
                WizardStep::General
            }
            Self::LandSize | Self::Duration | Self::ExpectedParticipants => WizardStep::Sizing,
            Self::ParticipantContributions | Self::AvailableResources => WizardStep::Resources,
            Self::ParticipationModality | Self::BenefitSharingModel => WizardStep::Participation,
            Self::ManagerName
            | Self::ContactEmail
            | Self::ContactPhone
            | Self::TermsAccepted
            | Self::PublishToCommunity
            | Self::Attachments => WizardStep::Contact,
        }
    }

    /// Wire name used in the submission payload
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Location => "location",
            Self::PartnershipType => "partnershipType",
            Self::LandSize => "landSize",
            Self::Duration => "duration",
            Self::ExpectedParticipants => "expectedParticipants",
            Self::ParticipantContributions => "participantContributions",
            Self::AvailableResources => "availableResources",
            Self::ParticipationModality => "participationModality",
            Self::BenefitSharingModel => "benefitSharingModel",
            Self::ManagerName => "managerName",
            Self::ContactEmail => "contactEmail",
            Self::ContactPhone => "contactPhone",
            Self::TermsAccepted => "termsAccepted",
            Self::PublishToCommunity => "publishToCommunity",
            Self::Attachments => "attachments",
        }
    }

    /// Form label shown in the wizard
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Nombre del proyecto",
            Self::Description => "Descripción",
            Self::Location => "Ubicación",
            Self::PartnershipType => "Tipo de aparcería",
            Self::LandSize => "Tamaño del terreno",
            Self::Duration => "Duración",
            Self::ExpectedParticipants => "Participantes esperados",
            Self::ParticipantContributions => "Aportes de los participantes",
            Self::AvailableResources => "Recursos disponibles",
            Self::ParticipationModality => "Modalidad de participación",
            Self::BenefitSharingModel => "Modelo de reparto de beneficios",
            Self::ManagerName => "Responsable",
            Self::ContactEmail => "Correo de contacto",
            Self::ContactPhone => "Teléfono (opcional)",
            Self::TermsAccepted => "Acepto los términos",
            Self::PublishToCommunity => "Publicar en la comunidad",
            Self::Attachments => "Adjuntos",
        }
    }
}

/// A single typed write to one draft field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Description(String),
    Location(String),
    PartnershipType(String),
    LandSize(String),
    Duration(String),
    ExpectedParticipants(String),
    ParticipantContributions(String),
    AvailableResources(String),
    ParticipationModality(Option<ParticipationModality>),
    BenefitSharingModel(Option<BenefitSharingModel>),
    ManagerName(String),
    ContactEmail(String),
    ContactPhone(String),
    TermsAccepted(bool),
    PublishToCommunity(bool),
    Attachments(Vec<Attachment>),
}

impl FieldUpdate {
    pub fn field(&self) -> DraftField {
        match self {
            Self::Name(_) => DraftField::Name,
            Self::Description(_) => DraftField::Description,
            Self::Location(_) => DraftField::Location,
            Self::PartnershipType(_) => DraftField::PartnershipType,
            Self::LandSize(_) => DraftField::LandSize,
            Self::Duration(_) => DraftField::Duration,
            Self::ExpectedParticipants(_) => DraftField::ExpectedParticipants,
            Self::ParticipantContributions(_) => DraftField::ParticipantContributions,
            Self::AvailableResources(_) => DraftField::AvailableResources,
            Self::ParticipationModality(_) => DraftField::ParticipationModality,
            Self::BenefitSharingModel(_) => DraftField::BenefitSharingModel,
            Self::ManagerName(_) => DraftField::ManagerName,
            Self::ContactEmail(_) => DraftField::ContactEmail,
            Self::ContactPhone(_) => DraftField::ContactPhone,
            Self::TermsAccepted(_) => DraftField::TermsAccepted,
            Self::PublishToCommunity(_) => DraftField::PublishToCommunity,
            Self::Attachments(_) => DraftField::Attachments,
        }
    }

    /// Text payload for text fields, `None` for choices, toggles and files
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Name(s)
            | Self::Description(s)
            | Self::Location(s)
            | Self::PartnershipType(s)
            | Self::LandSize(s)
            | Self::Duration(s)
            | Self::ExpectedParticipants(s)
            | Self::ParticipantContributions(s)
            | Self::AvailableResources(s)
            | Self::ManagerName(s)
            | Self::ContactEmail(s)
            | Self::ContactPhone(s) => Some(s),
            _ => None,
        }
    }

    /// Build a text update for a text field. Returns `None` for other kinds.
    pub fn text(field: DraftField, value: String) -> Option<Self> {
        let update = match field {
            DraftField::Name => Self::Name(value),
            DraftField::Description => Self::Description(value),
            DraftField::Location => Self::Location(value),
            DraftField::PartnershipType => Self::PartnershipType(value),
            DraftField::LandSize => Self::LandSize(value),
            DraftField::Duration => Self::Duration(value),
            DraftField::ExpectedParticipants => Self::ExpectedParticipants(value),
            DraftField::ParticipantContributions => Self::ParticipantContributions(value),
            DraftField::AvailableResources => Self::AvailableResources(value),
            DraftField::ManagerName => Self::ManagerName(value),
            DraftField::ContactEmail => Self::ContactEmail(value),
            DraftField::ContactPhone => Self::ContactPhone(value),
            _ => return None,
        };
        Some(update)
    }
}

/// Ordered set of updates produced by one panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPatch {
    updates: Vec<FieldUpdate>,
}

impl DraftPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, update: FieldUpdate) -> Self {
        self.updates.push(update);
        self
    }

    pub fn push(&mut self, update: FieldUpdate) {
        self.updates.push(update);
    }

    pub fn updates(&self) -> &[FieldUpdate] {
        &self.updates
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Latest update for `field` in this patch, if any
    pub fn get(&self, field: DraftField) -> Option<&FieldUpdate> {
        self.updates.iter().rev().find(|u| u.field() == field)
    }
}

impl FromIterator<FieldUpdate> for DraftPatch {
    fn from_iter<I: IntoIterator<Item = FieldUpdate>>(iter: I) -> Self {
        Self {
            updates: iter.into_iter().collect(),
        }
    }
}

/// The record built up across the wizard steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub location: String,
    pub partnership_type: String,
    pub land_size: String,
    pub duration: String,
    pub expected_participants: String,
    pub participant_contributions: String,
    pub available_resources: String,
    #[serde(with = "empty_as_none")]
    pub participation_modality: Option<ParticipationModality>,
    #[serde(with = "empty_as_none")]
    pub benefit_sharing_model: Option<BenefitSharingModel>,
    pub manager_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub terms_accepted: bool,
    pub publish_to_community: bool,
    pub attachments: Vec<Attachment>,
}

impl ProjectDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one update, overwriting the previous value
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(v) => self.name = v,
            FieldUpdate::Description(v) => self.description = v,
            FieldUpdate::Location(v) => self.location = v,
            FieldUpdate::PartnershipType(v) => self.partnership_type = v,
            FieldUpdate::LandSize(v) => self.land_size = v,
            FieldUpdate::Duration(v) => self.duration = v,
            FieldUpdate::ExpectedParticipants(v) => self.expected_participants = v,
            FieldUpdate::ParticipantContributions(v) => self.participant_contributions = v,
            FieldUpdate::AvailableResources(v) => self.available_resources = v,
            FieldUpdate::ParticipationModality(v) => self.participation_modality = v,
            FieldUpdate::BenefitSharingModel(v) => self.benefit_sharing_model = v,
            FieldUpdate::ManagerName(v) => self.manager_name = v,
            FieldUpdate::ContactEmail(v) => self.contact_email = v,
            FieldUpdate::ContactPhone(v) => self.contact_phone = v,
            FieldUpdate::TermsAccepted(v) => self.terms_accepted = v,
            FieldUpdate::PublishToCommunity(v) => self.publish_to_community = v,
            FieldUpdate::Attachments(v) => self.attachments = clamp_attachments(v),
        }
    }

    /// Shallow merge: every update in the patch overwrites its field
    pub fn merge(&mut self, patch: &DraftPatch) {
        for update in patch.updates() {
            self.apply(update.clone());
        }
    }

    /// Current value of a field as an update, used to seed panels
    pub fn value(&self, field: DraftField) -> FieldUpdate {
        match field {
            DraftField::Name => FieldUpdate::Name(self.name.clone()),
            DraftField::Description => FieldUpdate::Description(self.description.clone()),
            DraftField::Location => FieldUpdate::Location(self.location.clone()),
            DraftField::PartnershipType => {
                FieldUpdate::PartnershipType(self.partnership_type.clone())
            }
            DraftField::LandSize => FieldUpdate::LandSize(self.land_size.clone()),
            DraftField::Duration => FieldUpdate::Duration(self.duration.clone()),
            DraftField::ExpectedParticipants => {
                FieldUpdate::ExpectedParticipants(self.expected_participants.clone())
            }
            DraftField::ParticipantContributions => {
                FieldUpdate::ParticipantContributions(self.participant_contributions.clone())
            }
            DraftField::AvailableResources => {
                FieldUpdate::AvailableResources(self.available_resources.clone())
            }
            DraftField::ParticipationModality => {
                FieldUpdate::ParticipationModality(self.participation_modality)
            }
            DraftField::BenefitSharingModel => {
                FieldUpdate::BenefitSharingModel(self.benefit_sharing_model)
            }
            DraftField::ManagerName => FieldUpdate::ManagerName(self.manager_name.clone()),
            DraftField::ContactEmail => FieldUpdate::ContactEmail(self.contact_email.clone()),
            DraftField::ContactPhone => FieldUpdate::ContactPhone(self.contact_phone.clone()),
            DraftField::TermsAccepted => FieldUpdate::TermsAccepted(self.terms_accepted),
            DraftField::PublishToCommunity => {
                FieldUpdate::PublishToCommunity(self.publish_to_community)
            }
            DraftField::Attachments => FieldUpdate::Attachments(self.attachments.clone()),
        }
    }

    /// Every field owned by `step`, with the draft's current values
    pub fn patch_for(&self, step: WizardStep) -> DraftPatch {
        step.fields().iter().map(|f| self.value(*f)).collect()
    }

    /// Scalar fields as (wire name, value) pairs, in declaration order.
    /// Unset choices are empty strings and booleans are "true"/"false".
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        DraftField::all()
            .iter()
            .filter(|f| **f != DraftField::Attachments)
            .map(|f| {
                let value = match self.value(*f) {
                    FieldUpdate::ParticipationModality(m) => {
                        m.map(|m| m.label().to_string()).unwrap_or_default()
                    }
                    FieldUpdate::BenefitSharingModel(b) => {
                        b.map(|b| b.label().to_string()).unwrap_or_default()
                    }
                    FieldUpdate::TermsAccepted(b) | FieldUpdate::PublishToCommunity(b) => {
                        b.to_string()
                    }
                    other => other.as_text().unwrap_or_default().to_string(),
                };
                (f.key(), value)
            })
            .collect()
    }
}

/// Serialize `None` as "" and read "" back as `None`
mod empty_as_none {
    use super::*;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        match raw {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(ref s) if s.is_empty() => Ok(None),
            other => T::deserialize(other)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// A project as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub partnership_type: String,
    #[serde(default)]
    pub expected_participants: String,
    #[serde(default)]
    pub manager_name: String,
    #[serde(default)]
    pub publish_to_community: bool,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
