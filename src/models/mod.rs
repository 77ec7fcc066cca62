// ABOUTME: Core data models for Aparcería projects, drafts and signed-in users

pub mod project;
pub mod user;

pub use project::{
    ACCEPTED_MIME_TYPES, Attachment, BenefitSharingModel, DraftField, DraftPatch, FieldUpdate,
    MAX_ATTACHMENT_BYTES, MAX_ATTACHMENTS, ParticipationModality, Project, ProjectDraft,
    clamp_attachments,
};
pub use user::{Role, UserProfile};
