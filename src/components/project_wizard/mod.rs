// ABOUTME: Project creation wizard: five step panels feeding one accumulated draft
// Submitted once, from the last step, through the project service

pub mod component;
pub mod controller;
pub mod panel;
pub mod state;
pub mod step;

pub use component::ProjectWizardComponent;
pub use controller::{Advance, SubmissionStatus, WizardController};
pub use panel::{FieldInput, FormField, StepPanel, TextInput};
pub use state::ProjectWizardState;
pub use step::{ValidationError, WizardStep};
