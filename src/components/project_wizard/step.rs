// ABOUTME: The five steps of the project creation wizard
// Field ownership, navigation order and per-step validation rules

use thiserror::Error;

use crate::models::{DraftField, DraftPatch, FieldUpdate};

/// Steps in the project creation wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    General,
    Sizing,
    Resources,
    Participation,
    Contact,
}

/// A step refused to hand over its values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub step: WizardStep,
    pub missing: Vec<DraftField>,
    pub message: &'static str,
}

impl WizardStep {
    /// Get all steps in order
    pub fn all() -> &'static [WizardStep] {
        &[
            Self::General,
            Self::Sizing,
            Self::Resources,
            Self::Participation,
            Self::Contact,
        ]
    }

    /// Zero-based position
    pub fn index(&self) -> usize {
        match self {
            Self::General => 0,
            Self::Sizing => 1,
            Self::Resources => 2,
            Self::Participation => 3,
            Self::Contact => 4,
        }
    }

    /// Get the step number (1-indexed for display)
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    pub fn total() -> usize {
        5
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::General => "Información general",
            Self::Sizing => "Dimensiones",
            Self::Resources => "Recursos y aportes",
            Self::Participation => "Modelo de participación",
            Self::Contact => "Contacto y publicación",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::General => "¿Qué proyecto quieres crear?",
            Self::Sizing => "Terreno, duración y participantes",
            Self::Resources => "Qué aporta cada parte",
            Self::Participation => "Cómo se participa y se reparte",
            Self::Contact => "Quién responde por el proyecto",
        }
    }

    /// Get the next step, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::General => Some(Self::Sizing),
            Self::Sizing => Some(Self::Resources),
            Self::Resources => Some(Self::Participation),
            Self::Participation => Some(Self::Contact),
            Self::Contact => None,
        }
    }

    /// Get the previous step, if any
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::General => None,
            Self::Sizing => Some(Self::General),
            Self::Resources => Some(Self::Sizing),
            Self::Participation => Some(Self::Resources),
            Self::Contact => Some(Self::Participation),
        }
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    /// Fields this step owns, in form order
    pub fn fields(&self) -> &'static [DraftField] {
        match self {
            Self::General => &[
                DraftField::Name,
                DraftField::Description,
                DraftField::Location,
                DraftField::PartnershipType,
            ],
            Self::Sizing => &[
                DraftField::LandSize,
                DraftField::Duration,
                DraftField::ExpectedParticipants,
            ],
            Self::Resources => &[
                DraftField::ParticipantContributions,
                DraftField::AvailableResources,
            ],
            Self::Participation => &[
                DraftField::ParticipationModality,
                DraftField::BenefitSharingModel,
            ],
            Self::Contact => &[
                DraftField::ManagerName,
                DraftField::ContactEmail,
                DraftField::ContactPhone,
                DraftField::TermsAccepted,
                DraftField::PublishToCommunity,
                DraftField::Attachments,
            ],
        }
    }

    /// Fields that must be non-empty before Next.
    /// General, Resources and Participation advance unconditionally.
    pub fn required_fields(&self) -> &'static [DraftField] {
        match self {
            Self::Sizing => &[
                DraftField::LandSize,
                DraftField::Duration,
                DraftField::ExpectedParticipants,
            ],
            Self::Contact => &[DraftField::ManagerName, DraftField::ContactEmail],
            Self::General | Self::Resources | Self::Participation => &[],
        }
    }

    /// Whether the panel pushes every edit to the controller, not only on Next
    pub fn reports_live(&self) -> bool {
        matches!(self, Self::Contact)
    }

    fn alert_message(&self) -> &'static str {
        match self {
            Self::Contact => "El nombre del responsable y el correo de contacto son obligatorios.",
            _ => "Por favor completa todos los campos antes de continuar.",
        }
    }

    /// Check the panel's values against this step's required fields
    pub fn validate(&self, values: &DraftPatch) -> Result<(), ValidationError> {
        let missing: Vec<DraftField> = self
            .required_fields()
            .iter()
            .copied()
            .filter(|field| {
                values
                    .get(*field)
                    .and_then(FieldUpdate::as_text)
                    .map_or(true, str::is_empty)
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                step: *self,
                missing,
                message: self.alert_message(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_navigation() {
        let step = WizardStep::General;
        assert_eq!(step.next(), Some(WizardStep::Sizing));
        assert_eq!(step.previous(), None);

        let step = WizardStep::Contact;
        assert_eq!(step.next(), None);
        assert_eq!(step.previous(), Some(WizardStep::Participation));
        assert!(step.is_last());
    }

    #[test]
    fn test_step_numbers() {
        assert_eq!(WizardStep::General.number(), 1);
        assert_eq!(WizardStep::Contact.number(), 5);
        assert_eq!(WizardStep::total(), WizardStep::all().len());
        for (i, step) in WizardStep::all().iter().enumerate() {
            assert_eq!(step.index(), i);
        }
    }

    #[test]
    fn test_sizing_requires_all_three() {
        let full = DraftPatch::new()
            .with(FieldUpdate::LandSize("5 ha".into()))
            .with(FieldUpdate::Duration("12 meses".into()))
            .with(FieldUpdate::ExpectedParticipants("4".into()));
        assert!(WizardStep::Sizing.validate(&full).is_ok());

        let partial = DraftPatch::new()
            .with(FieldUpdate::LandSize("5 ha".into()))
            .with(FieldUpdate::Duration(String::new()))
            .with(FieldUpdate::ExpectedParticipants("4".into()));
        let err = WizardStep::Sizing.validate(&partial).unwrap_err();
        assert_eq!(err.missing, vec![DraftField::Duration]);
        assert_eq!(err.step, WizardStep::Sizing);
    }

    #[test]
    fn test_contact_blocks_on_empty_manager() {
        let values = DraftPatch::new()
            .with(FieldUpdate::ManagerName(String::new()))
            .with(FieldUpdate::ContactEmail("ana@example.com".into()));
        let err = WizardStep::Contact.validate(&values).unwrap_err();
        assert_eq!(err.missing, vec![DraftField::ManagerName]);
    }

    #[test]
    fn test_whitespace_is_a_value() {
        let values = DraftPatch::new()
            .with(FieldUpdate::LandSize(" ".into()))
            .with(FieldUpdate::Duration("12".into()))
            .with(FieldUpdate::ExpectedParticipants("4".into()));
        assert!(WizardStep::Sizing.validate(&values).is_ok());
    }

    #[test]
    fn test_unvalidated_steps_accept_empty_values() {
        for step in [
            WizardStep::General,
            WizardStep::Resources,
            WizardStep::Participation,
        ] {
            assert!(step.validate(&DraftPatch::new()).is_ok(), "{step:?}");
        }
    }

    #[test]
    fn test_only_contact_reports_live() {
        let live: Vec<_> = WizardStep::all()
            .iter()
            .filter(|s| s.reports_live())
            .collect();
        assert_eq!(live, vec![&WizardStep::Contact]);
    }
}
