// ABOUTME: Integration tests for the project wizard controller and step panels
// Drives the public library API the same way the TUI and the CLI do

use pretty_assertions::assert_eq;
use std::path::PathBuf;

use aparceria::components::project_wizard::{
    Advance, StepPanel, SubmissionStatus, WizardController, WizardStep,
};
use aparceria::models::{
    BenefitSharingModel, DraftField, DraftPatch, FieldUpdate, MAX_ATTACHMENTS,
    ParticipationModality, ProjectDraft,
};

fn general() -> DraftPatch {
    DraftPatch::new()
        .with(FieldUpdate::Name("Finca Sol".into()))
        .with(FieldUpdate::Description("desc".into()))
        .with(FieldUpdate::Location("Huila".into()))
        .with(FieldUpdate::PartnershipType("Agrícola".into()))
}

fn sizing() -> DraftPatch {
    DraftPatch::new()
        .with(FieldUpdate::LandSize("5 ha".into()))
        .with(FieldUpdate::Duration("12 meses".into()))
        .with(FieldUpdate::ExpectedParticipants("4".into()))
}

fn participation() -> DraftPatch {
    DraftPatch::new()
        .with(FieldUpdate::ParticipationModality(Some(ParticipationModality::Active)))
        .with(FieldUpdate::BenefitSharingModel(Some(BenefitSharingModel::ByContribution)))
}

fn contact() -> DraftPatch {
    DraftPatch::new()
        .with(FieldUpdate::ManagerName("Ana Ruiz".into()))
        .with(FieldUpdate::ContactEmail("ana@example.com".into()))
}

/// Confirm `patch` through the real step validation, then advance
fn confirm(controller: &mut WizardController, patch: DraftPatch) -> Result<Advance, String> {
    controller
        .current_step()
        .validate(&patch)
        .map_err(|e| e.to_string())?;
    Ok(controller.advance(patch))
}

/// Patch that passes validation on `step`
fn valid_patch(step: WizardStep) -> DraftPatch {
    match step {
        WizardStep::General => general(),
        WizardStep::Sizing => sizing(),
        WizardStep::Resources => DraftPatch::new(),
        WizardStep::Participation => participation(),
        WizardStep::Contact => contact(),
    }
}

#[test]
fn test_step_index_stays_in_bounds() {
    let mut controller = WizardController::new();
    for _ in 0..3 {
        assert!(!controller.retreat());
    }
    assert_eq!(controller.current_step(), WizardStep::General);

    for patch in [general(), sizing(), DraftPatch::new(), participation()] {
        assert!(matches!(confirm(&mut controller, patch), Ok(Advance::Moved(_))));
    }
    assert_eq!(controller.current_step(), WizardStep::Contact);
    assert_eq!(controller.current_step().number(), WizardStep::total());
}

#[test]
fn test_mixed_navigation_never_leaves_range() {
    // true = Next, false = Previous
    let sequences: [&[bool]; 4] = [
        &[false, false, false, true, false, false, true, true],
        &[true, true, false, true, true, false, false, true, true, true, false, true],
        &[true, true, true, true, false, true, false, false, true, true, true],
        &[false, true, false, true, true, true, true, true, true, true, false],
    ];

    for sequence in sequences {
        let mut controller = WizardController::new();
        let mut expected: usize = 0;
        for &forward in sequence {
            if controller.status() != SubmissionStatus::Idle {
                break;
            }
            if forward {
                let step = controller.current_step();
                match confirm(&mut controller, valid_patch(step)).unwrap() {
                    Advance::Moved(next) => {
                        expected += 1;
                        assert_eq!(next.index(), expected);
                    }
                    Advance::Submit(_) => assert_eq!(expected, 4),
                    Advance::Ignored => panic!("idle controller ignored Next"),
                }
            } else {
                let moved = controller.retreat();
                assert_eq!(moved, expected > 0);
                expected = expected.saturating_sub(1);
            }
            assert_eq!(controller.current_step().index(), expected);
            assert!(controller.current_step().index() <= 4);
        }
    }
}

#[test]
fn test_advance_at_contact_stays_on_contact() {
    let mut controller = WizardController::new();
    for patch in [general(), sizing(), DraftPatch::new(), participation()] {
        confirm(&mut controller, patch).unwrap();
    }
    for _ in 0..3 {
        controller.advance(contact());
        assert_eq!(controller.current_step(), WizardStep::Contact);
        assert_eq!(controller.current_step().index(), 4);
    }
}

#[test]
fn test_previous_refused_while_in_flight() {
    let mut controller = WizardController::new();
    for patch in [general(), sizing(), DraftPatch::new(), participation()] {
        confirm(&mut controller, patch).unwrap();
    }
    assert!(matches!(controller.advance(contact()), Advance::Submit(_)));

    for _ in 0..3 {
        assert!(!controller.retreat());
    }
    assert_eq!(controller.current_step(), WizardStep::Contact);

    // A failure leaves the user on the last step, and going back works again
    controller.submission_failed();
    assert_eq!(controller.current_step(), WizardStep::Contact);
    assert!(controller.retreat());
    assert_eq!(controller.current_step(), WizardStep::Participation);
}

#[test]
fn test_back_then_forward_keeps_values() {
    let mut controller = WizardController::new();
    confirm(&mut controller, general()).unwrap();
    confirm(&mut controller, sizing()).unwrap();

    assert!(controller.retreat());
    assert!(controller.retreat());
    assert_eq!(controller.current_step(), WizardStep::General);

    // Remounted panels are pre-filled from the draft
    let panel = StepPanel::mount(WizardStep::Sizing, controller.draft());
    let values = panel.confirm().unwrap();
    assert_eq!(
        values.get(DraftField::LandSize),
        Some(&FieldUpdate::LandSize("5 ha".into()))
    );
    assert_eq!(controller.draft().name, "Finca Sol");
}

#[test]
fn test_sizing_blocks_on_blank_fields() {
    let mut controller = WizardController::new();
    confirm(&mut controller, general()).unwrap();

    let blank = DraftPatch::new()
        .with(FieldUpdate::LandSize("5 ha".into()))
        .with(FieldUpdate::Duration(String::new()))
        .with(FieldUpdate::ExpectedParticipants("4".into()));
    let err = confirm(&mut controller, blank).unwrap_err();

    assert_eq!(err, "Por favor completa todos los campos antes de continuar.");
    assert_eq!(controller.current_step(), WizardStep::Sizing);
    assert!(controller.draft().land_size.is_empty());
}

#[test]
fn test_contact_blocks_then_submits_once() {
    let mut controller = WizardController::new();
    for patch in [general(), sizing(), DraftPatch::new(), participation()] {
        confirm(&mut controller, patch).unwrap();
    }

    let no_email = DraftPatch::new().with(FieldUpdate::ManagerName("Ana Ruiz".into()));
    assert!(confirm(&mut controller, no_email).is_err());
    assert_eq!(controller.status(), SubmissionStatus::Idle);

    let first = confirm(&mut controller, contact()).unwrap();
    assert!(matches!(first, Advance::Submit(_)));
    assert_eq!(controller.status(), SubmissionStatus::InFlight);

    // A double press while in flight does not submit again
    assert_eq!(controller.advance(contact()), Advance::Ignored);

    controller.submission_succeeded();
    assert!(controller.is_submitted());
    assert!(!controller.retreat());
}

#[test]
fn test_failed_submission_can_retry() {
    let mut controller = WizardController::new();
    for patch in [general(), sizing(), DraftPatch::new(), participation()] {
        confirm(&mut controller, patch).unwrap();
    }
    assert!(matches!(controller.advance(contact()), Advance::Submit(_)));

    controller.submission_failed();
    assert_eq!(controller.status(), SubmissionStatus::Idle);
    assert!(matches!(controller.advance(contact()), Advance::Submit(_)));
}

#[test]
fn test_twelve_files_keep_first_ten() {
    let mut panel = StepPanel::mount(WizardStep::Contact, &ProjectDraft::default());
    let paths: Vec<PathBuf> = (1..=12).map(|i| PathBuf::from(format!("/tmp/doc{i}.pdf"))).collect();
    assert!(panel.select_files(paths));

    let values = panel.values();
    match values.get(DraftField::Attachments) {
        Some(FieldUpdate::Attachments(files)) => {
            assert_eq!(files.len(), MAX_ATTACHMENTS);
            assert_eq!(files[0].file_name, "doc1.pdf");
            assert_eq!(files[9].file_name, "doc10.pdf");
        }
        other => panic!("unexpected attachments value: {other:?}"),
    }
}

#[test]
fn test_finca_sol_end_to_end_payload() {
    let mut controller = WizardController::new();
    let mut submitted = Vec::new();

    for patch in [general(), sizing(), DraftPatch::new(), participation(), contact()] {
        if let Advance::Submit(draft) = confirm(&mut controller, patch).unwrap() {
            submitted.push(draft);
        }
    }

    assert_eq!(submitted.len(), 1);
    let payload = submitted[0].form_fields();
    let expected: Vec<(&str, String)> = vec![
        ("name", "Finca Sol".into()),
        ("description", "desc".into()),
        ("location", "Huila".into()),
        ("partnershipType", "Agrícola".into()),
        ("landSize", "5 ha".into()),
        ("duration", "12 meses".into()),
        ("expectedParticipants", "4".into()),
        ("participantContributions", String::new()),
        ("availableResources", String::new()),
        ("participationModality", "Participación Activa (presencial)".into()),
        ("benefitSharingModel", "Reparto equitativo según los aportes".into()),
        ("managerName", "Ana Ruiz".into()),
        ("contactEmail", "ana@example.com".into()),
        ("contactPhone", String::new()),
        ("termsAccepted", "false".into()),
        ("publishToCommunity", "false".into()),
    ];
    assert_eq!(payload, expected);

    let json = serde_json::to_value(&submitted[0]).unwrap();
    assert_eq!(json["participationModality"], "Participación Activa (presencial)");
    assert_eq!(json["contactPhone"], "");
    assert_eq!(json["attachments"], serde_json::json!([]));
}

#[test]
fn test_complete_from_matches_manual_walk() {
    let mut source = ProjectDraft::default();
    for patch in [general(), sizing(), participation(), contact()] {
        source.merge(&patch);
    }

    let draft = WizardController::complete_from(&source).unwrap();
    assert_eq!(draft, source);
}
