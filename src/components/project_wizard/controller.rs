// ABOUTME: Wizard controller owning the accumulated draft and the current step
// Forward/back navigation and the one-shot terminal submission

use tracing::{debug, info};

use super::panel::StepPanel;
use super::step::{ValidationError, WizardStep};
use crate::models::{DraftPatch, ProjectDraft};

/// Where the terminal submission stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// Nothing sent yet, or the last attempt failed
    Idle,
    /// The draft was handed to the submission boundary and no answer arrived yet
    InFlight,
    /// The backend accepted the draft; the wizard is finished
    Submitted,
}

/// Outcome of `WizardController::advance`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved forward to this step
    Moved(WizardStep),
    /// Last step confirmed: submit this draft
    Submit(ProjectDraft),
    /// A submission is in flight or already done
    Ignored,
}

#[derive(Debug, Clone)]
pub struct WizardController {
    current_step: WizardStep,
    draft: ProjectDraft,
    status: SubmissionStatus,
}

impl WizardController {
    pub fn new() -> Self {
        Self::with_initial(ProjectDraft::default())
    }

    /// Start at the first step with caller-supplied values
    pub fn with_initial(draft: ProjectDraft) -> Self {
        Self {
            current_step: WizardStep::General,
            draft,
            status: SubmissionStatus::Idle,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    pub fn into_draft(self) -> ProjectDraft {
        self.draft
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::InFlight
    }

    pub fn is_submitted(&self) -> bool {
        self.status == SubmissionStatus::Submitted
    }

    /// Merge a confirmed panel's values and move forward.
    /// On the last step the merged draft is handed out for submission instead.
    pub fn advance(&mut self, patch: DraftPatch) -> Advance {
        if self.status != SubmissionStatus::Idle {
            debug!("Ignoring advance while submission is {:?}", self.status);
            return Advance::Ignored;
        }

        self.draft.merge(&patch);

        match self.current_step.next() {
            Some(next) => {
                debug!("Wizard advancing {:?} -> {:?}", self.current_step, next);
                self.current_step = next;
                Advance::Moved(next)
            }
            None => {
                info!("Wizard completed, submitting project '{}'", self.draft.name);
                self.status = SubmissionStatus::InFlight;
                Advance::Submit(self.draft.clone())
            }
        }
    }

    /// Step back one panel. The draft is left untouched.
    /// Refused once the draft has been handed out for submission.
    pub fn retreat(&mut self) -> bool {
        if self.status != SubmissionStatus::Idle {
            return false;
        }
        match self.current_step.previous() {
            Some(prev) => {
                debug!("Wizard retreating {:?} -> {:?}", self.current_step, prev);
                self.current_step = prev;
                true
            }
            None => false,
        }
    }

    /// Merge values without moving
    pub fn update_field(&mut self, patch: DraftPatch) {
        if self.is_submitted() {
            return;
        }
        self.draft.merge(&patch);
    }

    /// The submission boundary reported an error; Next may be pressed again
    pub fn submission_failed(&mut self) {
        if self.status == SubmissionStatus::InFlight {
            self.status = SubmissionStatus::Idle;
        }
    }

    pub fn submission_succeeded(&mut self) {
        self.status = SubmissionStatus::Submitted;
    }

    /// Run every step's panel over `source` in order, as if a user had
    /// typed those values and pressed Next on each step.
    pub fn complete_from(source: &ProjectDraft) -> Result<ProjectDraft, ValidationError> {
        let mut controller = Self::new();
        loop {
            let panel = StepPanel::mount(controller.current_step(), source);
            let patch = panel.confirm()?;
            match controller.advance(patch) {
                Advance::Moved(_) => continue,
                Advance::Submit(draft) => return Ok(draft),
                Advance::Ignored => return Ok(controller.into_draft()),
            }
        }
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}
