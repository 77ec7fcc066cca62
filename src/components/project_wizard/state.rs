// ABOUTME: Wizard view state combining the controller, the active panel and the alert
// Routes panel edits and Next/Previous into the controller

use std::path::PathBuf;

use tracing::{debug, warn};

use super::controller::{Advance, SubmissionStatus, WizardController};
use super::panel::StepPanel;
use super::step::WizardStep;
use crate::models::ProjectDraft;

#[derive(Debug)]
pub struct ProjectWizardState {
    controller: WizardController,
    panel: StepPanel,
    /// Blocking alert; while set only dismissal is accepted
    pub alert: Option<String>,
    /// Last submission error, shown under the form
    pub submit_error: Option<String>,
}

impl ProjectWizardState {
    pub fn new() -> Self {
        Self::with_initial(ProjectDraft::default())
    }

    pub fn with_initial(initial: ProjectDraft) -> Self {
        let controller = WizardController::with_initial(initial);
        let panel = StepPanel::mount(controller.current_step(), controller.draft());
        Self {
            controller,
            panel,
            alert: None,
            submit_error: None,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.controller.current_step()
    }

    pub fn panel(&self) -> &StepPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut StepPanel {
        &mut self.panel
    }

    pub fn draft(&self) -> &ProjectDraft {
        self.controller.draft()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.controller.status()
    }

    pub fn has_alert(&self) -> bool {
        self.alert.is_some()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn remount(&mut self) {
        self.panel = StepPanel::mount(self.controller.current_step(), self.controller.draft());
    }

    /// Push the panel's values to the controller when its step reports live
    fn after_edit(&mut self, changed: bool) {
        if changed && self.panel.step().reports_live() {
            self.controller.update_field(self.panel.values());
        }
    }

    /// Confirm the active panel. Returns the draft to submit when the
    /// last step was confirmed.
    pub fn next(&mut self) -> Option<ProjectDraft> {
        if self.controller.is_submitting() {
            debug!("Next pressed while submission in flight");
            return None;
        }

        let patch = match self.panel.confirm() {
            Ok(patch) => patch,
            Err(e) => {
                warn!(step = ?e.step, missing = ?e.missing, "Wizard step validation failed");
                self.alert = Some(e.to_string());
                return None;
            }
        };

        match self.controller.advance(patch) {
            Advance::Moved(_) => {
                self.remount();
                None
            }
            Advance::Submit(draft) => {
                self.submit_error = None;
                Some(draft)
            }
            Advance::Ignored => None,
        }
    }

    /// Go back one step, re-seeding the earlier panel from the draft
    pub fn previous(&mut self) -> bool {
        if self.controller.retreat() {
            self.remount();
            true
        } else {
            false
        }
    }

    pub fn focus_next(&mut self) {
        self.panel.focus_next();
    }

    pub fn focus_prev(&mut self) {
        self.panel.focus_prev();
    }

    pub fn move_home(&mut self) {
        self.panel.move_home();
    }

    pub fn move_end(&mut self) {
        self.panel.move_end();
    }

    pub fn input_char(&mut self, ch: char) {
        let changed = self.panel.input_char(ch);
        self.after_edit(changed);
    }

    pub fn backspace(&mut self) {
        let changed = self.panel.backspace();
        self.after_edit(changed);
    }

    pub fn delete(&mut self) {
        let changed = self.panel.delete();
        self.after_edit(changed);
    }

    pub fn move_left(&mut self) {
        let changed = self.panel.move_left();
        self.after_edit(changed);
    }

    pub fn move_right(&mut self) {
        let changed = self.panel.move_right();
        self.after_edit(changed);
    }

    pub fn toggle(&mut self) {
        let changed = self.panel.toggle();
        self.after_edit(changed);
    }

    pub fn select_files(&mut self, paths: Vec<PathBuf>) {
        let changed = self.panel.select_files(paths);
        self.after_edit(changed);
    }

    pub fn apply_file_input(&mut self) {
        let changed = self.panel.apply_file_input();
        self.after_edit(changed);
    }

    pub fn submission_failed(&mut self, message: String) {
        self.controller.submission_failed();
        self.submit_error = Some(message);
    }

    pub fn submission_succeeded(&mut self) {
        self.controller.submission_succeeded();
        self.submit_error = None;
    }
}

impl Default for ProjectWizardState {
    fn default() -> Self {
        Self::new()
    }
}
