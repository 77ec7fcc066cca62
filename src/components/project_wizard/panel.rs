// ABOUTME: Step panel holding the editable form for one wizard step
// Seeds from the draft, edits locally and yields a patch only on confirm

use std::path::PathBuf;

use super::step::{ValidationError, WizardStep};
use crate::models::{
    Attachment, BenefitSharingModel, DraftField, DraftPatch, FieldUpdate, ParticipationModality,
    ProjectDraft, clamp_attachments,
};

/// Single-line text input with a cursor counted in characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn from_string(text: &str) -> Self {
        Self {
            value: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Editable state of one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(TextInput),
    /// Index into the field's option list, `None` while unselected
    Choice(Option<usize>),
    Toggle(bool),
    /// Selected files plus the path being typed into the picker
    Files {
        selected: Vec<Attachment>,
        input: TextInput,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub field: DraftField,
    pub input: FieldInput,
}

/// Labels for a choice field, empty for other kinds
pub fn choice_labels(field: DraftField) -> Vec<&'static str> {
    match field {
        DraftField::ParticipationModality => ParticipationModality::all()
            .iter()
            .map(ParticipationModality::label)
            .collect(),
        DraftField::BenefitSharingModel => BenefitSharingModel::all()
            .iter()
            .map(BenefitSharingModel::label)
            .collect(),
        _ => Vec::new(),
    }
}

impl FormField {
    fn from_value(value: FieldUpdate) -> Self {
        let field = value.field();
        let input = match value {
            FieldUpdate::ParticipationModality(m) => FieldInput::Choice(
                m.and_then(|m| ParticipationModality::all().iter().position(|o| *o == m)),
            ),
            FieldUpdate::BenefitSharingModel(b) => FieldInput::Choice(
                b.and_then(|b| BenefitSharingModel::all().iter().position(|o| *o == b)),
            ),
            FieldUpdate::TermsAccepted(v) | FieldUpdate::PublishToCommunity(v) => {
                FieldInput::Toggle(v)
            }
            FieldUpdate::Attachments(selected) => FieldInput::Files {
                selected,
                input: TextInput::default(),
            },
            other => FieldInput::Text(TextInput::from_string(other.as_text().unwrap_or_default())),
        };
        Self { field, input }
    }

    fn to_update(&self) -> Option<FieldUpdate> {
        let update = match (&self.input, self.field) {
            (FieldInput::Choice(idx), DraftField::ParticipationModality) => {
                FieldUpdate::ParticipationModality(
                    idx.and_then(|i| ParticipationModality::all().get(i).copied()),
                )
            }
            (FieldInput::Choice(idx), DraftField::BenefitSharingModel) => {
                FieldUpdate::BenefitSharingModel(
                    idx.and_then(|i| BenefitSharingModel::all().get(i).copied()),
                )
            }
            (FieldInput::Toggle(v), DraftField::TermsAccepted) => FieldUpdate::TermsAccepted(*v),
            (FieldInput::Toggle(v), DraftField::PublishToCommunity) => {
                FieldUpdate::PublishToCommunity(*v)
            }
            (FieldInput::Files { selected, .. }, DraftField::Attachments) => {
                FieldUpdate::Attachments(selected.clone())
            }
            (FieldInput::Text(text), field) => {
                return FieldUpdate::text(field, text.value().to_string());
            }
            _ => return None,
        };
        Some(update)
    }

    /// Human readable value for summaries
    pub fn display_value(&self) -> String {
        match &self.input {
            FieldInput::Text(t) => t.value().to_string(),
            FieldInput::Choice(idx) => idx
                .and_then(|i| choice_labels(self.field).get(i).copied())
                .unwrap_or("Selecciona una opción")
                .to_string(),
            FieldInput::Toggle(v) => (if *v { "Sí" } else { "No" }).to_string(),
            FieldInput::Files { selected, .. } => format!("{} archivo(s)", selected.len()),
        }
    }
}

/// The form for one wizard step
#[derive(Debug, Clone)]
pub struct StepPanel {
    step: WizardStep,
    fields: Vec<FormField>,
    focus: usize,
}

impl StepPanel {
    /// Build the panel for `step`, pre-filled from `initial`
    pub fn mount(step: WizardStep, initial: &ProjectDraft) -> Self {
        Self {
            step,
            fields: Self::seed(step, initial),
            focus: 0,
        }
    }

    fn seed(step: WizardStep, initial: &ProjectDraft) -> Vec<FormField> {
        initial
            .patch_for(step)
            .updates()
            .iter()
            .cloned()
            .map(FormField::from_value)
            .collect()
    }

    /// Re-seed from new initial values, keeping focus where it was
    pub fn reload(&mut self, initial: &ProjectDraft) {
        self.fields = Self::seed(self.step, initial);
        self.focus = self.focus.min(self.fields.len().saturating_sub(1));
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Focus a field by identity; returns false if this panel doesn't own it
    pub fn focus_field(&mut self, field: DraftField) -> bool {
        match self.fields.iter().position(|f| f.field == field) {
            Some(idx) => {
                self.focus = idx;
                true
            }
            None => false,
        }
    }

    /// Every owned field with its current edited value
    pub fn values(&self) -> DraftPatch {
        self.fields.iter().filter_map(FormField::to_update).collect()
    }

    /// Validate and hand over the values. This is the panel's Next.
    pub fn confirm(&self) -> Result<DraftPatch, ValidationError> {
        let values = self.values();
        self.step.validate(&values)?;
        Ok(values)
    }

    fn focused_text(&mut self) -> Option<&mut TextInput> {
        match self.fields.get_mut(self.focus).map(|f| &mut f.input) {
            Some(FieldInput::Text(t)) => Some(t),
            Some(FieldInput::Files { input, .. }) => Some(input),
            _ => None,
        }
    }

    /// Type into the focused field. Returns true when a value changed.
    pub fn input_char(&mut self, ch: char) -> bool {
        match self.fields.get_mut(self.focus).map(|f| &mut f.input) {
            Some(FieldInput::Text(t)) => {
                t.insert_char(ch);
                true
            }
            Some(FieldInput::Files { input, .. }) => {
                // Path typing isn't a selection until applied
                input.insert_char(ch);
                false
            }
            Some(FieldInput::Toggle(v)) if ch == ' ' => {
                *v = !*v;
                true
            }
            _ => false,
        }
    }

    pub fn backspace(&mut self) -> bool {
        let is_text = matches!(self.focused().map(|f| &f.input), Some(FieldInput::Text(_)));
        self.focused_text().is_some_and(TextInput::backspace) && is_text
    }

    pub fn delete(&mut self) -> bool {
        let is_text = matches!(self.focused().map(|f| &f.input), Some(FieldInput::Text(_)));
        self.focused_text().is_some_and(TextInput::delete) && is_text
    }

    /// Left/right: move the cursor in text fields, cycle options in choices
    pub fn move_left(&mut self) -> bool {
        if let Some(t) = self.focused_text() {
            t.move_left();
            return false;
        }
        self.cycle_choice(false)
    }

    pub fn move_right(&mut self) -> bool {
        if let Some(t) = self.focused_text() {
            t.move_right();
            return false;
        }
        self.cycle_choice(true)
    }

    pub fn move_home(&mut self) {
        if let Some(t) = self.focused_text() {
            t.move_home();
        }
    }

    pub fn move_end(&mut self) {
        if let Some(t) = self.focused_text() {
            t.move_end();
        }
    }

    /// Unselected -> first -> ... -> last -> unselected
    pub fn cycle_choice(&mut self, forward: bool) -> bool {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return false;
        };
        let len = choice_labels(field.field).len();
        let FieldInput::Choice(selected) = &mut field.input else {
            return false;
        };
        *selected = match (*selected, forward) {
            (None, true) => Some(0),
            (None, false) => len.checked_sub(1),
            (Some(i), true) if i + 1 < len => Some(i + 1),
            (Some(_), true) => None,
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
        true
    }

    pub fn toggle(&mut self) -> bool {
        match self.fields.get_mut(self.focus).map(|f| &mut f.input) {
            Some(FieldInput::Toggle(v)) => {
                *v = !*v;
                true
            }
            _ => false,
        }
    }

    /// Replace the attachment selection, keeping the first ten files
    pub fn select_files(&mut self, paths: Vec<PathBuf>) -> bool {
        let Some(FieldInput::Files { selected, .. }) = self
            .fields
            .iter_mut()
            .find(|f| f.field == DraftField::Attachments)
            .map(|f| &mut f.input)
        else {
            return false;
        };
        *selected = clamp_attachments(paths.into_iter().map(Attachment::from_path).collect());
        true
    }

    /// Turn the comma-separated paths typed in the picker into a selection
    pub fn apply_file_input(&mut self) -> bool {
        let Some(FieldInput::Files { input, .. }) =
            self.fields.get_mut(self.focus).map(|f| &mut f.input)
        else {
            return false;
        };
        let paths: Vec<PathBuf> = input
            .value()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect();
        input.clear();
        if paths.is_empty() {
            return false;
        }
        self.select_files(paths)
    }

    /// Whether the focused field is the attachment picker
    pub fn is_file_picker_focused(&self) -> bool {
        matches!(
            self.focused().map(|f| &f.input),
            Some(FieldInput::Files { .. })
        )
    }
}
