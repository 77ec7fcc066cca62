// ABOUTME: Event handling system for keyboard input and app actions

use crate::app::{
    AppState,
    state::View,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    // Project board events
    NextProject,
    PreviousProject,
    RefreshProjects,
    NewProject,
    OpenAdmin,
    BackToProjects,
    // Wizard events
    WizardNext,
    WizardPrevious,
    WizardCancel,
    WizardFocusNext,
    WizardFocusPrev,
    WizardInputChar(char),
    WizardBackspace,
    WizardDelete,
    WizardCursorLeft,
    WizardCursorRight,
    WizardCursorHome,
    WizardCursorEnd,
    WizardApplyFiles,
    WizardDismissAlert,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        // Ctrl+C always quits
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            return Some(AppEvent::Quit);
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        match state.current_view {
            View::ProjectWizard => Self::handle_wizard_keys(key_event, state),
            View::Projects => Self::handle_board_keys(key_event, false),
            View::AdminProjects => Self::handle_board_keys(key_event, true),
        }
    }

    fn handle_board_keys(key_event: KeyEvent, admin: bool) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char('q') => Some(AppEvent::Quit),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::NextProject),
            KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::PreviousProject),
            KeyCode::Char('r') => Some(AppEvent::RefreshProjects),
            KeyCode::Char('n') => Some(AppEvent::NewProject),
            KeyCode::Char('a') if !admin => Some(AppEvent::OpenAdmin),
            KeyCode::Esc | KeyCode::Char('b') if admin => Some(AppEvent::BackToProjects),
            _ => None,
        }
    }

    fn handle_wizard_keys(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        let Some(wizard) = state.wizard_state.as_ref() else {
            return Some(AppEvent::BackToProjects);
        };

        // Blocking alert: only dismissal gets through
        if wizard.has_alert() {
            return match key_event.code {
                KeyCode::Enter | KeyCode::Esc => Some(AppEvent::WizardDismissAlert),
                _ => None,
            };
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return match key_event.code {
                KeyCode::Char('n') => Some(AppEvent::WizardNext),
                KeyCode::Char('p') => Some(AppEvent::WizardPrevious),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Esc => Some(AppEvent::WizardCancel),
            KeyCode::Tab | KeyCode::Down => Some(AppEvent::WizardFocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(AppEvent::WizardFocusPrev),
            KeyCode::Left => Some(AppEvent::WizardCursorLeft),
            KeyCode::Right => Some(AppEvent::WizardCursorRight),
            KeyCode::Home => Some(AppEvent::WizardCursorHome),
            KeyCode::End => Some(AppEvent::WizardCursorEnd),
            KeyCode::Backspace => Some(AppEvent::WizardBackspace),
            KeyCode::Delete => Some(AppEvent::WizardDelete),
            KeyCode::Enter if wizard.panel().is_file_picker_focused() => {
                Some(AppEvent::WizardApplyFiles)
            }
            KeyCode::Enter => Some(AppEvent::WizardNext),
            KeyCode::Char(ch) => Some(AppEvent::WizardInputChar(ch)),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        debug!("Processing event {:?}", event);
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::NextProject => state.next_project(),
            AppEvent::PreviousProject => state.previous_project(),
            AppEvent::RefreshProjects => {
                if let Some(scope) = state.scope_for_view() {
                    state.request_projects(scope);
                }
            }
            AppEvent::NewProject => state.open_wizard(),
            AppEvent::OpenAdmin => {
                state.navigate_to(View::AdminProjects);
            }
            AppEvent::BackToProjects => {
                state.navigate_to(View::Projects);
            }
            AppEvent::WizardNext => state.wizard_next(),
            AppEvent::WizardPrevious => state.wizard_previous(),
            AppEvent::WizardCancel => state.cancel_wizard(),
            wizard_event => {
                let Some(wizard) = state.wizard_state.as_mut() else {
                    return;
                };
                match wizard_event {
                    AppEvent::WizardFocusNext => wizard.focus_next(),
                    AppEvent::WizardFocusPrev => wizard.focus_prev(),
                    AppEvent::WizardInputChar(ch) => wizard.input_char(ch),
                    AppEvent::WizardBackspace => wizard.backspace(),
                    AppEvent::WizardDelete => wizard.delete(),
                    AppEvent::WizardCursorLeft => wizard.move_left(),
                    AppEvent::WizardCursorRight => wizard.move_right(),
                    AppEvent::WizardCursorHome => wizard.move_home(),
                    AppEvent::WizardCursorEnd => wizard.move_end(),
                    AppEvent::WizardApplyFiles => wizard.apply_file_input(),
                    AppEvent::WizardDismissAlert => wizard.dismiss_alert(),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{Role, UserProfile};
    use crate::session::SessionContext;

    fn state() -> AppState {
        AppState::new(
            AppConfig::default(),
            SessionContext::authenticated(
                "tok",
                UserProfile {
                    id: "u1".into(),
                    name: "Ana".into(),
                    email: "ana@example.com".into(),
                    role: Role::Member,
                },
            ),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_board_keys() {
        let mut state = state();
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('n')), &mut state),
            Some(AppEvent::NewProject)
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('q')), &mut state),
            Some(AppEvent::Quit)
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('a')), &mut state),
            Some(AppEvent::OpenAdmin)
        );
    }

    #[test]
    fn test_wizard_typing_is_not_a_shortcut() {
        let mut state = state();
        state.open_wizard();
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('q')), &mut state),
            Some(AppEvent::WizardInputChar('q'))
        );
        assert_eq!(
            EventHandler::handle_key_event(ctrl('n'), &mut state),
            Some(AppEvent::WizardNext)
        );
        assert_eq!(
            EventHandler::handle_key_event(ctrl('p'), &mut state),
            Some(AppEvent::WizardPrevious)
        );
    }

    #[test]
    fn test_alert_swallows_other_keys() {
        let mut state = state();
        state.open_wizard();
        if let Some(wizard) = state.wizard_state.as_mut() {
            wizard.alert = Some("Faltan campos".into());
        }

        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('x')), &mut state),
            None
        );
        assert_eq!(EventHandler::handle_key_event(ctrl('n'), &mut state), None);

        let event = EventHandler::handle_key_event(key(KeyCode::Enter), &mut state);
        assert_eq!(event, Some(AppEvent::WizardDismissAlert));
        EventHandler::process_event(AppEvent::WizardDismissAlert, &mut state);
        assert!(!state.wizard_state.as_ref().unwrap().has_alert());
    }

    #[test]
    fn test_ctrl_c_quits_from_wizard() {
        let mut state = state();
        state.open_wizard();
        let event = EventHandler::handle_key_event(ctrl('c'), &mut state).unwrap();
        EventHandler::process_event(event, &mut state);
        assert!(state.should_quit);
    }
}
