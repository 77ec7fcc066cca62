// ABOUTME: Application state, notifications and the async action loop for the TUI

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::guard::NavigationGuard;
use crate::api::{ApiError, ProjectScope, ProjectService};
use crate::components::project_wizard::{ProjectWizardState, SubmissionStatus};
use crate::config::AppConfig;
use crate::models::{Project, ProjectDraft};
use crate::session::SessionContext;

/// Notification system for TUI messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationType {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: String) -> Self {
        Self::with_type(message, NotificationType::Success, 3)
    }

    pub fn error(message: String) -> Self {
        Self::with_type(message, NotificationType::Error, 5)
    }

    pub fn info(message: String) -> Self {
        Self::with_type(message, NotificationType::Info, 3)
    }

    pub fn warning(message: String) -> Self {
        Self::with_type(message, NotificationType::Warning, 4)
    }

    fn with_type(message: String, notification_type: NotificationType, secs: u64) -> Self {
        Self {
            message,
            notification_type,
            created_at: Instant::now(),
            duration: Duration::from_secs(secs),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Projects,      // Community project board (landing view)
    ProjectWizard, // Five-step project creation wizard
    AdminProjects, // Back-office list of every project
}

#[derive(Debug, Clone, PartialEq)]
pub enum AsyncAction {
    LoadProjects(ProjectScope),
    SubmitProject(ProjectDraft),
}

/// Outcome of a spawned backend call, delivered back to the UI loop
#[derive(Debug)]
pub enum BackgroundResult {
    Projects {
        scope: ProjectScope,
        result: Result<Vec<Project>, ApiError>,
    },
    Submitted(Result<Project, ApiError>),
}

#[derive(Debug)]
pub struct AppState {
    pub current_view: View,
    pub should_quit: bool,
    pub help_visible: bool,
    pub session: SessionContext,
    pub app_config: AppConfig,
    pub projects: Vec<Project>,
    pub admin_projects: Vec<Project>,
    pub selected_project_index: Option<usize>,
    pub wizard_state: Option<ProjectWizardState>,
    pub notifications: Vec<Notification>,
    pub pending_async_action: Option<AsyncAction>,
    // Scope of a listing request currently in flight
    pub loading: Option<ProjectScope>,
    pub last_refresh: Option<Instant>,
}

impl AppState {
    pub fn new(app_config: AppConfig, session: SessionContext) -> Self {
        Self {
            current_view: View::Projects,
            should_quit: false,
            help_visible: false,
            session,
            app_config,
            projects: Vec::new(),
            admin_projects: Vec::new(),
            selected_project_index: None,
            wizard_state: None,
            notifications: Vec::new(),
            pending_async_action: None,
            loading: None,
            last_refresh: None,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn cleanup_expired_notifications(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    pub fn get_current_notifications(&self) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| !n.is_expired()).collect()
    }

    /// Switch views through the navigation guard. A denied switch keeps
    /// the current view and raises a warning.
    pub fn navigate_to(&mut self, view: View) -> bool {
        if let Err(denied) = NavigationGuard::check(&view, &self.session) {
            warn!("Navigation to {:?} denied: {}", view, denied);
            self.add_notification(Notification::warning(denied.to_string()));
            return false;
        }

        if self.current_view != view {
            debug!("Switching view {:?} -> {:?}", self.current_view, view);
            self.current_view = view;
            self.selected_project_index = None;
        }

        if let Some(scope) = self.scope_for_view() {
            self.request_projects(scope);
        }
        true
    }

    /// Scope listed by the current view, if it is a list view
    pub fn scope_for_view(&self) -> Option<ProjectScope> {
        match self.current_view {
            View::Projects => Some(ProjectScope::Community),
            View::AdminProjects => Some(ProjectScope::All),
            View::ProjectWizard => None,
        }
    }

    pub fn visible_projects(&self) -> &[Project] {
        match self.current_view {
            View::AdminProjects => &self.admin_projects,
            _ => &self.projects,
        }
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected_project_index
            .and_then(|i| self.visible_projects().get(i))
    }

    pub fn next_project(&mut self) {
        let len = self.visible_projects().len();
        if len == 0 {
            return;
        }
        self.selected_project_index = Some(match self.selected_project_index {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn previous_project(&mut self) {
        if let Some(i) = self.selected_project_index {
            self.selected_project_index = Some(i.saturating_sub(1));
        }
    }

    /// Queue a listing unless one for the same scope is already running
    pub fn request_projects(&mut self, scope: ProjectScope) {
        if self.loading == Some(scope) {
            debug!("Listing {:?} already in flight", scope);
            return;
        }
        if matches!(self.pending_async_action, Some(AsyncAction::SubmitProject(_))) {
            return;
        }
        self.pending_async_action = Some(AsyncAction::LoadProjects(scope));
    }

    /// Whether the list view is due for a poll
    pub fn refresh_due(&self, now: Instant) -> bool {
        let interval = Duration::from_secs(self.app_config.api.refresh_interval_secs.max(1));
        self.last_refresh
            .map(|last| now.duration_since(last) >= interval)
            .unwrap_or(true)
    }

    pub fn open_wizard(&mut self) {
        if self.navigate_to(View::ProjectWizard) {
            info!("Opening project wizard");
            self.wizard_state = Some(ProjectWizardState::new());
        }
    }

    /// Drop the draft and return to the board. Ignored while a submission
    /// is in flight.
    pub fn cancel_wizard(&mut self) {
        let Some(wizard) = &self.wizard_state else {
            return;
        };
        if wizard.status() == SubmissionStatus::InFlight {
            self.add_notification(Notification::info(
                "El proyecto se está enviando, espera un momento".to_string(),
            ));
            return;
        }
        self.discard_wizard();
    }

    pub fn discard_wizard(&mut self) {
        info!("Project draft discarded");
        self.wizard_state = None;
        self.navigate_to(View::Projects);
    }

    pub fn wizard_next(&mut self) {
        let Some(wizard) = self.wizard_state.as_mut() else {
            return;
        };
        if let Some(draft) = wizard.next() {
            info!("Submitting project '{}'", draft.name);
            self.pending_async_action = Some(AsyncAction::SubmitProject(draft));
        }
    }

    pub fn wizard_previous(&mut self) {
        if let Some(wizard) = self.wizard_state.as_mut() {
            wizard.previous();
        }
    }

    /// Fold a finished backend call into the state
    pub fn apply_result(&mut self, result: BackgroundResult) {
        match result {
            BackgroundResult::Projects { scope, result } => {
                if self.loading == Some(scope) {
                    self.loading = None;
                }
                match result {
                    Ok(projects) => {
                        debug!("Loaded {} projects ({:?})", projects.len(), scope);
                        let list = match scope {
                            ProjectScope::Community => &mut self.projects,
                            ProjectScope::All => &mut self.admin_projects,
                        };
                        *list = projects;
                        let len = self.visible_projects().len();
                        if let Some(i) = self.selected_project_index {
                            self.selected_project_index = (len > 0).then(|| i.min(len - 1));
                        }
                    }
                    Err(e) => {
                        warn!("Failed to load projects ({:?}): {}", scope, e);
                        self.add_notification(Notification::error(format!(
                            "No se pudieron cargar los proyectos: {}",
                            e
                        )));
                    }
                }
            }
            BackgroundResult::Submitted(Ok(project)) => {
                info!("Project '{}' created ({})", project.name, project.id);
                if let Some(wizard) = self.wizard_state.as_mut() {
                    wizard.submission_succeeded();
                }
                self.wizard_state = None;
                self.add_notification(Notification::success(format!(
                    "Proyecto '{}' creado",
                    project.name
                )));
                self.projects.push(project);
                self.current_view = View::Projects;
                self.selected_project_index = Some(self.projects.len() - 1);
            }
            BackgroundResult::Submitted(Err(e)) => {
                error!("Project submission failed: {}", e);
                let message = if e.is_unauthorized() {
                    format!("{} Vuelve a iniciar sesión.", e)
                } else {
                    e.to_string()
                };
                if let Some(wizard) = self.wizard_state.as_mut() {
                    wizard.submission_failed(message.clone());
                }
                self.add_notification(Notification::error(format!(
                    "No se pudo crear el proyecto: {}",
                    message
                )));
            }
        }
    }
}

pub struct App {
    pub state: AppState,
    service: Arc<dyn ProjectService>,
    results_tx: mpsc::UnboundedSender<BackgroundResult>,
    results_rx: mpsc::UnboundedReceiver<BackgroundResult>,
    in_flight: usize,
}

impl App {
    pub fn new(state: AppState, service: Arc<dyn ProjectService>) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            state,
            service,
            results_tx,
            results_rx,
            in_flight: 0,
        }
    }

    /// Queue the first listing for the landing view
    pub fn init(&mut self) {
        if let Some(scope) = self.state.scope_for_view() {
            self.state.request_projects(scope);
        }
    }

    pub async fn tick(&mut self) -> anyhow::Result<()> {
        self.state.cleanup_expired_notifications();

        // Periodic polling of the visible list
        if let Some(scope) = self.state.scope_for_view() {
            if self.state.pending_async_action.is_none() && self.state.refresh_due(Instant::now()) {
                self.state.request_projects(scope);
            }
        }

        if let Some(action) = self.state.pending_async_action.take() {
            self.spawn_action(action);
        }

        while let Ok(result) = self.results_rx.try_recv() {
            self.finish(result);
        }

        Ok(())
    }

    /// Every spawned call reports back exactly once, even when it panics
    fn spawn_action(&mut self, action: AsyncAction) {
        let service = Arc::clone(&self.service);
        let tx = self.results_tx.clone();
        self.in_flight += 1;

        match action {
            AsyncAction::LoadProjects(scope) => {
                debug!("Spawning project listing ({:?})", scope);
                self.state.loading = Some(scope);
                self.state.last_refresh = Some(Instant::now());
                let call = tokio::spawn(async move { service.list_projects(scope).await });
                tokio::spawn(async move {
                    let result = call.await.unwrap_or_else(|e| Err(task_failed(e)));
                    let _ = tx.send(BackgroundResult::Projects { scope, result });
                });
            }
            AsyncAction::SubmitProject(draft) => {
                debug!("Spawning project submission");
                let call = tokio::spawn(async move { service.create_project(&draft).await });
                tokio::spawn(async move {
                    let result = call.await.unwrap_or_else(|e| Err(task_failed(e)));
                    let _ = tx.send(BackgroundResult::Submitted(result));
                });
            }
        }
    }

    fn finish(&mut self, result: BackgroundResult) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.state.apply_result(result);
    }

    pub fn has_background_work(&self) -> bool {
        self.in_flight > 0
    }

    /// Spawn any pending action and wait until every background call has
    /// reported back
    pub async fn await_background(&mut self) {
        if let Some(action) = self.state.pending_async_action.take() {
            self.spawn_action(action);
        }
        while self.in_flight > 0 {
            match self.results_rx.recv().await {
                Some(result) => self.finish(result),
                None => break,
            }
        }
    }
}

fn task_failed(err: tokio::task::JoinError) -> ApiError {
    error!("Background task aborted: {}", err);
    ApiError::TaskFailed(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockProjectService;
    use crate::models::{Role, UserProfile};

    fn session(role: Role) -> SessionContext {
        SessionContext::authenticated(
            "tok",
            UserProfile {
                id: "u1".into(),
                name: "Ana".into(),
                email: "ana@example.com".into(),
                role,
            },
        )
    }

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            location: "Huila".into(),
            partnership_type: "Agrícola".into(),
            expected_participants: "4".into(),
            manager_name: "Ana".into(),
            publish_to_community: true,
            created_at: None,
        }
    }

    fn state(role: Role) -> AppState {
        AppState::new(AppConfig::default(), session(role))
    }

    #[test]
    fn test_member_denied_admin_view() {
        let mut state = state(Role::Member);
        assert!(!state.navigate_to(View::AdminProjects));
        assert_eq!(state.current_view, View::Projects);
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].notification_type, NotificationType::Warning);
    }

    #[test]
    fn test_admin_view_queues_full_listing() {
        let mut state = state(Role::Admin);
        assert!(state.navigate_to(View::AdminProjects));
        assert_eq!(
            state.pending_async_action,
            Some(AsyncAction::LoadProjects(ProjectScope::All))
        );
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = state(Role::Member);
        state.projects = vec![project("1", "A"), project("2", "B")];
        state.previous_project();
        assert_eq!(state.selected_project_index, None);
        state.next_project();
        state.next_project();
        state.next_project();
        assert_eq!(state.selected_project_index, Some(1));
        state.previous_project();
        state.previous_project();
        assert_eq!(state.selected_project_index, Some(0));
    }

    #[test]
    fn test_refresh_due_after_interval() {
        let mut state = state(Role::Member);
        let now = Instant::now();
        assert!(state.refresh_due(now));
        state.last_refresh = Some(now);
        assert!(!state.refresh_due(now));
        assert!(state.refresh_due(now + Duration::from_secs(31)));
    }

    #[test]
    fn test_cancel_discards_draft_immediately() {
        let mut state = state(Role::Member);
        state.open_wizard();
        if let Some(wizard) = state.wizard_state.as_mut() {
            wizard.input_char('F');
        }

        state.cancel_wizard();
        assert!(state.wizard_state.is_none());
        assert_eq!(state.current_view, View::Projects);

        // A fresh wizard starts from an empty draft
        state.open_wizard();
        let wizard = state.wizard_state.as_ref().unwrap();
        assert_eq!(wizard.draft().name, "");
    }

    #[test]
    fn test_cancel_ignored_while_submitting() {
        let mut state = state(Role::Member);
        state.open_wizard();
        state.wizard_state = Some(ProjectWizardState::with_initial(ProjectDraft {
            name: "Finca Sol".into(),
            land_size: "5 ha".into(),
            duration: "12 meses".into(),
            expected_participants: "4".into(),
            manager_name: "Ana Ruiz".into(),
            contact_email: "ana@example.com".into(),
            ..ProjectDraft::default()
        }));
        for _ in 0..5 {
            state.wizard_next();
        }
        assert!(matches!(
            state.pending_async_action,
            Some(AsyncAction::SubmitProject(_))
        ));

        state.cancel_wizard();
        assert!(state.wizard_state.is_some());
        assert_eq!(state.current_view, View::ProjectWizard);
        assert_eq!(
            state.notifications.last().map(|n| &n.notification_type),
            Some(&NotificationType::Info)
        );
    }

    #[test]
    fn test_failed_listing_keeps_previous_list() {
        let mut state = state(Role::Member);
        state.projects = vec![project("1", "A")];
        state.loading = Some(ProjectScope::Community);
        state.apply_result(BackgroundResult::Projects {
            scope: ProjectScope::Community,
            result: Err(ApiError::Status {
                status: 500,
                body: "boom".into(),
            }),
        });
        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.loading, None);
        assert_eq!(state.notifications[0].notification_type, NotificationType::Error);
    }

    #[tokio::test]
    async fn test_listing_goes_through_service() {
        let mut mock = MockProjectService::new();
        mock.expect_list_projects()
            .withf(|scope| *scope == ProjectScope::Community)
            .times(1)
            .returning(|_| Ok(vec![project("1", "Finca Sol")]));

        let mut app = App::new(state(Role::Member), Arc::new(mock));
        app.init();
        app.await_background().await;

        assert_eq!(app.state.projects.len(), 1);
        assert_eq!(app.state.projects[0].name, "Finca Sol");
        assert!(app.state.last_refresh.is_some());
        assert!(!app.has_background_work());
    }

    #[tokio::test]
    async fn test_panicking_call_still_reports_back() {
        let mut mock = MockProjectService::new();
        mock.expect_list_projects()
            .returning(|_| panic!("listing exploded"));

        let mut app = App::new(state(Role::Member), Arc::new(mock));
        app.init();
        tokio::time::timeout(Duration::from_secs(5), app.await_background())
            .await
            .expect("await_background hung on a panicked task");

        assert!(!app.has_background_work());
        assert_eq!(app.state.loading, None);
        assert_eq!(
            app.state.notifications.last().map(|n| &n.notification_type),
            Some(&NotificationType::Error)
        );
    }

    #[tokio::test]
    async fn test_panicking_submission_allows_retry() {
        let mut mock = MockProjectService::new();
        mock.expect_create_project()
            .times(1)
            .returning(|_| panic!("upload exploded"));

        let mut state = state(Role::Member);
        state.current_view = View::ProjectWizard;
        state.wizard_state = Some(ProjectWizardState::with_initial(ProjectDraft {
            land_size: "5 ha".into(),
            duration: "12 meses".into(),
            expected_participants: "4".into(),
            manager_name: "Ana Ruiz".into(),
            contact_email: "ana@example.com".into(),
            ..ProjectDraft::default()
        }));
        for _ in 0..5 {
            state.wizard_next();
        }

        let mut app = App::new(state, Arc::new(mock));
        tokio::time::timeout(Duration::from_secs(5), app.await_background())
            .await
            .expect("await_background hung on a panicked task");

        let wizard = app.state.wizard_state.as_ref().unwrap();
        assert_eq!(wizard.status(), SubmissionStatus::Idle);
        assert_eq!(app.state.current_view, View::ProjectWizard);
    }
}
