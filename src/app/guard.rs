// ABOUTME: Navigation guard deciding which views a session may open

use thiserror::Error;

use super::state::View;
use crate::session::SessionContext;

/// Minimum access a view requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Access {
    Authenticated,
    Admin,
}

impl View {
    pub fn access(&self) -> Access {
        match self {
            View::Projects | View::ProjectWizard => Access::Authenticated,
            View::AdminProjects => Access::Admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Denied {
    #[error("Inicia sesión para continuar (aparceria login)")]
    NotLoggedIn,
    #[error("Solo los administradores pueden abrir esta vista")]
    NotAdmin,
}

pub struct NavigationGuard;

impl NavigationGuard {
    pub fn check_access(access: Access, session: &SessionContext) -> Result<(), Denied> {
        match access {
            Access::Authenticated if session.is_logged_in() => Ok(()),
            Access::Authenticated => Err(Denied::NotLoggedIn),
            Access::Admin if session.is_admin() => Ok(()),
            Access::Admin if session.is_logged_in() => Err(Denied::NotAdmin),
            Access::Admin => Err(Denied::NotLoggedIn),
        }
    }

    pub fn check(view: &View, session: &SessionContext) -> Result<(), Denied> {
        Self::check_access(view.access(), session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn test_anonymous_is_denied_every_view() {
        let anon = SessionContext::anonymous();
        assert_eq!(
            NavigationGuard::check_access(Access::Authenticated, &anon),
            Err(Denied::NotLoggedIn)
        );
        assert_eq!(
            NavigationGuard::check(&View::Projects, &anon),
            Err(Denied::NotLoggedIn)
        );
        assert_eq!(
            NavigationGuard::check(&View::AdminProjects, &anon),
            Err(Denied::NotLoggedIn)
        );
    }

    #[test]
    fn test_member_cannot_open_admin() {
        let member = session(Role::Member);
        assert_eq!(NavigationGuard::check(&View::ProjectWizard, &member), Ok(()));
        assert_eq!(
            NavigationGuard::check(&View::AdminProjects, &member),
            Err(Denied::NotAdmin)
        );
    }

    #[test]
    fn test_admin_opens_everything() {
        let admin = session(Role::Admin);
        for view in [View::Projects, View::ProjectWizard, View::AdminProjects] {
            assert_eq!(NavigationGuard::check(&view, &admin), Ok(()));
        }
    }
}
