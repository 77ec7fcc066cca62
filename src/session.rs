// ABOUTME: Application-level session context with typed accessors
// Combines the persisted session file with the keychain token; passed to API clients and the guard

use anyhow::Result;
use tracing::{info, warn};

use crate::config::SessionFile;
use crate::credentials;
use crate::models::{Role, UserProfile};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    token: Option<String>,
    user: Option<UserProfile>,
    logged_in: bool,
}

impl SessionContext {
    /// A signed-out session
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in session
    pub fn authenticated(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
            logged_in: true,
        }
    }

    /// Read the session file and the keychain token.
    /// A keychain failure is logged and treated as signed out.
    pub fn load() -> Result<Self> {
        let file = SessionFile::load()?;
        let token = match credentials::get_api_token() {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not read API token from keychain: {}", e);
                None
            }
        };
        Ok(Self::from_parts(file, token))
    }

    pub fn from_parts(file: SessionFile, token: Option<String>) -> Self {
        Self {
            token,
            user: file.user,
            logged_in: file.logged_in,
        }
    }

    /// Persist a fresh login: token to the keychain, profile to disk
    pub fn persist_login(token: &str, user: UserProfile) -> Result<Self> {
        credentials::store_api_token(token)?;
        let mut file = SessionFile::load().unwrap_or_default();
        file.mark_logged_in(user.clone());
        file.save()?;
        info!("Signed in as {} ({})", user.email, user.role.label());
        Ok(Self::authenticated(token, user))
    }

    /// Forget the token and the profile
    pub fn logout() -> Result<()> {
        credentials::delete_api_token()?;
        SessionFile::remove()?;
        info!("Signed out");
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Logged in means both the persisted flag and a token are present
    pub fn is_logged_in(&self) -> bool {
        self.logged_in && self.token.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        if self.is_logged_in() {
            self.user.as_ref().map(|u| u.role)
        } else {
            None
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }
}
