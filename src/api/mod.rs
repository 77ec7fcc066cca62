// ABOUTME: REST backend integration: project listing/creation and login
// The project service trait is the wizard's submission boundary

pub mod auth;
pub mod client;
pub mod error;

pub use auth::{AuthClient, LoginResponse};
pub use client::{HttpProjectClient, ProjectScope, ProjectService};
pub use error::ApiError;

#[cfg(test)]
pub use client::MockProjectService;
