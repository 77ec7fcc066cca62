// ABOUTME: Main application structure and state management for the TUI

pub mod events;
pub mod guard;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use guard::{Access, Denied, NavigationGuard};
pub use state::{App, AppState};
