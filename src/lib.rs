// ABOUTME: Library crate for Aparcería exposing the wizard, API client and TUI for testing and the binary

pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod credentials;
pub mod models;
pub mod session;
