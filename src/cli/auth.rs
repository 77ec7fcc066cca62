// ABOUTME: CLI login, logout and whoami commands
//
// The token goes to the system keychain, the profile to ~/.aparceria/config/session.toml

use anyhow::{Context, Result, bail};
use serde::Serialize;

use super::util::{output_json, prompt_line};
use super::{LoginArgs, OutputFormat};
use crate::api::AuthClient;
use crate::config::AppConfig;
use crate::credentials::mask_token;
use crate::models::UserProfile;
use crate::session::SessionContext;

#[derive(Debug, Serialize)]
struct WhoAmI<'a> {
    logged_in: bool,
    user: Option<&'a UserProfile>,
    token: Option<String>,
    api_url: &'a str,
}

/// Execute the login command
pub async fn login(args: LoginArgs, format: OutputFormat) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_line("Contraseña: ")?,
    };
    if password.is_empty() {
        bail!("La contraseña no puede estar vacía");
    }

    let config = AppConfig::load()?;
    let client = AuthClient::new(&config.api)?;
    let response = client
        .login(&args.email, &password)
        .await
        .with_context(|| format!("Login failed for {}", args.email))?;

    let session = SessionContext::persist_login(&response.token, response.user)?;

    match format {
        OutputFormat::Json => output_json(&session.user())?,
        OutputFormat::Text => {
            if let Some(user) = session.user() {
                println!("Sesión iniciada como {} <{}> ({})", user.name, user.email, user.role.label());
            }
        }
    }
    Ok(())
}

/// Execute the logout command
pub fn logout(format: OutputFormat) -> Result<()> {
    SessionContext::logout()?;
    match format {
        OutputFormat::Json => output_json(&serde_json::json!({ "logged_in": false }))?,
        OutputFormat::Text => println!("Sesión cerrada."),
    }
    Ok(())
}

/// Execute the whoami command
pub fn whoami(format: OutputFormat) -> Result<()> {
    let config = AppConfig::load()?;
    let session = SessionContext::load()?;

    let info = WhoAmI {
        logged_in: session.is_logged_in(),
        user: session.user(),
        token: session.token().map(mask_token),
        api_url: &config.api.base_url,
    };

    match format {
        OutputFormat::Json => output_json(&info)?,
        OutputFormat::Text => match (info.logged_in, info.user) {
            (true, Some(user)) => {
                println!("{} <{}>", user.name, user.email);
                println!("Rol:     {}", user.role.label());
                println!("Token:   {}", info.token.unwrap_or_default());
                println!("Backend: {}", info.api_url);
            }
            _ => println!("No has iniciado sesión. Ejecuta `aparceria login --email <correo>`."),
        },
    }
    Ok(())
}
