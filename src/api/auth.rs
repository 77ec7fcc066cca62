// ABOUTME: Login against the backend's auth endpoint

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::client::{build_http_client, decode, parse_base_url};
use super::error::ApiError;
use crate::config::ApiConfig;
use crate::models::UserProfile;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// What a successful login hands back
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

pub struct AuthClient {
    client: Client,
    base_url: Url,
}

impl AuthClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    pub fn login_url(&self) -> Result<Url, ApiError> {
        Ok(self.base_url.join("api/auth/login")?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.login_url()?;
        debug!("POST {} for {}", url, email);

        let response = self
            .client
            .post(url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let login: LoginResponse = decode(response).await?;
        info!("Login accepted for {}", login.user.email);
        Ok(login)
    }
}
