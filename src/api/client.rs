// ABOUTME: HTTP client for the projects endpoints of the Aparcería backend

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

#[cfg(test)]
use mockall::automock;

use super::error::ApiError;
use crate::config::ApiConfig;
use crate::models::{Project, ProjectDraft};
use crate::session::SessionContext;

/// Which projects to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectScope {
    /// Projects visible to the signed-in user
    Community,
    /// Every project, admin back-office only
    All,
}

/// Everything the UI needs from the backend about projects.
/// `create_project` is the wizard's submission boundary.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn list_projects(&self, scope: ProjectScope) -> Result<Vec<Project>, ApiError>;

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ApiError>;
}

/// Responses come either bare or wrapped in `{ "data": ... }`
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

pub(crate) fn build_http_client(config: &ApiConfig) -> Result<Client, ApiError> {
    Ok(Client::builder()
        .user_agent(concat!("aparceria/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?)
}

/// Parse the base URL, making sure joins keep any path prefix
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Turn a non-2xx response into `ApiError::Status`, or decode the body
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let envelope: Envelope<T> = response.json().await?;
    Ok(envelope.into_inner())
}

#[derive(Debug, Clone)]
pub struct HttpProjectClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl HttpProjectClient {
    /// Build a client for the signed-in session
    pub fn new(config: &ApiConfig, session: &SessionContext) -> Result<Self, ApiError> {
        let token = session
            .token()
            .filter(|_| session.is_logged_in())
            .ok_or(ApiError::NotAuthenticated)?
            .to_string();

        Ok(Self {
            client: build_http_client(config)?,
            base_url: parse_base_url(&config.base_url)?,
            token,
        })
    }

    fn projects_url(&self, scope: ProjectScope) -> Result<Url, ApiError> {
        let mut url = self.base_url.join("api/projects")?;
        if scope == ProjectScope::All {
            url.query_pairs_mut().append_pair("scope", "all");
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    /// Multipart body: one text part per scalar field, one file part per attachment
    async fn build_form(draft: &ProjectDraft) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (key, value) in draft.form_fields() {
            form = form.text(key, value);
        }

        for attachment in &draft.attachments {
            let bytes = tokio::fs::read(&attachment.path)
                .await
                .map_err(|source| ApiError::Attachment {
                    path: attachment.path.clone(),
                    source,
                })?;
            debug!(
                "Attaching {} ({} bytes, {})",
                attachment.file_name,
                bytes.len(),
                attachment.mime_type
            );
            let part = Part::bytes(bytes)
                .file_name(attachment.file_name.clone())
                .mime_str(&attachment.mime_type)?;
            form = form.part("attachments", part);
        }

        Ok(form)
    }
}

#[async_trait]
impl ProjectService for HttpProjectClient {
    async fn list_projects(&self, scope: ProjectScope) -> Result<Vec<Project>, ApiError> {
        let url = self.projects_url(scope)?;
        debug!("GET {}", url);

        let response = self.authorized(self.client.get(url)).send().await?;
        let projects: Vec<Project> = decode(response).await?;

        debug!("Fetched {} projects ({:?})", projects.len(), scope);
        Ok(projects)
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        let url = self.projects_url(ProjectScope::Community)?;
        let form = Self::build_form(draft).await?;

        info!(
            "POST {} for project '{}' with {} attachment(s)",
            url,
            draft.name,
            draft.attachments.len()
        );

        let response = self
            .authorized(self.client.post(url))
            .multipart(form)
            .send()
            .await?;

        match decode::<Project>(response).await {
            Ok(project) => {
                info!("Project created with id {}", project.id);
                Ok(project)
            }
            Err(e) => {
                error!("Project creation failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, UserProfile};

    fn session() -> SessionContext {
        SessionContext::authenticated(
            "tok",
            UserProfile {
                id: "u1".into(),
                name: "Ana".into(),
                email: "ana@example.com".into(),
                role: Role::Member,
            },
        )
    }

    #[test]
    fn test_requires_login() {
        let err = HttpProjectClient::new(&ApiConfig::default(), &SessionContext::anonymous())
            .unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
    }

    #[test]
    fn test_rejects_bad_url() {
        let config = ApiConfig {
            base_url: "not a url".into(),
            ..ApiConfig::default()
        };
        let err = HttpProjectClient::new(&config, &session()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_projects_url_keeps_prefix() {
        let config = ApiConfig {
            base_url: "https://example.org/backend".into(),
            ..ApiConfig::default()
        };
        let client = HttpProjectClient::new(&config, &session()).unwrap();

        assert_eq!(
            client.projects_url(ProjectScope::Community).unwrap().as_str(),
            "https://example.org/backend/api/projects"
        );
        assert_eq!(
            client.projects_url(ProjectScope::All).unwrap().as_str(),
            "https://example.org/backend/api/projects?scope=all"
        );
    }

    #[test]
    fn test_envelope_accepts_both_shapes() {
        let wrapped: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data": [1, 2]}"#).unwrap();
        let bare: Envelope<Vec<u32>> = serde_json::from_str("[3]").unwrap();
        assert_eq!(wrapped.into_inner(), vec![1, 2]);
        assert_eq!(bare.into_inner(), vec![3]);
    }

    #[tokio::test]
    async fn test_missing_attachment_is_reported() {
        let mut draft = ProjectDraft::default();
        draft.attachments = vec![crate::models::Attachment::from_path(
            "/definitely/not/here.pdf",
        )];
        let err = HttpProjectClient::build_form(&draft).await.unwrap_err();
        assert!(matches!(err, ApiError::Attachment { .. }));
    }

    #[tokio::test]
    async fn test_form_reads_attachments() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("plano.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let mut draft = ProjectDraft::default();
        draft.attachments = vec![crate::models::Attachment::from_path(&path)];
        assert!(HttpProjectClient::build_form(&draft).await.is_ok());
    }
}
