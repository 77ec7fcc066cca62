// ABOUTME: Errors raised while talking to the REST backend

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No has iniciado sesión. Ejecuta `aparceria login` primero.")]
    NotAuthenticated,

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Background task failed: {0}")]
    TaskFailed(String),

    #[error("Could not read attachment {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// The backend rejected our credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. } | ApiError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_detection() {
        let err = ApiError::Status {
            status: 401,
            body: "expired".into(),
        };
        assert!(err.is_unauthorized());
        assert!(ApiError::NotAuthenticated.is_unauthorized());

        let err = ApiError::Status {
            status: 500,
            body: String::new(),
        };
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "Backend returned 500: ");
    }
}
