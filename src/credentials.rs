// ABOUTME: Secure storage of the backend API token using the system keychain
// Uses keyring crate for cross-platform support (macOS Keychain, Linux Secret Service)

use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "aparceria";

/// Credential keys for stored secrets
pub enum CredentialKey {
    ApiToken,
}

impl CredentialKey {
    fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::ApiToken => "api_token",
        }
    }
}

/// Store a credential in the system keychain
pub fn store_credential(key: CredentialKey, value: &str) -> Result<()> {
    let entry = Entry::new(SERVICE_NAME, key.as_str()).context("Failed to create keyring entry")?;

    entry
        .set_password(value)
        .context("Failed to store credential in keychain")?;

    tracing::info!("Stored credential: {}", key.as_str());
    Ok(())
}

/// Retrieve a credential from the system keychain
pub fn get_credential(key: CredentialKey) -> Result<Option<String>> {
    let entry = Entry::new(SERVICE_NAME, key.as_str()).context("Failed to create keyring entry")?;

    match entry.get_password() {
        Ok(password) => {
            tracing::debug!("Retrieved credential: {}", key.as_str());
            Ok(Some(password))
        }
        Err(keyring::Error::NoEntry) => {
            tracing::debug!("No credential found for: {}", key.as_str());
            Ok(None)
        }
        Err(e) => {
            tracing::warn!("Failed to retrieve credential {}: {}", key.as_str(), e);
            Err(anyhow::anyhow!("Failed to retrieve credential: {}", e))
        }
    }
}

/// Delete a credential from the system keychain
pub fn delete_credential(key: CredentialKey) -> Result<()> {
    let entry = Entry::new(SERVICE_NAME, key.as_str()).context("Failed to create keyring entry")?;

    match entry.delete_credential() {
        Ok(()) => {
            tracing::info!("Deleted credential: {}", key.as_str());
            Ok(())
        }
        // Already gone
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(anyhow::anyhow!("Failed to delete credential: {}", e)),
    }
}

pub fn store_api_token(token: &str) -> Result<()> {
    if token.trim().is_empty() {
        return Err(anyhow::anyhow!("API token cannot be empty"));
    }
    store_credential(CredentialKey::ApiToken, token)
}

pub fn get_api_token() -> Result<Option<String>> {
    get_credential(CredentialKey::ApiToken)
}

pub fn delete_api_token() -> Result<()> {
    delete_credential(CredentialKey::ApiToken)
}

/// Masked display of a token (for `whoami`)
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(6).collect();
    if token.chars().count() > 12 {
        format!("{visible}••••••••")
    } else {
        "••••••••".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJhbG••••••••");
        assert_eq!(mask_token("short"), "••••••••");
    }

    // Interacts with the real system keychain; run manually
    #[test]
    #[ignore] // Run with: cargo test -- --ignored
    fn test_store_and_retrieve() {
        store_api_token("test-token-12345").expect("Failed to store");
        assert_eq!(
            get_api_token().expect("Failed to get"),
            Some("test-token-12345".to_string())
        );
        delete_api_token().expect("Failed to delete");
        assert_eq!(get_api_token().expect("Failed to get"), None);
    }
}
