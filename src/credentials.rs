//! Service-provider credential lookup
//!
//! The Zoho connector token lives in a local key-value store owned by the
//! surrounding application. The action layer only needs `get`, so the store
//! is abstracted behind a capability trait and the concrete backing can be
//! swapped in tests.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Opaque service-provider credential
///
/// No lifecycle management here: the token is attached to requests as-is
/// and refresh/expiry is the provider application's problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceProviderToken {
    pub access_token: String,
}

/// Capability for reading service-provider credentials
#[cfg_attr(test, mockall::automock)]
pub trait CredentialProvider: Send + Sync {
    /// Look up the token stored under `key`, if any
    fn get(&self, key: &str) -> Option<ServiceProviderToken>;
}

/// Credential store backed by a JSON file of key -> token records
#[derive(Debug, Default)]
pub struct JsonFileCredentials {
    entries: HashMap<String, ServiceProviderToken>,
}

impl JsonFileCredentials {
    /// Load the store from a JSON object file; unknown fields per entry are ignored
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::DashboardError::Credential(format!(
                "Failed to read credential file {:?}: {}",
                path, e
            ))
        })?;
        let entries: HashMap<String, ServiceProviderToken> = serde_json::from_str(&content)?;
        tracing::debug!("Loaded {} credential entries from {:?}", entries.len(), path);
        Ok(Self { entries })
    }
}

impl CredentialProvider for JsonFileCredentials {
    fn get(&self, key: &str) -> Option<ServiceProviderToken> {
        self.entries.get(key).cloned()
    }
}

/// Fixed single-token provider, for tokens injected via config or environment
#[derive(Debug)]
pub struct StaticCredentials {
    key: String,
    token: ServiceProviderToken,
}

impl StaticCredentials {
    pub fn new(key: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            token: ServiceProviderToken {
                access_token: access_token.into(),
            },
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn get(&self, key: &str) -> Option<ServiceProviderToken> {
        (key == self.key).then(|| self.token.clone())
    }
}

/// Provider for environments with no connector token configured
#[derive(Debug, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn get(&self, _key: &str) -> Option<ServiceProviderToken> {
        None
    }
}
