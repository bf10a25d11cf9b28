use serde::{Deserialize, Serialize};

/// A freshly generated API key. The `key` secret is only ever returned at
/// creation time; listings expose [`KeyInfo`] instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKey {
    /// The caller-chosen name of the key.
    pub name: String,
    /// The JWT secret used as the bearer credential.
    pub key: String,
}

/// Information about an existing API key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyInfo {
    /// The name of the key.
    pub name: String,
    /// When the key was created.
    pub created_at: String,
}

/// A response containing a page of API keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyListResponse {
    /// The keys on this page.
    pub keys: Vec<KeyInfo>,
    /// Total number of keys on the account, as reported by the server.
    pub count: u64,
}

/// Response from testing the current API key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestKeyResponse {
    /// Human-readable confirmation from the server.
    pub message: String,
}
