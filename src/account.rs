use serde::{Deserialize, Serialize};

/// Storage usage for the account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountUsage {
    /// Bytes the current plan allows.
    pub bytes_allowed: u64,
    /// Bytes currently in use.
    pub bytes_used: u64,
}

/// Response from getting the account id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountIdResponse {
    /// Opaque account identifier hash.
    pub id: String,
}
