use serde::{Deserialize, Serialize};

/// Current size of the service's processing queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueSizeResponse {
    /// Number of items waiting to be processed.
    pub size: u64,
}
