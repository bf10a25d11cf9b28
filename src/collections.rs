use serde::{Deserialize, Serialize};

use crate::files::FileDetail;

/// A named grouping of files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection {
    /// The name of the collection.
    pub name: String,
    /// The server-assigned identifier for the collection.
    pub id: i64,
    /// The IPFS content identifier of the collection folder.
    pub cid: String,
}

/// A response containing a page of collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionListResponse {
    /// The collections on this page.
    pub collections: Vec<Collection>,
    /// Total number of collections, as reported by the server.
    pub count: u64,
}

/// Contents of a single collection: its files plus any nested collection
/// references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionDetailResponse {
    /// The files on this page of the collection.
    pub files: Vec<FileDetail>,
    /// Total number of files in the collection.
    pub count: u64,
    /// Collections referenced by this collection.
    pub collections: Vec<Collection>,
    /// The name of the collection.
    pub name: String,
    /// The IPFS content identifier of the collection folder.
    pub cid: String,
}

/// Response from creating a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionCreateResponse {
    /// The id of the new collection.
    pub id: i64,
}
