use serde::{Deserialize, Serialize};

/// Represents a file to be uploaded.
#[derive(Debug, Clone)]
pub struct FileUploadRequest {
    /// The raw byte content of the file.
    pub content: Vec<u8>,
    /// The name the file is stored under.
    pub filename: String,
}

impl FileUploadRequest {
    pub fn new(content: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
        }
    }
}

/// Detailed information about a pinned file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileDetail {
    /// The server-assigned identifier for the file.
    pub id: i64,
    /// The name of the file.
    pub file_name: String,
    /// The IPFS content identifier of the file.
    pub cid: String,
    /// The size of the file in bytes.
    pub size: u64,
    /// When the file was uploaded.
    pub created_at: String,
}

/// A response containing a page of files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileListResponse {
    /// The files on this page.
    pub files: Vec<FileDetail>,
    /// Total number of files on the account, as reported by the server.
    pub count: u64,
}

/// Response from uploading or cloning a file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileUploadResponse {
    /// The name the file was stored under.
    pub name: String,
    /// The IPFS content identifier of the uploaded content.
    pub cid: String,
    /// The Jackal merkle root of the uploaded content.
    pub merkle: String,
    /// The server-assigned file id, when the server reports one.
    pub id: Option<i64>,
}

/// Request body for cloning a file from a URL.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CloneRequest {
    /// The URL the service fetches the content from.
    pub link: String,
}

/// The multi-file upload endpoint answers with either a list of results or a
/// single object, depending on how many files were accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MultiUploadResponse {
    Many(Vec<FileUploadResponse>),
    One(FileUploadResponse),
}

impl From<MultiUploadResponse> for Vec<FileUploadResponse> {
    fn from(response: MultiUploadResponse) -> Self {
        match response {
            MultiUploadResponse::Many(responses) => responses,
            MultiUploadResponse::One(response) => vec![response],
        }
    }
}
