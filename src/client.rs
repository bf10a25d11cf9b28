use bon::Builder;
use core::fmt;

use crate::{
    account::{AccountIdResponse, AccountUsage},
    billing::{BillingPortalResponse, CheckoutSessionResponse},
    collections::{CollectionCreateResponse, CollectionDetailResponse, CollectionListResponse},
    error::JackalPinError,
    files::{
        CloneRequest, FileListResponse, FileUploadRequest, FileUploadResponse, MultiUploadResponse,
    },
    internal::{Endpoint, HttpMethod, RequestBuilder, encode_segment},
    keys::{ApiKey, KeyListResponse, TestKeyResponse},
    queue::QueueSizeResponse,
};

/// Default service origin
const BASE_URL: &str = "https://pinapi.jackalprotocol.com/api";

/// Endpoint path groups. Exact paths are a contract with the remote service.
const TEST_URL: &str = "test";
const KEYS_URL: &str = "keys";
const FILES_URL: &str = "files";
const BATCH_FILES_URL: &str = "v1/files";
const CLONE_URL: &str = "clone";
const PIN_URL: &str = "pin";
const COLLECTIONS_URL: &str = "collections";
const ACCOUNTS_URL: &str = "accounts";
const CHECKOUT_URL: &str = "payment/checkout";
const PORTAL_URL: &str = "payment/manage";
const QUEUE_URL: &str = "queue";

/// Assemble pagination/filter query parameters, omitting unset ones so the
/// wire matches what the server expects.
fn list_params(page: Option<u32>, limit: Option<u32>, name: Option<&str>) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if let Some(page) = page {
        params.push(("page".to_string(), page.to_string()));
    }
    if let Some(limit) = limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(name) = name {
        params.push(("name".to_string(), name.to_string()));
    }
    params
}

/// Client for the JackalPin pinning service.
///
/// Every method is a single request/response round trip; the client holds no
/// per-call state, so one instance can serve any number of concurrent calls.
#[derive(Clone, Builder)]
pub struct JackalPin {
    /// JWT credential sent as a bearer token. Optional so the public queue
    /// endpoint stays reachable without one.
    #[builder(into)]
    pub(crate) api_key: Option<String>,
    #[builder(default)]
    pub(crate) client: reqwest::Client,
    #[builder(default = BASE_URL.to_string(), into)]
    pub(crate) base_url: String,
}

impl JackalPin {
    /// Create a new client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Build a client from the `JACKALPIN_API_KEY` environment variable.
    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var("JACKALPIN_API_KEY")?;
        Ok(Self::builder().api_key(api_key).build())
    }

    /// Set or replace the API key after construction.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    /// Create a request helper instance for this client
    fn request_helper(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.client, &self.base_url, &self.api_key)
    }

    /// Generic method for API requests that return JSON
    async fn api_request<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> Result<T, JackalPinError> {
        self.request_helper().request(&endpoint).await
    }

    /// Generic method for API requests with a JSON body
    async fn api_request_with_body<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<T, JackalPinError> {
        self.request_helper()
            .request_json(&endpoint, Some(body))
            .await
    }

    /// Generic method for requests whose response body is discarded
    async fn api_request_unit(&self, endpoint: Endpoint) -> Result<(), JackalPinError> {
        self.request_helper().request_unit(&endpoint).await
    }
}

// Key management
impl JackalPin {
    /// Test that the configured API key is valid.
    pub async fn test_key(&self) -> Result<TestKeyResponse, JackalPinError> {
        let endpoint = Endpoint::new(TEST_URL, HttpMethod::Get);
        self.api_request(endpoint).await
    }

    /// List API keys. `page` is zero-based; `limit` bounds the page size.
    pub async fn list_keys(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<KeyListResponse, JackalPinError> {
        let endpoint = Endpoint::new(KEYS_URL, HttpMethod::Get)
            .with_query_params(list_params(page, limit, None));
        self.api_request(endpoint).await
    }

    /// Generate a new API key. The returned [`ApiKey`] is the only time the
    /// secret is visible.
    pub async fn create_key(&self, key_name: &str) -> Result<ApiKey, JackalPinError> {
        let endpoint = Endpoint::new(
            format!("{}/{}", KEYS_URL, encode_segment(key_name)),
            HttpMethod::Post,
        );
        self.api_request(endpoint).await
    }

    /// Delete an API key by name.
    pub async fn delete_key(&self, key_name: &str) -> Result<(), JackalPinError> {
        let endpoint = Endpoint::new(
            format!("{}/{}", KEYS_URL, encode_segment(key_name)),
            HttpMethod::Delete,
        );
        self.api_request_unit(endpoint).await
    }
}

// Files
impl JackalPin {
    /// List pinned files. `page` is zero-based; `name` filters by file name.
    pub async fn list_files(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        name: Option<&str>,
    ) -> Result<FileListResponse, JackalPinError> {
        let endpoint = Endpoint::new(FILES_URL, HttpMethod::Get)
            .with_query_params(list_params(page, limit, name));
        self.api_request(endpoint).await
    }

    /// Upload a file and pin its content.
    pub async fn upload_file(
        &self,
        request: &FileUploadRequest,
    ) -> Result<FileUploadResponse, JackalPinError> {
        let part = reqwest::multipart::Part::bytes(request.content.clone())
            .file_name(request.filename.clone())
            .mime_str("application/octet-stream")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let endpoint = Endpoint::new(FILES_URL, HttpMethod::Post);
        self.request_helper()
            .request_multipart(&endpoint, form)
            .await
    }

    /// Upload several files in one request.
    pub async fn upload_files(
        &self,
        requests: &[FileUploadRequest],
    ) -> Result<Vec<FileUploadResponse>, JackalPinError> {
        let mut form = reqwest::multipart::Form::new();
        for request in requests {
            let part = reqwest::multipart::Part::bytes(request.content.clone())
                .file_name(request.filename.clone())
                .mime_str("application/octet-stream")?;
            form = form.part("files", part);
        }

        let endpoint = Endpoint::new(BATCH_FILES_URL, HttpMethod::Post);
        let response: MultiUploadResponse = self
            .request_helper()
            .request_multipart(&endpoint, form)
            .await?;
        Ok(response.into())
    }

    /// Delete a file by id.
    pub async fn delete_file(&self, file_id: i64) -> Result<(), JackalPinError> {
        let endpoint = Endpoint::new(format!("{}/{}", FILES_URL, file_id), HttpMethod::Delete);
        self.api_request_unit(endpoint).await
    }

    /// Clone a file from a URL into the pinning service.
    pub async fn clone_file(&self, url: &str) -> Result<FileUploadResponse, JackalPinError> {
        let endpoint = Endpoint::new(CLONE_URL, HttpMethod::Post);
        let body = CloneRequest {
            link: url.to_string(),
        };
        self.api_request_with_body(endpoint, &body).await
    }

    /// Pin existing IPFS content by CID.
    pub async fn pin_by_cid(&self, cid: &str) -> Result<(), JackalPinError> {
        let endpoint = Endpoint::new(format!("{}/{}", PIN_URL, cid), HttpMethod::Post);
        self.api_request_unit(endpoint).await
    }
}

// Collections
impl JackalPin {
    /// Create a new collection.
    pub async fn create_collection(
        &self,
        name: &str,
    ) -> Result<CollectionCreateResponse, JackalPinError> {
        let endpoint = Endpoint::new(
            format!("{}/{}", COLLECTIONS_URL, encode_segment(name)),
            HttpMethod::Post,
        );
        self.api_request(endpoint).await
    }

    /// List collections. `page` is zero-based; `name` filters by name.
    pub async fn list_collections(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        name: Option<&str>,
    ) -> Result<CollectionListResponse, JackalPinError> {
        let endpoint = Endpoint::new(COLLECTIONS_URL, HttpMethod::Get)
            .with_query_params(list_params(page, limit, name));
        self.api_request(endpoint).await
    }

    /// Get a collection's contents. The file listing inside the collection
    /// is paginated with the same zero-based scheme as `list_files`.
    pub async fn get_collection(
        &self,
        collection_id: i64,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<CollectionDetailResponse, JackalPinError> {
        let endpoint = Endpoint::new(
            format!("{}/{}", COLLECTIONS_URL, collection_id),
            HttpMethod::Get,
        )
        .with_query_params(list_params(page, limit, None));
        self.api_request(endpoint).await
    }

    /// Delete a collection by id. Files in it stay pinned.
    pub async fn delete_collection(&self, collection_id: i64) -> Result<(), JackalPinError> {
        let endpoint = Endpoint::new(
            format!("{}/{}", COLLECTIONS_URL, collection_id),
            HttpMethod::Delete,
        );
        self.api_request_unit(endpoint).await
    }

    /// Add a file to a collection.
    pub async fn add_file_to_collection(
        &self,
        collection_id: i64,
        file_id: i64,
    ) -> Result<(), JackalPinError> {
        let endpoint = Endpoint::new(
            format!("{}/{}/{}", COLLECTIONS_URL, collection_id, file_id),
            HttpMethod::Put,
        );
        self.api_request_unit(endpoint).await
    }

    /// Remove a file from a collection.
    pub async fn remove_file_from_collection(
        &self,
        collection_id: i64,
        file_id: i64,
    ) -> Result<(), JackalPinError> {
        let endpoint = Endpoint::new(
            format!("{}/{}/{}", COLLECTIONS_URL, collection_id, file_id),
            HttpMethod::Delete,
        );
        self.api_request_unit(endpoint).await
    }

    /// Reference one collection from another.
    pub async fn add_collection_reference(
        &self,
        parent_id: i64,
        child_id: i64,
    ) -> Result<(), JackalPinError> {
        let endpoint = Endpoint::new(
            format!("{}/{}/c/{}", COLLECTIONS_URL, parent_id, child_id),
            HttpMethod::Put,
        );
        self.api_request_unit(endpoint).await
    }
}

// Account and billing
impl JackalPin {
    /// Create a customer account for the current key.
    pub async fn create_account(&self) -> Result<(), JackalPinError> {
        let endpoint = Endpoint::new(ACCOUNTS_URL, HttpMethod::Post);
        self.api_request_unit(endpoint).await
    }

    /// Get storage usage statistics.
    pub async fn get_usage(&self) -> Result<AccountUsage, JackalPinError> {
        let endpoint = Endpoint::new(format!("{}/usage", ACCOUNTS_URL), HttpMethod::Get);
        self.api_request(endpoint).await
    }

    /// Get the account id hash.
    pub async fn get_account_id(&self) -> Result<AccountIdResponse, JackalPinError> {
        let endpoint = Endpoint::new(format!("{}/id", ACCOUNTS_URL), HttpMethod::Get);
        self.api_request(endpoint).await
    }

    /// Create a Stripe checkout session for the given price lookup key.
    /// `count` is the quantity to purchase; the server assumes 1 when the
    /// parameter is absent, so it is only sent otherwise.
    pub async fn create_checkout_session(
        &self,
        lookup_key: &str,
        count: u32,
    ) -> Result<CheckoutSessionResponse, JackalPinError> {
        let mut params = Vec::new();
        if count != 1 {
            params.push(("count".to_string(), count.to_string()));
        }

        let endpoint = Endpoint::new(
            format!("{}/{}", CHECKOUT_URL, encode_segment(lookup_key)),
            HttpMethod::Post,
        )
        .with_query_params(params);
        self.api_request(endpoint).await
    }

    /// Get the URL of the Stripe customer portal for managing billing.
    pub async fn get_billing_portal_url(&self) -> Result<BillingPortalResponse, JackalPinError> {
        let endpoint = Endpoint::new(PORTAL_URL, HttpMethod::Get);
        self.api_request(endpoint).await
    }
}

// System
impl JackalPin {
    /// Get the current processing queue size. Needs no credential.
    pub async fn get_queue_size(&self) -> Result<QueueSizeResponse, JackalPinError> {
        let endpoint = Endpoint::new(QUEUE_URL, HttpMethod::Get).public();
        self.api_request(endpoint).await
    }
}

impl fmt::Debug for JackalPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JackalPin")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
