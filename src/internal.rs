use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Method, RequestBuilder as ReqwestRequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::error::{self, JackalPinError};

/// Characters escaped in caller-supplied path segments, mirroring how the
/// service expects key and collection names on the wire.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/')
    .add(b'\\');

/// Percent-encode a caller-supplied path segment (key name, collection name,
/// checkout lookup key).
pub(crate) fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// HTTP method for API endpoints
#[derive(Debug, Clone)]
pub(crate) enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Represents an API endpoint with its configuration
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    /// Path relative to the base URL, already percent-encoded
    pub path: String,
    /// HTTP method for the call
    pub method: HttpMethod,
    /// Query parameters appended to the URL
    pub query_params: Option<Vec<(String, String)>>,
    /// Whether the endpoint needs an API key. Everything except `/queue`
    /// does.
    pub requires_auth: bool,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            query_params: None,
            requires_auth: true,
        }
    }

    /// Mark the endpoint as callable without a credential
    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    pub fn with_query_params(mut self, params: Vec<(String, String)>) -> Self {
        if !params.is_empty() {
            self.query_params = Some(params);
        }
        self
    }
}

/// Centralized request builder that handles the HTTP logic shared by every
/// operation: URL joining, auth, body encoding, response decoding, and error
/// mapping.
pub(crate) struct RequestBuilder<'a> {
    /// Shared reqwest client
    client: &'a reqwest::Client,
    /// Service origin the paths are joined onto
    base_url: &'a str,
    /// Bearer credential, attached whenever present
    api_key: &'a Option<String>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(
        client: &'a reqwest::Client,
        base_url: &'a str,
        api_key: &'a Option<String>,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Build a request for the given endpoint. Fails fast with
    /// `MissingApiKey` when the endpoint needs auth and no key is set, so no
    /// network call is made at all.
    pub fn build_request(
        &self,
        endpoint: &Endpoint,
    ) -> Result<ReqwestRequestBuilder, JackalPinError> {
        self.build_request_with_options(endpoint, true)
    }

    /// Build a request, optionally suppressing the JSON content-type
    /// (multipart uploads set their own).
    fn build_request_with_options(
        &self,
        endpoint: &Endpoint,
        add_json_content_type: bool,
    ) -> Result<ReqwestRequestBuilder, JackalPinError> {
        if endpoint.requires_auth && self.api_key.is_none() {
            return Err(JackalPinError::MissingApiKey);
        }

        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.path.trim_start_matches('/')
        );
        let method: Method = endpoint.method.clone().into();

        let mut req = self.client.request(method, &url);

        if let Some(ref params) = endpoint.query_params {
            req = req.query(&params);
        }

        // The original client sends the bearer header on every call that has
        // a key, public endpoints included.
        if let Some(api_key) = self.api_key {
            req = req.bearer_auth(api_key);
        }

        if add_json_content_type && matches!(endpoint.method, HttpMethod::Post | HttpMethod::Put) {
            req = req.header("content-type", "application/json");
        }

        Ok(req)
    }

    /// Execute a request without body and return the deserialized response
    pub async fn request<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &Endpoint,
    ) -> Result<T, JackalPinError> {
        let req = self.build_request(endpoint)?;
        let res = req.send().await?;
        self.handle_response(res).await
    }

    /// Execute a request with a JSON body and return the deserialized
    /// response
    pub async fn request_json<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        endpoint: &Endpoint,
        body: Option<&B>,
    ) -> Result<T, JackalPinError> {
        let mut req = self.build_request(endpoint)?;

        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await?;
        self.handle_response(res).await
    }

    /// Execute a request and discard the body (delete/pin operations, which
    /// answer 200 or 204 with nothing useful in them)
    pub async fn request_unit(&self, endpoint: &Endpoint) -> Result<(), JackalPinError> {
        let req = self.build_request(endpoint)?;
        let res = req.send().await?;

        if res.status().is_success() {
            Ok(())
        } else {
            let status = res.status();
            let bytes = res.bytes().await?;
            Err(error::parse_error_response(status, bytes))
        }
    }

    /// Execute a multipart form request (file uploads)
    pub async fn request_multipart<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &Endpoint,
        form: reqwest::multipart::Form,
    ) -> Result<T, JackalPinError> {
        let req = self.build_request_with_options(endpoint, false)?;
        let res = req.multipart(form).send().await?;
        self.handle_response(res).await
    }

    /// Handle a response: decode 2xx bodies, map everything else through the
    /// error taxonomy
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
    ) -> Result<T, JackalPinError> {
        let status = res.status();
        let bytes = res.bytes().await?;

        if status.is_success() {
            serde_json::from_slice::<T>(&bytes).map_err(|e| {
                JackalPinError::UnexpectedResponse(format!(
                    "HTTP {} but failed to decode body: {}; body: {}",
                    status.as_u16(),
                    e,
                    String::from_utf8_lossy(&bytes)
                ))
            })
        } else {
            Err(error::parse_error_response(status, bytes))
        }
    }
}
