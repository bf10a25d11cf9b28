#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Async client for the JackalPin IPFS pinning service.
//!
//! Every public method on [`JackalPin`] is one outbound HTTP call mapped to a
//! typed result or a typed [`JackalPinError`]; there is no retry, caching, or
//! background work. Calls only need `&self`, so a single client can serve any
//! number of concurrent tasks.
//!
//! ```no_run
//! use jackalpin::{JackalPin, FileUploadRequest};
//!
//! # async fn run() -> Result<(), jackalpin::JackalPinError> {
//! let client = JackalPin::new("my-jwt-key");
//!
//! let upload = client
//!     .upload_file(&FileUploadRequest::new(b"hello".to_vec(), "hello.txt"))
//!     .await?;
//! println!("pinned as {}", upload.cid);
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod billing;
pub mod client;
pub mod collections;
pub mod error;
pub mod files;
mod internal;
pub mod keys;
pub mod queue;

// Re-export main types
pub use account::{AccountIdResponse, AccountUsage};
pub use billing::{BillingPortalResponse, CheckoutSessionResponse};
pub use client::JackalPin;
pub use collections::{
    Collection, CollectionCreateResponse, CollectionDetailResponse, CollectionListResponse,
};
pub use error::{ErrorKind, JackalPinError};
pub use files::{FileDetail, FileListResponse, FileUploadRequest, FileUploadResponse};
pub use keys::{ApiKey, KeyInfo, KeyListResponse, TestKeyResponse};
pub use queue::QueueSizeResponse;
