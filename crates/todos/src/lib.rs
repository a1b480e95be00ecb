//! Per-user task store.
//!
//! The [`service::TodoService`] validates requests and coordinates a
//! [`TodoRepository`](todos_core::storage::TodoRepository) with an
//! [`UploadUrlSigner`](todos_core::attachment::UploadUrlSigner). Pure types
//! and rules live in `todos_core`; this crate holds the I/O.

pub mod attachments;
pub mod config;
pub mod service;
pub mod storage;

#[cfg(any(feature = "dynamodb", feature = "s3"))]
pub mod aws;

pub use config::Config;
pub use service::{AttachmentUpload, ServiceError, TodoService};
