//! Upload URL signers.
//!
//! Implementations of [`UploadUrlSigner`](todos_core::attachment::UploadUrlSigner):
//!
//! - [`StaticUploadSigner`]: deterministic URLs without any credentials
//! - `S3UploadSigner`: S3 presigned `PUT` URLs, behind the `s3` feature

mod static_signer;

#[cfg(feature = "s3")]
mod s3;

pub use static_signer::StaticUploadSigner;

#[cfg(feature = "s3")]
pub use s3::S3UploadSigner;
