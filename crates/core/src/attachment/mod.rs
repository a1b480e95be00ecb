mod error;
mod resolver;
mod traits;

pub use error::{attachment_error_to_status_code, AttachmentError};
pub use resolver::{
    encode_object_key, validate_expiry, AttachmentResolver, DEFAULT_UPLOAD_URL_EXPIRY,
    MAX_UPLOAD_URL_EXPIRY,
};
pub use traits::UploadUrlSigner;
