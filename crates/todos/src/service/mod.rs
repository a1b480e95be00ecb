//! Task service: validation and orchestration over the record store and the
//! attachment signer.

mod error;
mod todos;

pub use error::{Result, ServiceError};
pub use todos::{AttachmentUpload, TodoService};
