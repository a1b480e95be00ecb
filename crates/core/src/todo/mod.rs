mod error;
mod operations;
mod requests;
mod types;

pub use error::TodoError;
pub use operations::{filter_by_name, name_matches, validate_key, validate_name, MAX_NAME_LENGTH};
pub use requests::{CreateTodoRequest, UpdateTodoRequest};
pub use types::{record_key, TodoItem};
