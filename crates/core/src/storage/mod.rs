mod error;
mod http_mapping;
pub mod schema;
mod traits;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use schema::{todos_table_config, TableConfig};
pub use traits::TodoRepository;
