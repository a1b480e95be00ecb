//! Record store implementations.
//!
//! Concrete implementations of [`TodoRepository`](todos_core::storage::TodoRepository):
//!
//! - [`inmemory`]: always available, used by tests and local runs
//! - `dynamodb`: AWS DynamoDB backend, behind the `dynamodb` feature
//!
//! [`observed`] wraps any of them with pre/post-call hooks.
//!
//! # Examples
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p todos --features dynamodb
//! ```

pub mod inmemory;
pub mod observed;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use inmemory::InMemoryRepository;
pub use observed::{ObservedRepository, StoreObserver, TracingObserver};

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;
