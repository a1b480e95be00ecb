//! Observed repository decorator.
//!
//! Wraps any [`TodoRepository`](todos_core::storage::TodoRepository) and
//! reports every call to a [`StoreObserver`] before and after it reaches the
//! store. Request tracing and logging attach here instead of inside the
//! storage backends.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let repo = Arc::new(InMemoryRepository::new());
//! let observed = ObservedRepository::new(repo, Arc::new(TracingObserver));
//! ```

mod observer;
mod repository;

pub use observer::{CallOutcome, StoreObserver, StoreOperation, TracingObserver};
pub use repository::ObservedRepository;
