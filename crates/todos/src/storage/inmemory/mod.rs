//! In-memory storage backend.
//!
//! Keeps every user's tasks in insertion order inside a
//! `HashMap<String, Vec<TodoItem>>` wrapped in `Arc<RwLock<_>>`. Data is not
//! persisted; useful for tests and local development.
//!
//! # Example
//!
//! ```rust,ignore
//! use todos::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
