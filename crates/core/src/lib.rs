//! Functional core of the todos workspace.
//!
//! Pure types and functions shared by the storage backends and the task
//! service: the task record and its request payloads, the repository and
//! signer traits, error types and the table schema. Nothing in this crate
//! performs I/O.

pub mod attachment;
pub mod storage;
pub mod todo;
