//! DynamoDB storage backend implementation.
//!
//! One item per task in a table keyed by `userId` (hash) and `todoId`
//! (range). A local secondary index on `createdAt` serves newest-first
//! listings.

mod conversions;
mod error;
mod provision;
mod repository;

#[cfg(test)]
mod testing;

pub use provision::ProvisionOutcome;
pub use repository::DynamoDbRepository;
