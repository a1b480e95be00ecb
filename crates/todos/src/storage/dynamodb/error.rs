//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `todos_core::storage`.
//! Transport failures and throttling become `Unavailable` so callers can
//! tell retryable failures apart.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use todos_core::storage::RepositoryError;

const ENTITY_TYPE: &str = "Todo";

/// Classifies failures that happened before DynamoDB produced a service error.
fn transport_error<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError> {
    match err {
        SdkError::TimeoutError(_) => Some(RepositoryError::Unavailable(
            "Request to DynamoDB timed out".to_string(),
        )),
        SdkError::DispatchFailure(_) => Some(RepositoryError::Unavailable(
            "Failed to dispatch request to DynamoDB".to_string(),
        )),
        SdkError::ResponseError(_) => Some(RepositoryError::Unavailable(
            "Invalid response from DynamoDB".to_string(),
        )),
        _ => None,
    }
}

fn throughput_exceeded() -> RepositoryError {
    RepositoryError::Unavailable("Throughput exceeded, please retry".to_string())
}

fn request_limit_exceeded() -> RepositoryError {
    RepositoryError::Unavailable("Request limit exceeded, please retry".to_string())
}

fn internal_server_error() -> RepositoryError {
    RepositoryError::Unavailable("DynamoDB internal server error".to_string())
}

fn table_not_found() -> RepositoryError {
    RepositoryError::QueryFailed("Table not found".to_string())
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    if let Some(mapped) = transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => table_not_found(),
        GetItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        GetItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        GetItemError::InternalServerError(_) => internal_server_error(),
        err => RepositoryError::QueryFailed(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    if let Some(mapped) = transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => table_not_found(),
        QueryError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        QueryError::RequestLimitExceeded(_) => request_limit_exceeded(),
        QueryError::InternalServerError(_) => internal_server_error(),
        err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to RepositoryError.
///
/// A failed `attribute_not_exists` condition means the key is taken.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(mapped) = transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => RepositoryError::AlreadyExists {
            entity_type: ENTITY_TYPE,
            id: id.into(),
        },
        PutItemError::ResourceNotFoundException(_) => table_not_found(),
        PutItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        PutItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            RepositoryError::Unavailable("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => internal_server_error(),
        err => RepositoryError::QueryFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map an UpdateItem SDK error to RepositoryError.
///
/// A failed `attribute_exists` condition means the key does not exist.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(mapped) = transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => RepositoryError::NotFound {
            entity_type: ENTITY_TYPE,
            id: id.into(),
        },
        UpdateItemError::ResourceNotFoundException(_) => table_not_found(),
        UpdateItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        UpdateItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        UpdateItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        UpdateItemError::TransactionConflictException(_) => {
            RepositoryError::Unavailable("Transaction conflict, please retry".to_string())
        }
        UpdateItemError::InternalServerError(_) => internal_server_error(),
        err => RepositoryError::QueryFailed(format!("UpdateItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(mapped) = transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => RepositoryError::NotFound {
            entity_type: ENTITY_TYPE,
            id: id.into(),
        },
        DeleteItemError::ResourceNotFoundException(_) => table_not_found(),
        DeleteItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        DeleteItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        DeleteItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            RepositoryError::Unavailable("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => internal_server_error(),
        err => RepositoryError::QueryFailed(format!("DeleteItem failed: {:?}", err)),
    }
}

/// Map a DescribeTable SDK error. Returns `None` when the table does not exist.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
) -> Option<RepositoryError> {
    if let Some(mapped) = transport_error(&err) {
        return Some(mapped);
    }
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => None,
        DescribeTableError::InternalServerError(_) => Some(internal_server_error()),
        err => Some(RepositoryError::QueryFailed(format!(
            "DescribeTable failed: {:?}",
            err
        ))),
    }
}

/// Map a generic provisioning error to RepositoryError.
pub fn map_provisioning_error(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::QueryFailed(format!("Table provisioning failed: {}", err))
}
