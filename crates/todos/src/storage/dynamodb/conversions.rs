//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! [`TodoItem`]. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, NaiveDate, Utc};
use todos_core::storage::schema::{
    ATTACHMENT_URL_ATTR, CREATED_AT_ATTR, DONE_ATTR, DUE_DATE_ATTR, NAME_ATTR, TODO_ID_ATTR,
    USER_ID_ATTR,
};
use todos_core::storage::RepositoryError;
use todos_core::todo::TodoItem;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds the primary key of a task.
pub fn todo_key(user_id: &str, todo_id: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            USER_ID_ATTR.to_string(),
            AttributeValue::S(user_id.to_string()),
        ),
        (
            TODO_ID_ATTR.to_string(),
            AttributeValue::S(todo_id.to_string()),
        ),
    ])
}

/// Formats a due date the way it is stored.
pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Convert a TodoItem to DynamoDB item.
pub fn todo_to_item(todo: &TodoItem) -> HashMap<String, AttributeValue> {
    let mut item = todo_key(&todo.user_id, &todo.todo_id);

    item.insert(NAME_ATTR.to_string(), AttributeValue::S(todo.name.clone()));
    item.insert(
        DUE_DATE_ATTR.to_string(),
        AttributeValue::S(format_due_date(todo.due_date)),
    );
    item.insert(DONE_ATTR.to_string(), AttributeValue::Bool(todo.done));
    item.insert(
        CREATED_AT_ATTR.to_string(),
        AttributeValue::S(todo.created_at.to_rfc3339()),
    );
    if let Some(url) = &todo.attachment_url {
        item.insert(
            ATTACHMENT_URL_ATTR.to_string(),
            AttributeValue::S(url.clone()),
        );
    }

    item
}

/// Convert a DynamoDB item to TodoItem.
pub fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<TodoItem, RepositoryError> {
    Ok(TodoItem {
        user_id: get_string(item, USER_ID_ATTR)?,
        todo_id: get_string(item, TODO_ID_ATTR)?,
        name: get_string(item, NAME_ATTR)?,
        due_date: get_date(item, DUE_DATE_ATTR)?,
        done: get_bool(item, DONE_ATTR)?,
        created_at: get_datetime(item, CREATED_AT_ATTR)?,
        attachment_url: get_optional_string(item, ATTACHMENT_URL_ATTR),
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required boolean attribute.
fn get_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Result<bool, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get a required date attribute (YYYY-MM-DD format).
fn get_date(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<NaiveDate, RepositoryError> {
    let s = get_string(item, key)?;
    NaiveDate::parse_from_str(&s, DATE_FORMAT)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid date {}: {}", key, e)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}
