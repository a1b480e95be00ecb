//! Offline DynamoDB endpoint for tests.
//!
//! Serves queued JSON responses in order and records every request body, so
//! tests can assert on what the repository actually sent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_dynamodb::config::{Credentials, SharedCredentialsProvider};
use aws_smithy_http_client::test_util::infallible_client_fn;
use serde_json::{json, Value};

use super::DynamoDbRepository;

const ERROR_PREFIX: &str = "com.amazonaws.dynamodb.v20120810#";

/// Request bodies received by the fake endpoint, in order.
#[derive(Clone, Default)]
pub struct Requests(Arc<Mutex<Vec<Value>>>);

impl Requests {
    pub fn all(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// A `200 OK` response with the given body.
pub fn ok(body: Value) -> (u16, Value) {
    (200, body)
}

/// A DynamoDB error response of the given type.
pub fn error(status: u16, error_type: &str) -> (u16, Value) {
    (
        status,
        json!({ "__type": format!("{ERROR_PREFIX}{error_type}"), "message": error_type }),
    )
}

/// An item in DynamoDB JSON, as stored by the repository.
pub fn item(todo_id: &str, name: &str, due_date: &str, done: bool) -> Value {
    json!({
        "userId": { "S": "u1" },
        "todoId": { "S": todo_id },
        "name": { "S": name },
        "dueDate": { "S": due_date },
        "done": { "BOOL": done },
        "createdAt": { "S": "2024-01-01T00:00:00+00:00" }
    })
}

/// Builds an SDK configuration whose HTTP client answers with `responses`.
///
/// The configuration keeps the SDK's default retry settings, so a client that
/// retries shows up as extra recorded requests.
pub fn sdk_config(responses: Vec<(u16, Value)>) -> (SdkConfig, Requests) {
    let requests = Requests::default();
    let recorded = requests.clone();
    let queue = Mutex::new(VecDeque::from(responses));

    let http_client = infallible_client_fn(move |request| {
        let body = request
            .body()
            .bytes()
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
            .unwrap_or(Value::Null);
        recorded.0.lock().unwrap().push(body);

        let (status, body) = queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| error(400, "ValidationException"));

        http::Response::builder()
            .status(status)
            .header("content-type", "application/x-amz-json-1.0")
            .body(body.to_string())
            .unwrap()
    });

    let config = SdkConfig::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(SharedCredentialsProvider::new(Credentials::new(
            "AKIDEXAMPLE",
            "secret",
            None,
            None,
            "test",
        )))
        .http_client(http_client)
        .build();

    (config, requests)
}

/// A repository talking to the fake endpoint.
pub fn repository(responses: Vec<(u16, Value)>) -> (DynamoDbRepository, Requests) {
    let (config, requests) = sdk_config(responses);
    (DynamoDbRepository::from_sdk_config(&config, "todos"), requests)
}
