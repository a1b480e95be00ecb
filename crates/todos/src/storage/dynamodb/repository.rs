//! DynamoDB repository implementation.
//!
//! Implements [`TodoRepository`] using conditional writes: creates require
//! the key to be absent, updates and deletes require it to be present.

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use todos_core::storage::schema::{
    ATTACHMENT_URL_ATTR, DEFAULT_CREATED_AT_INDEX, DONE_ATTR, DUE_DATE_ATTR, NAME_ATTR,
    TODO_ID_ATTR, USER_ID_ATTR,
};
use todos_core::storage::{
    todos_table_config, RepositoryError, Result, TableConfig, TodoRepository,
};
use todos_core::todo::{record_key, CreateTodoRequest, TodoItem, UpdateTodoRequest};

use super::conversions::{format_due_date, item_to_todo, todo_key, todo_to_item};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_update_item_error,
};

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository {
    pub(super) client: Client,
    table_name: String,
    created_at_index: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            created_at_index: DEFAULT_CREATED_AT_INDEX.to_string(),
        }
    }

    /// Uses `index` as the creation-ordered local secondary index.
    pub fn with_created_at_index(mut self, index: impl Into<String>) -> Self {
        self.created_at_index = index.into();
        self
    }

    /// Creates a repository from an already loaded AWS SDK configuration.
    ///
    /// Retries are disabled on the client whatever `sdk_config` says, so each
    /// call reaches DynamoDB at most once.
    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig, table_name: &str) -> Self {
        let config = aws_sdk_dynamodb::config::Builder::from(sdk_config)
            .retry_config(RetryConfig::disabled())
            .build();
        Self::new(Client::from_conf(config), table_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Returns the table schema this repository expects.
    pub fn table_config(&self) -> TableConfig {
        todos_table_config()
            .with_table_name(&self.table_name)
            .with_created_at_index(&self.created_at_index)
    }

    /// Runs a query to completion, following `LastEvaluatedKey` pages.
    async fn query_all(&self, request: QueryFluentBuilder) -> Result<Vec<TodoItem>> {
        let mut todos = Vec::new();
        let mut start_key = None;

        loop {
            let output = request
                .clone()
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(map_query_error)?;

            for item in output.items.unwrap_or_default() {
                todos.push(item_to_todo(&item)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(todos)
    }

    fn partition_query(&self, user_id: &str) -> QueryFluentBuilder {
        self.client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#userId = :userId")
            .expression_attribute_names("#userId", USER_ID_ATTR)
            .expression_attribute_values(":userId", AttributeValue::S(user_id.to_string()))
    }
}

#[async_trait]
impl TodoRepository for DynamoDbRepository {
    async fn get_record(&self, user_id: &str, todo_id: &str) -> Result<Option<TodoItem>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(todo_key(user_id, todo_id)))
            .consistent_read(true)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_todo(&item)?)),
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        let request = self
            .partition_query(user_id)
            .index_name(&self.created_at_index)
            .scan_index_forward(false);

        self.query_all(request).await
    }

    async fn create_record(
        &self,
        user_id: &str,
        todo_id: &str,
        fields: CreateTodoRequest,
    ) -> Result<TodoItem> {
        let todo = fields.into_todo(user_id, todo_id);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(todo_to_item(&todo)))
            .condition_expression("attribute_not_exists(#todoId)")
            .expression_attribute_names("#todoId", TODO_ID_ATTR)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, todo.key()))?;

        Ok(todo)
    }

    async fn update_record(
        &self,
        user_id: &str,
        todo_id: &str,
        fields: &UpdateTodoRequest,
    ) -> Result<TodoItem> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(todo_key(user_id, todo_id)))
            .update_expression("SET #name = :name, #dueDate = :dueDate, #done = :done")
            .condition_expression("attribute_exists(#todoId)")
            .expression_attribute_names("#todoId", TODO_ID_ATTR)
            .expression_attribute_names("#name", NAME_ATTR)
            .expression_attribute_names("#dueDate", DUE_DATE_ATTR)
            .expression_attribute_names("#done", DONE_ATTR)
            .expression_attribute_values(":name", AttributeValue::S(fields.name.clone()))
            .expression_attribute_values(
                ":dueDate",
                AttributeValue::S(format_due_date(fields.due_date)),
            )
            .expression_attribute_values(":done", AttributeValue::Bool(fields.done))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, record_key(user_id, todo_id)))?;

        let attributes = result.attributes.ok_or_else(|| {
            RepositoryError::InvalidData("UpdateItem returned no attributes".to_string())
        })?;
        item_to_todo(&attributes)
    }

    async fn delete_record(&self, user_id: &str, todo_id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(todo_key(user_id, todo_id)))
            .condition_expression("attribute_exists(#todoId)")
            .expression_attribute_names("#todoId", TODO_ID_ATTR)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, record_key(user_id, todo_id)))?;

        Ok(())
    }

    async fn search_by_name(&self, user_id: &str, needle: &str) -> Result<Vec<TodoItem>> {
        if needle.is_empty() {
            return self.list_for_user(user_id).await;
        }

        let request = self
            .partition_query(user_id)
            .filter_expression("contains(#name, :needle)")
            .expression_attribute_names("#name", NAME_ATTR)
            .expression_attribute_values(":needle", AttributeValue::S(needle.to_string()));

        self.query_all(request).await
    }

    async fn set_attachment_url(
        &self,
        user_id: &str,
        todo_id: &str,
        url: &str,
    ) -> Result<TodoItem> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(todo_key(user_id, todo_id)))
            .update_expression("SET #attachmentUrl = :attachmentUrl")
            .condition_expression("attribute_exists(#todoId)")
            .expression_attribute_names("#todoId", TODO_ID_ATTR)
            .expression_attribute_names("#attachmentUrl", ATTACHMENT_URL_ATTR)
            .expression_attribute_values(":attachmentUrl", AttributeValue::S(url.to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, record_key(user_id, todo_id)))?;

        let attributes = result.attributes.ok_or_else(|| {
            RepositoryError::InvalidData("UpdateItem returned no attributes".to_string())
        })?;
        item_to_todo(&attributes)
    }
}
