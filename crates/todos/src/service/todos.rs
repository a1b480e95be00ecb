use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use todos_core::attachment::{
    validate_expiry, AttachmentResolver, UploadUrlSigner, DEFAULT_UPLOAD_URL_EXPIRY,
};
use todos_core::storage::{RepositoryError, TodoRepository};
use todos_core::todo::{
    record_key, validate_key, validate_name, CreateTodoRequest, TodoError, TodoItem,
    UpdateTodoRequest,
};

use super::Result;

/// Result of the attachment flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentUpload {
    /// Time-limited URL accepting a single `PUT` of the file.
    pub upload_url: String,
    /// Public URL recorded on the task.
    pub attachment_url: String,
    /// Lifetime of `upload_url` in seconds.
    pub expires_in: u64,
}

/// Per-user task operations.
///
/// Collaborators are injected at construction; the service holds no other
/// state and can be shared across concurrent requests.
#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
    resolver: AttachmentResolver,
    signer: Arc<dyn UploadUrlSigner>,
    upload_url_expiry: Duration,
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoService")
            .field("resolver", &self.resolver)
            .field("upload_url_expiry", &self.upload_url_expiry)
            .finish_non_exhaustive()
    }
}

impl TodoService {
    pub fn new(
        repository: Arc<dyn TodoRepository>,
        resolver: AttachmentResolver,
        signer: Arc<dyn UploadUrlSigner>,
    ) -> Self {
        Self {
            repository,
            resolver,
            signer,
            upload_url_expiry: DEFAULT_UPLOAD_URL_EXPIRY,
        }
    }

    /// Sets the lifetime of issued upload URLs.
    pub fn with_upload_url_expiry(mut self, expiry: Duration) -> Self {
        self.upload_url_expiry = expiry;
        self
    }

    /// Creates a task under a freshly generated ID.
    pub async fn create(&self, user_id: &str, request: CreateTodoRequest) -> Result<TodoItem> {
        let todo_id = Uuid::new_v4().to_string();
        self.create_with_id(user_id, &todo_id, request).await
    }

    /// Creates a task under a caller-supplied ID.
    pub async fn create_with_id(
        &self,
        user_id: &str,
        todo_id: &str,
        request: CreateTodoRequest,
    ) -> Result<TodoItem> {
        validate_key(user_id, todo_id)?;
        validate_name(&request.name)?;

        let todo = self
            .repository
            .create_record(user_id, todo_id, request)
            .await?;

        tracing::info!(user_id, todo_id, "Created todo");
        Ok(todo)
    }

    /// Gets a single task.
    pub async fn get(&self, user_id: &str, todo_id: &str) -> Result<TodoItem> {
        validate_key(user_id, todo_id)?;

        self.repository
            .get_record(user_id, todo_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::NotFound {
                    entity_type: "Todo",
                    id: record_key(user_id, todo_id),
                }
                .into()
            })
    }

    /// Lists every task of a user, newest first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        if user_id.trim().is_empty() {
            return Err(TodoError::EmptyUserId.into());
        }
        Ok(self.repository.list_for_user(user_id).await?)
    }

    /// Lists the tasks of a user whose name contains `needle`.
    pub async fn search(&self, user_id: &str, needle: &str) -> Result<Vec<TodoItem>> {
        if user_id.trim().is_empty() {
            return Err(TodoError::EmptyUserId.into());
        }
        Ok(self.repository.search_by_name(user_id, needle).await?)
    }

    /// Overwrites `name`, `due_date` and `done` of an existing task.
    pub async fn update(
        &self,
        user_id: &str,
        todo_id: &str,
        request: UpdateTodoRequest,
    ) -> Result<TodoItem> {
        validate_key(user_id, todo_id)?;
        validate_name(&request.name)?;

        let todo = self
            .repository
            .update_record(user_id, todo_id, &request)
            .await?;

        tracing::info!(user_id, todo_id, done = todo.done, "Updated todo");
        Ok(todo)
    }

    /// Deletes an existing task.
    pub async fn delete(&self, user_id: &str, todo_id: &str) -> Result<()> {
        validate_key(user_id, todo_id)?;

        self.repository.delete_record(user_id, todo_id).await?;

        tracing::info!(user_id, todo_id, "Deleted todo");
        Ok(())
    }

    /// Records the attachment URL on a task and issues an upload URL for it.
    ///
    /// The attachment URL is written first, so a missing task fails before
    /// anything is signed. The URL is deterministic; retrying after a signing
    /// failure rewrites the same value.
    pub async fn attach(&self, user_id: &str, todo_id: &str) -> Result<AttachmentUpload> {
        validate_key(user_id, todo_id)?;
        validate_expiry(self.upload_url_expiry)?;

        let attachment_url = self.resolver.public_url(todo_id);
        self.repository
            .set_attachment_url(user_id, todo_id, &attachment_url)
            .await?;

        let upload_url = self.issue_upload_url(todo_id).await?;

        tracing::info!(user_id, todo_id, %attachment_url, "Issued attachment upload URL");

        Ok(AttachmentUpload {
            upload_url,
            attachment_url,
            expires_in: self.upload_url_expiry.as_secs(),
        })
    }

    /// Returns the public URL the attachment of `todo_id` is served from.
    pub fn public_url(&self, todo_id: &str) -> String {
        self.resolver.public_url(todo_id)
    }

    /// Issues a time-limited upload URL for the attachment of `todo_id`.
    pub async fn issue_upload_url(&self, todo_id: &str) -> Result<String> {
        let object_key = self.resolver.object_key(todo_id);
        Ok(self
            .signer
            .presign_put(&object_key, self.upload_url_expiry)
            .await?)
    }
}
