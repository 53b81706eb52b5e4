use crate::{
    api::{
        ApiEnvelope, BoardsApi, ColumnsApi, CreateBoardRequest, CreateColumnRequest,
        CreateTaskRequest, TasksApi, UpdateColumnRequest, UpdateTaskRequest,
    },
    domain::{Board, Column, Task},
    error::{Result, TaskboardError},
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// REST client for the board backend
///
/// Implements the three API traits against the JSON endpoints documented
/// on each method. Authentication is a bearer token supplied by the caller;
/// acquiring and refreshing it is the auth layer's concern, not ours.
pub struct RestClient {
    http: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl RestClient {
    /// Creates a client rooted at the given base URL (e.g. `https://api.example.com/api`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
            bearer_token: None,
        }
    }

    /// Attaches a bearer token sent with every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Decodes a response envelope, treating non-2xx statuses and
    /// `success: false` bodies uniformly as API failures
    async fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let envelope: ApiEnvelope<T> = match response.json().await {
            Ok(envelope) => envelope,
            // Error bodies are not guaranteed to carry the envelope shape
            Err(_) if !status.is_success() => {
                return Err(TaskboardError::Api(format!("HTTP {status}")));
            }
            Err(err) => return Err(TaskboardError::Transport(err)),
        };

        if !status.is_success() || !envelope.success {
            return Err(TaskboardError::Api(envelope.message));
        }

        envelope
            .data
            .ok_or_else(|| TaskboardError::Api("response missing data".to_string()))
    }

    /// Like [`Self::unwrap_envelope`] for endpoints that acknowledge
    /// without returning a record
    async fn unwrap_ack(response: Response) -> Result<()> {
        let status = response.status();
        let envelope: ApiEnvelope<serde_json::Value> = match response.json().await {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(TaskboardError::Api(format!("HTTP {status}")));
            }
            Err(err) => return Err(TaskboardError::Transport(err)),
        };

        if !status.is_success() || !envelope.success {
            return Err(TaskboardError::Api(envelope.message));
        }
        Ok(())
    }
}

#[async_trait]
impl TasksApi for RestClient {
    async fn list_board_tasks(&self, board_id: &str) -> Result<Vec<Task>> {
        debug!(board_id, "listing board tasks");
        let response = self
            .request(Method::GET, &format!("/boards/{board_id}/tasks"))
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task> {
        let response = self
            .request(Method::POST, "/tasks")
            .json(request)
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn update_task(&self, task_id: &str, request: &UpdateTaskRequest) -> Result<Task> {
        debug!(task_id, "patching task");
        let response = self
            .request(Method::PATCH, &format!("/tasks/{task_id}"))
            .json(request)
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/tasks/{task_id}"))
            .send()
            .await?;
        Self::unwrap_ack(response).await
    }
}

#[async_trait]
impl ColumnsApi for RestClient {
    async fn list_board_columns(&self, board_id: &str) -> Result<Vec<Column>> {
        debug!(board_id, "listing board columns");
        let response = self
            .request(Method::GET, &format!("/boards/{board_id}/columns"))
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn create_column(&self, request: &CreateColumnRequest) -> Result<Column> {
        let response = self
            .request(Method::POST, "/columns")
            .json(request)
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn update_column(
        &self,
        column_id: &str,
        request: &UpdateColumnRequest,
    ) -> Result<Column> {
        let response = self
            .request(Method::PATCH, &format!("/columns/{column_id}"))
            .json(request)
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }
}

#[async_trait]
impl BoardsApi for RestClient {
    async fn list_boards(&self) -> Result<Vec<Board>> {
        let response = self.request(Method::GET, "/boards").send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn create_board(&self, request: &CreateBoardRequest) -> Result<Board> {
        let response = self
            .request(Method::POST, "/boards")
            .json(request)
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn get_board(&self, board_id: &str) -> Result<Board> {
        let response = self
            .request(Method::GET, &format!("/boards/{board_id}"))
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn delete_board(&self, board_id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/boards/{board_id}"))
            .send()
            .await?;
        Self::unwrap_ack(response).await
    }
}
