//! Reqwest-backed implementation of the [`TaskApi`] port.

use crate::sync::domain::{
    NewTask, ProjectData, ProjectId, ProjectRecord, TaskId, TaskPatch, TaskRecord,
};
use crate::sync::ports::{TaskApi, TaskApiError, TaskApiResult};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Production base URL of the TickTick open API.
pub const DEFAULT_BASE_URL: &str = "https://api.ticktick.com/open/v1";

/// HTTP client for the TickTick open API.
///
/// Attaches the bearer credential and a JSON content type to every request
/// and maps failure statuses onto the [`TaskApiError`] taxonomy. Issues a
/// single request per call: no retries, no backoff, no pagination.
/// `Debug` is deliberately not derived so the credential cannot leak into
/// logs.
#[derive(Clone)]
pub struct TickTickClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl TickTickClient {
    /// Creates a client against the production API.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (used by tests).
    #[must_use]
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Issues one request and maps failure statuses onto the taxonomy.
    ///
    /// Returns `Ok(None)` when the provider answers 204 No Content.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> TaskApiResult<Option<reqwest::Response>> {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "ticktick api request");

        let mut builder = self
            .http
            .request(method, &url)
            .bearer_auth(&self.access_token)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(payload) = body {
            builder = builder.json(&payload);
        }

        let response = builder.send().await.map_err(TaskApiError::connection)?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if status.as_u16() >= 400 {
            let text = response.text().await.unwrap_or_default();
            return Err(error_for_status(status.as_u16(), text));
        }
        Ok(Some(response))
    }

    /// Issues one request and decodes the JSON body.
    ///
    /// Returns `Ok(None)` when the provider answers 204 No Content.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> TaskApiResult<Option<T>> {
        match self.send(method, path, body).await? {
            None => Ok(None),
            Some(response) => {
                let parsed = response.json::<T>().await.map_err(TaskApiError::connection)?;
                Ok(Some(parsed))
            }
        }
    }

    /// Issues one request where any successful status means the operation
    /// took effect; the response body, if any, is discarded.
    async fn request_unit(&self, method: Method, path: &str) -> TaskApiResult<()> {
        self.send(method, path, None).await.map(|_| ())
    }

    /// Serializes a write payload, wrapping serializer failures as
    /// connection errors.
    fn encode(payload: &impl serde::Serialize) -> TaskApiResult<Value> {
        serde_json::to_value(payload).map_err(TaskApiError::connection)
    }
}

/// Maps a failure status onto the error taxonomy.
fn error_for_status(status: u16, body: String) -> TaskApiError {
    match status {
        401 => TaskApiError::Auth,
        429 => TaskApiError::RateLimit,
        _ => TaskApiError::Api { status, body },
    }
}

#[async_trait]
impl TaskApi for TickTickClient {
    async fn list_projects(&self) -> TaskApiResult<Vec<ProjectRecord>> {
        let projects = self.request(Method::GET, "/project", None).await?;
        Ok(projects.unwrap_or_default())
    }

    async fn get_project(&self, project_id: &ProjectId) -> TaskApiResult<ProjectRecord> {
        let path = format!("/project/{project_id}");
        let project = self.request(Method::GET, &path, None).await?;
        Ok(project.unwrap_or_default())
    }

    async fn get_project_data(&self, project_id: &ProjectId) -> TaskApiResult<ProjectData> {
        let path = format!("/project/{project_id}/data");
        let data = self.request(Method::GET, &path, None).await?;
        Ok(data.unwrap_or_default())
    }

    async fn get_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
    ) -> TaskApiResult<TaskRecord> {
        let path = format!("/project/{project_id}/task/{task_id}");
        let task = self.request(Method::GET, &path, None).await?;
        Ok(task.unwrap_or_default())
    }

    async fn create_task(&self, task: &NewTask) -> TaskApiResult<TaskRecord> {
        let body = Self::encode(task)?;
        let created = self.request(Method::POST, "/task", Some(body)).await?;
        Ok(created.unwrap_or_default())
    }

    async fn update_task(
        &self,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> TaskApiResult<TaskRecord> {
        let path = format!("/task/{task_id}");
        let body = Self::encode(patch)?;
        let updated = self.request(Method::POST, &path, Some(body)).await?;
        Ok(updated.unwrap_or_default())
    }

    async fn complete_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
    ) -> TaskApiResult<()> {
        let path = format!("/project/{project_id}/task/{task_id}/complete");
        self.request_unit(Method::POST, &path).await
    }

    async fn delete_task(&self, project_id: &ProjectId, task_id: &TaskId) -> TaskApiResult<()> {
        let path = format!("/project/{project_id}/task/{task_id}");
        self.request_unit(Method::DELETE, &path).await
    }

    async fn validate_credentials(&self) -> TaskApiResult<usize> {
        let projects = self.list_projects().await?;
        Ok(projects.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{TickTickClient, error_for_status};
    use crate::sync::domain::ProjectRecord;
    use crate::sync::ports::{TaskApi, TaskApiError};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Binds a loopback listener that answers exactly one connection with
    /// the canned response, returning the base URL to point a client at.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let addr = listener.local_addr().expect("local address");
        tokio::spawn(async move {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let mut request = [0_u8; 1024];
            if stream.read(&mut request).await.is_err() {
                return;
            }
            if stream.write_all(response.as_bytes()).await.is_err() {
                return;
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn no_content_on_a_unit_endpoint_means_the_operation_took_effect() {
        let base = serve_once("HTTP/1.1 204 No Content\r\nconnection: close\r\n\r\n").await;
        let client = TickTickClient::with_base_url("token", base);

        client
            .complete_task(&"p1".into(), &"t1".into())
            .await
            .expect("204 completes without error");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn no_content_on_a_value_endpoint_yields_the_empty_record() {
        let base = serve_once("HTTP/1.1 204 No Content\r\nconnection: close\r\n\r\n").await;
        let client = TickTickClient::with_base_url("token", base);

        let project = client
            .get_project(&"p1".into())
            .await
            .expect("204 yields the default record");
        assert_eq!(project, ProjectRecord::default());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unauthorized_response_surfaces_as_auth() {
        let base = serve_once(
            "HTTP/1.1 401 Unauthorized\r\ncontent-length: 6\r\nconnection: close\r\n\r\ndenied",
        )
        .await;
        let client = TickTickClient::with_base_url("token", base);

        let result = client.list_projects().await;
        assert!(matches!(result, Err(TaskApiError::Auth)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn validate_credentials_counts_projects_from_the_wire() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 25\r\nconnection: close\r\n\r\n[{\"id\":\"p1\"},{\"id\":\"p2\"}]",
        )
        .await;
        let client = TickTickClient::with_base_url("token", base);

        let count = client
            .validate_credentials()
            .await
            .expect("credentials accepted");
        assert_eq!(count, 2);
    }

    #[test]
    fn status_401_maps_to_auth() {
        let err = error_for_status(401, String::new());
        assert!(matches!(err, TaskApiError::Auth));
        assert_eq!(err.to_string(), "invalid or expired access token");
    }

    #[test]
    fn status_429_maps_to_rate_limit_with_expected_message() {
        let err = error_for_status(429, String::new());
        assert!(matches!(err, TaskApiError::RateLimit));
        assert!(err.to_string().contains("Rate limit exceeded"));
    }

    #[test]
    fn other_failure_statuses_preserve_status_and_body() {
        let err = error_for_status(500, "boom".to_owned());
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn connection_errors_carry_the_expected_prefix() {
        let err = TaskApiError::Connection(Arc::new(std::io::Error::other("refused")));
        assert!(err.to_string().starts_with("Connection error"));
    }
}
