//! OpenAiAssistantClient -- concrete [`AssistantClient`] for the Assistants v2 API.
//!
//! Every trait method is one HTTP request with bearer authentication and the
//! `OpenAI-Beta: assistants=v2` header. Non-2xx responses are mapped onto
//! [`AssistantError`] by [`map_error_status`].
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use threadcite_core::assistant::client::AssistantClient;
use threadcite_types::assistant::{
    AssistantInfo, FileObject, MessageQuery, MessageRole, Run, ThreadInfo, ThreadMessage,
};
use threadcite_types::config::GlobalConfig;
use threadcite_types::error::AssistantError;

use super::types::{
    ApiErrorBody, CreateMessageRequest, CreateRunRequest, CreateThreadRequest, ListResponse,
};

/// Assistants API client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the `Authorization` header.
pub struct OpenAiAssistantClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAiAssistantClient {
    /// Value of the `OpenAI-Beta` header selecting the Assistants v2 surface.
    const BETA_HEADER: &'static str = "assistants=v2";

    /// Create a new client against `base_url` (e.g. `https://api.openai.com/v1`).
    pub fn new(
        api_key: SecretString,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssistantError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the global configuration.
    pub fn from_config(
        config: &GlobalConfig,
        api_key: SecretString,
    ) -> Result<Self, AssistantError> {
        Self::new(api_key, config.api_base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(self.api_key.expose_secret())
            .header("OpenAI-Beta", Self::BETA_HEADER)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AssistantError> {
        let request = self.authorized(self.client.get(self.url(path))).query(query);
        send_json(request).await
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AssistantError> {
        let request = self.authorized(self.client.post(self.url(path))).json(body);
        send_json(request).await
    }
}

// OpenAiAssistantClient does NOT derive Debug; the SecretString field already
// redacts itself but the whole client stays out of debug output.

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, AssistantError> {
    let response = request
        .send()
        .await
        .map_err(|e| AssistantError::Transport(format!("HTTP request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let retry_after_ms = retry_after_ms(response.headers());
        let body = response.text().await.unwrap_or_default();
        return Err(map_error_status(status, retry_after_ms, &body));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AssistantError::Transport(format!("failed to read response body: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AssistantError::Deserialization(format!("failed to parse response: {e}")))
}

/// `Retry-After` in whole seconds, converted to milliseconds.
fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}

/// Map a non-success HTTP status to an [`AssistantError`].
///
/// The message is taken from the `error.message` field of the body when it
/// parses as an API error envelope, otherwise the raw body is used.
pub fn map_error_status(
    status: StatusCode,
    retry_after_ms: Option<u64>,
    body: &str,
) -> AssistantError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED => AssistantError::AuthenticationFailed,
        StatusCode::NOT_FOUND => AssistantError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => AssistantError::RateLimited { retry_after_ms },
        _ => AssistantError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Query string pairs for a message listing.
fn message_query_params(query: &MessageQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("order", query.order.as_str().to_string())];
    if let Some(after) = &query.after {
        params.push(("after", after.clone()));
    }
    if let Some(limit) = query.limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

impl AssistantClient for OpenAiAssistantClient {
    async fn retrieve_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<AssistantInfo, AssistantError> {
        self.get_json(&format!("/assistants/{assistant_id}"), &[]).await
    }

    async fn create_thread(&self) -> Result<ThreadInfo, AssistantError> {
        self.post_json("/threads", &CreateThreadRequest::default()).await
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage, AssistantError> {
        let body = CreateMessageRequest { role, content };
        self.post_json(&format!("/threads/{thread_id}/messages"), &body)
            .await
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run, AssistantError> {
        let body = CreateRunRequest { assistant_id };
        self.post_json(&format!("/threads/{thread_id}/runs"), &body)
            .await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError> {
        self.get_json(&format!("/threads/{thread_id}/runs/{run_id}"), &[])
            .await
    }

    async fn list_messages(
        &self,
        thread_id: &str,
        query: &MessageQuery,
    ) -> Result<Vec<ThreadMessage>, AssistantError> {
        let params = message_query_params(query);
        let list: ListResponse<ThreadMessage> = self
            .get_json(&format!("/threads/{thread_id}/messages"), &params)
            .await?;
        Ok(list.data)
    }

    async fn retrieve_file(&self, file_id: &str) -> Result<FileObject, AssistantError> {
        self.get_json(&format!("/files/{file_id}"), &[]).await
    }
}
