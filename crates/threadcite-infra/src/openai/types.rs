//! OpenAI Assistants API wire types.
//!
//! Request bodies and response envelopes used only for HTTP communication.
//! The resources themselves (runs, messages, files) decode straight into the
//! provider-agnostic types from threadcite-types.

use serde::{Deserialize, Serialize};

use threadcite_types::assistant::MessageRole;

/// Request body for `POST /threads/{thread_id}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest<'a> {
    pub role: MessageRole,
    pub content: &'a str,
}

/// Request body for `POST /threads/{thread_id}/runs`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRunRequest<'a> {
    pub assistant_id: &'a str,
}

/// Request body for `POST /threads`. Always empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateThreadRequest {}

/// Paginated list envelope (`{"object": "list", "data": [...]}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub last_id: Option<String>,
}

/// Error envelope returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}
