//! Remote assistant protocol types for Threadcite.
//!
//! These model the data shapes exchanged with a hosted stateful assistant:
//! assistant configurations, threads, runs (asynchronous jobs), thread
//! messages with their content blocks and annotations, and file metadata.
//!
//! Content blocks and annotations are closed sum types. Kinds this crate
//! does not understand decode into an `Other` variant instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message on a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// Lifecycle status of a run.
///
/// Only `Queued` and `InProgress` are pending; every other value is
/// terminal from the poller's point of view. Status strings this crate
/// does not know decode to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Whether the run is still waiting on the remote side.
    pub fn is_pending(self) -> bool {
        matches!(self, RunStatus::Queued | RunStatus::InProgress)
    }

    /// Whether the run finished and produced a reply.
    pub fn is_completed(self) -> bool {
        self == RunStatus::Completed
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Expired => "expired",
            RunStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "queued" => Ok(RunStatus::Queued),
            "in_progress" => Ok(RunStatus::InProgress),
            "requires_action" => Ok(RunStatus::RequiresAction),
            "cancelling" => Ok(RunStatus::Cancelling),
            "cancelled" => Ok(RunStatus::Cancelled),
            "failed" => Ok(RunStatus::Failed),
            "completed" => Ok(RunStatus::Completed),
            "incomplete" => Ok(RunStatus::Incomplete),
            "expired" => Ok(RunStatus::Expired),
            other => Err(format!("invalid run status: '{other}'")),
        }
    }
}

/// An assistant configuration held by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// A remote conversation thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadInfo {
    pub id: String,
    /// Unix timestamp (seconds) assigned by the remote service.
    #[serde(default)]
    pub created_at: i64,
}

/// Error detail attached to a run that ended in `failed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLastError {
    pub code: String,
    pub message: String,
}

/// One asynchronous unit of remote processing on a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub last_error: Option<RunLastError>,
}

/// A message on a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    #[serde(default)]
    pub thread_id: String,
    pub role: MessageRole,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub created_at: i64,
}

/// A single content block of a thread message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: TextContent },
    /// Images, refusals and anything else that carries no answer text.
    #[serde(other)]
    Other,
}

/// The payload of a `text` content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// An inline marker within assistant text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    /// Points at a source document; `text` is the raw marker substring.
    FileCitation {
        text: String,
        file_citation: FileCitationRef,
        #[serde(default)]
        start_index: usize,
        #[serde(default)]
        end_index: usize,
    },
    #[serde(other)]
    Other,
}

/// The file reference inside a `file_citation` annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCitationRef {
    pub file_id: String,
}

/// File metadata returned by the remote file store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Ordering of a message listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query parameters for listing the messages of a thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageQuery {
    pub order: SortOrder,
    /// Exclusive lower bound: only messages after this id are returned.
    pub after: Option<String>,
    pub limit: Option<u32>,
}

impl MessageQuery {
    /// Chronological listing of everything after `message_id`.
    pub fn after(message_id: impl Into<String>) -> Self {
        Self {
            order: SortOrder::Asc,
            after: Some(message_id.into()),
            limit: None,
        }
    }
}
