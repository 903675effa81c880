//! Conversation session and in-flight run handle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assistant::RunStatus;

/// One long-lived dialogue context bound to one assistant configuration.
///
/// A session is only ever exposed after both the assistant lookup and the
/// thread creation succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub assistant_id: String,
    pub thread_id: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(assistant_id: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            thread_id: thread_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// Handle to a run started for one user turn.
///
/// `anchor_message_id` is the id of the user message that started the turn;
/// the reply is the first message listed after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHandle {
    pub run_id: String,
    pub thread_id: String,
    pub anchor_message_id: String,
    /// Status reported when the run was created.
    pub status: RunStatus,
}
