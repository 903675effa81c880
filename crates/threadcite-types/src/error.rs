use thiserror::Error;

/// Errors from calls to the remote assistant service.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("api error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),
}

/// Errors surfaced at the turn boundary.
///
/// The wrapped remote error is part of the message and is not exposed as
/// `source()`, so error chains render it once.
///
/// Only `Provisioning` leaves the system unusable; every other variant is
/// reported to the user and the conversation continues with the next turn.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("session provisioning failed: {0}")]
    Provisioning(AssistantError),

    #[error("failed to submit turn: {0}")]
    Submission(AssistantError),

    #[error("failed to fetch reply: {0}")]
    Extraction(AssistantError),

    #[error("run {run_id} still pending after {waited_ms}ms")]
    PollTimeout { run_id: String, waited_ms: u64 },

    #[error("a turn is already in flight for this session")]
    Busy,
}

impl TurnError {
    /// Whether the error prevents any further use of the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TurnError::Provisioning(_))
    }
}
