//! Turn submission: append the user utterance and start a run.

use threadcite_types::assistant::MessageRole;
use threadcite_types::error::TurnError;
use threadcite_types::session::{RunHandle, Session};
use tracing::debug;

use crate::assistant::client::AssistantClient;

/// Append `text` as a user message on the session's thread and start one run.
///
/// Returns `None` without any remote call when `text` is blank. Callers are
/// expected to trim and skip empty input themselves; this is only a guard.
///
/// If the message is appended but starting the run fails, the user message
/// stays on the thread and the error is returned as a submission failure.
pub async fn submit_turn<C: AssistantClient>(
    client: &C,
    session: &Session,
    text: &str,
) -> Result<Option<RunHandle>, TurnError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let message = client
        .create_message(&session.thread_id, MessageRole::User, text)
        .await
        .map_err(TurnError::Submission)?;

    let run = client
        .create_run(&session.thread_id, &session.assistant_id)
        .await
        .map_err(TurnError::Submission)?;

    debug!(
        thread.id = %session.thread_id,
        message.id = %message.id,
        run.id = %run.id,
        run.status = %run.status,
        "Turn submitted"
    );

    Ok(Some(RunHandle {
        run_id: run.id,
        thread_id: run.thread_id,
        anchor_message_id: message.id,
        status: run.status,
    }))
}
