//! Session manager for the conversation session.
//!
//! Owns the single active [`Session`] for one assistant configuration:
//! created lazily on first use, replaced by a fresh thread on reset.
//! Tracks how many turns completed on the current thread.

use threadcite_types::error::TurnError;
use threadcite_types::session::Session;
use tracing::info;

use crate::assistant::client::AssistantClient;

/// Manages the lifecycle of the conversation session.
///
/// A session is only stored once both the assistant lookup and the thread
/// creation succeeded, so a failed bootstrap never leaves a half-initialized
/// session behind.
pub struct SessionManager {
    assistant_id: String,
    current: Option<Session>,
    /// Turn counter for the current thread.
    turn_count: u32,
}

impl SessionManager {
    /// Create a manager for the given assistant configuration. No remote call is made.
    pub fn new(assistant_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            current: None,
            turn_count: 0,
        }
    }

    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    /// The active session, if one was provisioned.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Current turn count within this thread.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Increment the turn counter after a completed exchange.
    pub fn increment_turn(&mut self) {
        self.turn_count += 1;
    }

    /// Return the active session, provisioning it on first use.
    ///
    /// The first call looks up the assistant and creates a thread; later
    /// calls return the same session without any remote call.
    pub async fn get_or_create<C: AssistantClient>(
        &mut self,
        client: &C,
    ) -> Result<&Session, TurnError> {
        let session = match self.current.take() {
            Some(session) => session,
            None => {
                let assistant = client
                    .retrieve_assistant(&self.assistant_id)
                    .await
                    .map_err(TurnError::Provisioning)?;
                let thread = client
                    .create_thread()
                    .await
                    .map_err(TurnError::Provisioning)?;

                info!(
                    assistant.id = %assistant.id,
                    assistant.name = ?assistant.name,
                    thread.id = %thread.id,
                    "Conversation session provisioned"
                );
                self.turn_count = 0;
                Session::new(assistant.id, thread.id)
            }
        };

        Ok(&*self.current.insert(session))
    }

    /// Discard the current thread and start a fresh one under the same assistant.
    ///
    /// When no session was ever provisioned this is a no-op returning `None`.
    /// If creating the new thread fails, the old thread is still discarded and
    /// the next turn provisions from scratch.
    pub async fn reset<C: AssistantClient>(
        &mut self,
        client: &C,
    ) -> Result<Option<&Session>, TurnError> {
        let Some(previous) = self.current.take() else {
            return Ok(None);
        };
        self.turn_count = 0;

        let thread = client
            .create_thread()
            .await
            .map_err(TurnError::Provisioning)?;

        info!(
            assistant.id = %previous.assistant_id,
            thread.previous = %previous.thread_id,
            thread.id = %thread.id,
            "Conversation session reset"
        );
        Ok(Some(&*self.current.insert(Session::new(
            previous.assistant_id,
            thread.id,
        ))))
    }
}
