//! Chat service running the turn pipeline for one conversation session.
//!
//! ChatService owns the assistant client, the session manager, the source
//! resolver and the poller. Each turn holds the session lock from
//! submission to extraction, so turns on one session are processed strictly
//! one at a time.

use threadcite_types::chat::Reply;
use threadcite_types::error::TurnError;
use threadcite_types::session::Session;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{Instrument, info, info_span, warn};

use crate::assistant::client::AssistantClient;

use super::extractor::extract_reply;
use super::poller::RunPoller;
use super::resolver::{FileNameCache, InMemoryFileNameCache, SourceResolver};
use super::session::SessionManager;
use super::submit::submit_turn;

/// Orchestrates session lifecycle and the submit -> poll -> extract pipeline.
///
/// Generic over `AssistantClient` and `FileNameCache` to maintain clean
/// architecture (threadcite-core never depends on threadcite-infra).
pub struct ChatService<C: AssistantClient, K: FileNameCache = InMemoryFileNameCache> {
    client: C,
    resolver: SourceResolver<K>,
    poller: RunPoller,
    session: Mutex<SessionManager>,
}

impl<C: AssistantClient> ChatService<C> {
    /// Create a chat service with a fresh in-memory file name cache.
    pub fn new(client: C, assistant_id: impl Into<String>, poller: RunPoller) -> Self {
        Self::with_cache(client, InMemoryFileNameCache::new(), assistant_id, poller)
    }
}

impl<C: AssistantClient, K: FileNameCache> ChatService<C, K> {
    /// Create a chat service with an injected file name cache.
    pub fn with_cache(
        client: C,
        cache: K,
        assistant_id: impl Into<String>,
        poller: RunPoller,
    ) -> Self {
        Self {
            client,
            resolver: SourceResolver::new(cache),
            poller,
            session: Mutex::new(SessionManager::new(assistant_id)),
        }
    }

    /// Access the assistant client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Access the source resolver (and through it, the file name cache).
    pub fn resolver(&self) -> &SourceResolver<K> {
        &self.resolver
    }

    // --- Session lifecycle ---

    /// Return the session, provisioning it on first use.
    ///
    /// Waits for any in-flight turn to finish first.
    pub async fn session(&self) -> Result<Session, TurnError> {
        let mut mgr = self.session.lock().await;
        mgr.get_or_create(&self.client).await.cloned()
    }

    /// The session if already provisioned, without any remote call.
    pub async fn current_session(&self) -> Option<Session> {
        self.session.lock().await.current().cloned()
    }

    /// Discard the current thread and its resolved file names.
    ///
    /// Returns the fresh session, or `None` when nothing had been provisioned.
    pub async fn reset(&self) -> Result<Option<Session>, TurnError> {
        let mut mgr = self.session.lock().await;
        self.resolver.clear();
        let fresh = mgr.reset(&self.client).await?.cloned();
        Ok(fresh)
    }

    // --- Turns ---

    /// Run one turn, queueing behind any turn already in flight.
    ///
    /// Blank input returns an empty reply without touching the session.
    /// A run that ends in any status other than `completed` yields an empty reply.
    pub async fn ask(&self, text: &str) -> Result<Reply, TurnError> {
        if text.trim().is_empty() {
            return Ok(Reply::empty());
        }
        let mgr = self.session.lock().await;
        self.run_turn(mgr, text).await
    }

    /// Run one turn, or fail with [`TurnError::Busy`] if one is already in flight.
    pub async fn try_ask(&self, text: &str) -> Result<Reply, TurnError> {
        if text.trim().is_empty() {
            return Ok(Reply::empty());
        }
        let mgr = self.session.try_lock().map_err(|_| TurnError::Busy)?;
        self.run_turn(mgr, text).await
    }

    async fn run_turn(
        &self,
        mut mgr: MutexGuard<'_, SessionManager>,
        text: &str,
    ) -> Result<Reply, TurnError> {
        let session = mgr.get_or_create(&self.client).await?.clone();
        let span = info_span!(
            "turn",
            assistant.id = %session.assistant_id,
            thread.id = %session.thread_id,
            turn = mgr.turn_count() + 1,
        );

        let reply = async {
            let Some(handle) = submit_turn(&self.client, &session, text).await? else {
                return Ok(Reply::empty());
            };

            let run = self.poller.await_completion(&self.client, &handle).await?;
            if !run.status.is_completed() {
                warn!(
                    run.id = %run.id,
                    run.status = %run.status,
                    error = ?run.last_error,
                    "Run ended without completing, no reply"
                );
                return Ok(Reply::empty());
            }

            let reply = extract_reply(&self.client, &self.resolver, &handle).await?;
            info!(
                run.id = %run.id,
                reply.chars = reply.text.chars().count(),
                reply.sources = reply.sources.len(),
                "Turn completed"
            );
            Ok::<_, TurnError>(reply)
        }
        .instrument(span)
        .await?;

        mgr.increment_turn();
        Ok(reply)
    }
}
