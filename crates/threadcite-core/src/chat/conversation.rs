//! Conversation: the entry point a UI shell drives.
//!
//! Wraps a [`ChatService`] with the display history. `submit` takes raw
//! user text and reports what happened as a [`SubmitOutcome`]; errors never
//! escape as `Err`, they become notices the shell can show.

use threadcite_types::chat::{ChatEntry, Reply};
use threadcite_types::error::TurnError;
use threadcite_types::session::Session;
use tracing::{error, warn};

use crate::assistant::client::AssistantClient;

use super::resolver::{FileNameCache, InMemoryFileNameCache};
use super::service::ChatService;

/// Ordered display records of the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatHistory {
    entries: Vec<ChatEntry>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ChatEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Result of submitting one line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// The turn ran. The reply may be empty (e.g. the run failed remotely).
    Answered(Reply),
    /// The turn failed; the conversation remains usable.
    Failed { notice: String },
    /// The session could not be provisioned; no further turns will work.
    Fatal { notice: String },
}

impl SubmitOutcome {
    /// The reply, or an empty one for failed turns. `None` for ignored input.
    pub fn reply(&self) -> Option<Reply> {
        match self {
            SubmitOutcome::Ignored => None,
            SubmitOutcome::Answered(reply) => Some(reply.clone()),
            SubmitOutcome::Failed { .. } | SubmitOutcome::Fatal { .. } => Some(Reply::empty()),
        }
    }

    /// The user-visible error notice, if any.
    pub fn notice(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Failed { notice } | SubmitOutcome::Fatal { notice } => Some(notice),
            _ => None,
        }
    }
}

/// A chat service plus the history the UI shell displays.
pub struct Conversation<C: AssistantClient, K: FileNameCache = InMemoryFileNameCache> {
    service: ChatService<C, K>,
    history: ChatHistory,
}

impl<C: AssistantClient, K: FileNameCache> Conversation<C, K> {
    pub fn new(service: ChatService<C, K>) -> Self {
        Self {
            service,
            history: ChatHistory::new(),
        }
    }

    pub fn service(&self) -> &ChatService<C, K> {
        &self.service
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Submit one line of user input.
    ///
    /// Blank input is ignored. Otherwise the user entry is recorded first;
    /// an assistant entry is added only when the reply has text.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.history.push(ChatEntry::user(text));

        match self.service.ask(text).await {
            Ok(reply) => {
                if !reply.is_empty() {
                    self.history.push(ChatEntry::assistant(reply.clone()));
                }
                SubmitOutcome::Answered(reply)
            }
            Err(err) => notice_for(&err),
        }
    }

    /// Clear the history and start a fresh thread.
    pub async fn reset(&mut self) -> Result<Option<Session>, TurnError> {
        self.history.clear();
        self.service.reset().await
    }
}

fn notice_for(err: &TurnError) -> SubmitOutcome {
    let notice = format!("An error occurred: {err}");
    if err.is_fatal() {
        error!(error = %err, "Turn failed fatally");
        SubmitOutcome::Fatal { notice }
    } else {
        warn!(error = %err, "Turn failed");
        SubmitOutcome::Failed { notice }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::chat::poller::RunPoller;
    use crate::testing::{ScriptedClient, assistant_message, citation, text_block};
    use threadcite_types::assistant::RunStatus;
    use threadcite_types::chat::{Sender, SourceReference};

    fn conversation(client: ScriptedClient) -> Conversation<ScriptedClient> {
        Conversation::new(ChatService::new(
            client,
            "asst_1",
            RunPoller::new(Duration::from_millis(1), None),
        ))
    }

    #[tokio::test]
    async fn test_blank_submit_is_noop() {
        let mut convo = conversation(ScriptedClient::new());

        assert_eq!(convo.submit("").await, SubmitOutcome::Ignored);
        assert_eq!(convo.submit("   ").await, SubmitOutcome::Ignored);

        assert!(convo.history().is_empty());
        assert_eq!(convo.service().client().calls.total(), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_cited_answer() {
        let client = ScriptedClient::new()
            .with_statuses([RunStatus::InProgress, RunStatus::Completed])
            .with_file("f1", Some("nhs_manifesto.pdf"))
            .with_reply(assistant_message(vec![
                text_block(
                    "The NHS policy is to cut waiting lists. ",
                    vec![citation("f1", "【5:0†source】")],
                ),
                text_block(
                    "Funding rises each year.",
                    vec![citation("f1", "【5:1†source】")],
                ),
            ]));
        let mut convo = conversation(client);

        let outcome = convo.submit("What is the NHS policy?").await;

        let expected = Reply {
            text: "The NHS policy is to cut waiting lists. Funding rises each year.".to_string(),
            sources: vec![SourceReference::new("nhs_manifesto.pdf", Some("5".to_string()))],
        };
        assert_eq!(outcome, SubmitOutcome::Answered(expected.clone()));

        let entries = convo.history().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ChatEntry::user("What is the NHS policy?"));
        assert_eq!(entries[1], ChatEntry::assistant(expected));

        let calls = &convo.service().client().calls;
        assert_eq!(ScriptedClient::count(&calls.retrieve_run), 2);
        assert_eq!(ScriptedClient::count(&calls.retrieve_file), 1);
    }

    #[tokio::test]
    async fn test_listing_failure_keeps_user_turn_only() {
        let client = ScriptedClient::new().failing_list();
        let mut convo = conversation(client);

        let outcome = convo.submit("hello").await;

        assert_eq!(outcome.reply(), Some(Reply::empty()));
        assert!(outcome.notice().unwrap().starts_with("An error occurred: "));
        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert_eq!(convo.history().entries(), [ChatEntry::user("hello")]);
    }

    #[tokio::test]
    async fn test_conversation_usable_after_failure() {
        let client = ScriptedClient::new()
            .with_statuses([RunStatus::Expired])
            .with_reply(assistant_message(vec![text_block("later", Vec::new())]));
        let mut convo = conversation(client);

        let first = convo.submit("first").await;
        assert_eq!(first, SubmitOutcome::Answered(Reply::empty()));
        assert_eq!(convo.history().len(), 1);

        let second = convo.submit("second").await;
        assert_eq!(second.reply().unwrap().text, "later");
        assert_eq!(convo.history().len(), 3);
        assert_eq!(convo.history().entries()[2].sender, Sender::Assistant);
    }

    #[tokio::test]
    async fn test_poll_timeout_is_recoverable() {
        let client = ScriptedClient::new()
            .with_statuses(std::iter::repeat_n(RunStatus::InProgress, 1000))
            .with_reply(assistant_message(vec![text_block("late", Vec::new())]));
        let mut convo = Conversation::new(ChatService::new(
            client,
            "asst_1",
            RunPoller::new(Duration::from_millis(1), Some(Duration::from_millis(5))),
        ));

        let outcome = convo.submit("hello").await;

        let SubmitOutcome::Failed { notice } = &outcome else {
            panic!("expected a recoverable failure, got {outcome:?}");
        };
        assert!(notice.starts_with("An error occurred: run run_1 still pending after"));
        assert_eq!(outcome.reply(), Some(Reply::empty()));
        assert_eq!(convo.history().entries(), [ChatEntry::user("hello")]);
        assert_eq!(
            ScriptedClient::count(&convo.service().client().calls.list_messages),
            0
        );
    }

    #[tokio::test]
    async fn test_provisioning_failure_is_fatal_notice() {
        let mut convo = conversation(ScriptedClient::new().failing_assistant());
        let outcome = convo.submit("hello").await;
        assert!(matches!(outcome, SubmitOutcome::Fatal { .. }));
        assert_eq!(convo.history().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_history() {
        let client = ScriptedClient::new()
            .with_reply(assistant_message(vec![text_block("ok", Vec::new())]));
        let mut convo = conversation(client);
        convo.submit("hi").await;
        assert_eq!(convo.history().len(), 2);

        let fresh = convo.reset().await.unwrap().unwrap();
        assert!(convo.history().is_empty());
        assert_eq!(fresh.thread_id, "thread_2");
    }
}
