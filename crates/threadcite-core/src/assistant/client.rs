//! AssistantClient trait definition.
//!
//! This is the port every remote assistant backend implements. Each method
//! maps to exactly one remote call so the turn pipeline can be exercised
//! against scripted mocks.

use std::future::Future;

use threadcite_types::assistant::{
    AssistantInfo, FileObject, MessageQuery, MessageRole, Run, ThreadInfo, ThreadMessage,
};
use threadcite_types::error::AssistantError;

/// Trait for hosted stateful assistant backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in threadcite-infra (e.g., `OpenAiAssistantClient`).
pub trait AssistantClient: Send + Sync {
    /// Look up an assistant configuration by id.
    fn retrieve_assistant(
        &self,
        assistant_id: &str,
    ) -> impl Future<Output = Result<AssistantInfo, AssistantError>> + Send;

    /// Create a new, empty thread.
    fn create_thread(&self) -> impl Future<Output = Result<ThreadInfo, AssistantError>> + Send;

    /// Append a message to a thread.
    fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> impl Future<Output = Result<ThreadMessage, AssistantError>> + Send;

    /// Start a run of `assistant_id` over the thread.
    fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> impl Future<Output = Result<Run, AssistantError>> + Send;

    /// Fetch the current state of a run.
    fn retrieve_run(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> impl Future<Output = Result<Run, AssistantError>> + Send;

    /// List messages on a thread.
    fn list_messages(
        &self,
        thread_id: &str,
        query: &MessageQuery,
    ) -> impl Future<Output = Result<Vec<ThreadMessage>, AssistantError>> + Send;

    /// Fetch file metadata.
    fn retrieve_file(
        &self,
        file_id: &str,
    ) -> impl Future<Output = Result<FileObject, AssistantError>> + Send;
}
