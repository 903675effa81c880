//! Scripted in-memory [`AssistantClient`] shared by the core unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use threadcite_types::assistant::{
    Annotation, AssistantInfo, ContentBlock, FileCitationRef, FileObject, MessageQuery,
    MessageRole, Run, RunStatus, TextContent, ThreadInfo, ThreadMessage,
};
use threadcite_types::error::AssistantError;

use crate::assistant::client::AssistantClient;

/// Per-method call counters.
#[derive(Default)]
pub(crate) struct Calls {
    pub retrieve_assistant: AtomicUsize,
    pub create_thread: AtomicUsize,
    pub create_message: AtomicUsize,
    pub create_run: AtomicUsize,
    pub retrieve_run: AtomicUsize,
    pub list_messages: AtomicUsize,
    pub retrieve_file: AtomicUsize,
}

impl Calls {
    pub fn total(&self) -> usize {
        [
            &self.retrieve_assistant,
            &self.create_thread,
            &self.create_message,
            &self.create_run,
            &self.retrieve_run,
            &self.list_messages,
            &self.retrieve_file,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }
}

/// A client whose every answer is scripted up front.
pub(crate) struct ScriptedClient {
    pub calls: Calls,
    initial_status: RunStatus,
    statuses: Mutex<VecDeque<RunStatus>>,
    reply: Option<ThreadMessage>,
    files: HashMap<String, Option<String>>,
    fail_assistant: bool,
    fail_message: bool,
    fail_list: bool,
    pub posted: Mutex<Vec<String>>,
    pub last_query: Mutex<Option<MessageQuery>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            calls: Calls::default(),
            initial_status: RunStatus::Queued,
            statuses: Mutex::new(VecDeque::new()),
            reply: None,
            files: HashMap::new(),
            fail_assistant: false,
            fail_message: false,
            fail_list: false,
            posted: Mutex::new(Vec::new()),
            last_query: Mutex::new(None),
        }
    }

    /// Status returned by `create_run`.
    pub fn with_initial_status(mut self, status: RunStatus) -> Self {
        self.initial_status = status;
        self
    }

    /// Statuses returned by successive `retrieve_run` calls; `completed` once exhausted.
    pub fn with_statuses(self, statuses: impl IntoIterator<Item = RunStatus>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into_iter().collect();
        self
    }

    pub fn with_reply(mut self, reply: ThreadMessage) -> Self {
        self.reply = Some(reply);
        self
    }

    pub fn with_file(mut self, file_id: &str, filename: Option<&str>) -> Self {
        self.files
            .insert(file_id.to_string(), filename.map(str::to_string));
        self
    }

    pub fn failing_assistant(mut self) -> Self {
        self.fail_assistant = true;
        self
    }

    pub fn failing_message(mut self) -> Self {
        self.fail_message = true;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

impl AssistantClient for ScriptedClient {
    async fn retrieve_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<AssistantInfo, AssistantError> {
        self.calls.retrieve_assistant.fetch_add(1, Ordering::SeqCst);
        if self.fail_assistant {
            return Err(AssistantError::NotFound(format!("assistant {assistant_id}")));
        }
        Ok(AssistantInfo {
            id: assistant_id.to_string(),
            name: Some("Election Helper".to_string()),
            model: Some("gpt-4o".to_string()),
        })
    }

    async fn create_thread(&self) -> Result<ThreadInfo, AssistantError> {
        let n = self.calls.create_thread.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ThreadInfo {
            id: format!("thread_{n}"),
            created_at: 0,
        })
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage, AssistantError> {
        let n = self.calls.create_message.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_message {
            return Err(AssistantError::Transport("connection reset".to_string()));
        }
        self.posted.lock().unwrap().push(content.to_string());
        Ok(ThreadMessage {
            id: format!("msg_user_{n}"),
            thread_id: thread_id.to_string(),
            role,
            content: vec![text_block(content, Vec::new())],
            created_at: 0,
        })
    }

    async fn create_run(
        &self,
        thread_id: &str,
        _assistant_id: &str,
    ) -> Result<Run, AssistantError> {
        let n = self.calls.create_run.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Run {
            id: format!("run_{n}"),
            thread_id: thread_id.to_string(),
            status: self.initial_status,
            last_error: None,
        })
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError> {
        self.calls.retrieve_run.fetch_add(1, Ordering::SeqCst);
        let status = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(RunStatus::Completed);
        Ok(Run {
            id: run_id.to_string(),
            thread_id: thread_id.to_string(),
            status,
            last_error: None,
        })
    }

    async fn list_messages(
        &self,
        _thread_id: &str,
        query: &MessageQuery,
    ) -> Result<Vec<ThreadMessage>, AssistantError> {
        self.calls.list_messages.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        if self.fail_list {
            return Err(AssistantError::Api {
                status: 500,
                message: "listing unavailable".to_string(),
            });
        }
        Ok(self.reply.clone().into_iter().collect())
    }

    async fn retrieve_file(&self, file_id: &str) -> Result<FileObject, AssistantError> {
        self.calls.retrieve_file.fetch_add(1, Ordering::SeqCst);
        match self.files.get(file_id) {
            Some(filename) => Ok(FileObject {
                id: file_id.to_string(),
                filename: filename.clone(),
            }),
            None => Err(AssistantError::NotFound(format!("file {file_id}"))),
        }
    }
}

pub(crate) fn text_block(value: &str, annotations: Vec<Annotation>) -> ContentBlock {
    ContentBlock::Text {
        text: TextContent {
            value: value.to_string(),
            annotations,
        },
    }
}

pub(crate) fn citation(file_id: &str, marker: &str) -> Annotation {
    Annotation::FileCitation {
        text: marker.to_string(),
        file_citation: FileCitationRef {
            file_id: file_id.to_string(),
        },
        start_index: 0,
        end_index: marker.chars().count(),
    }
}

pub(crate) fn assistant_message(blocks: Vec<ContentBlock>) -> ThreadMessage {
    ThreadMessage {
        id: "msg_assistant_1".to_string(),
        thread_id: "thread_1".to_string(),
        role: MessageRole::Assistant,
        content: blocks,
        created_at: 0,
    }
}
