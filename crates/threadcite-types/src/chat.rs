//! Per-turn results and display history records.
//!
//! A [`Reply`] is what one turn produces: the concatenated answer text and
//! the distinct sources it cites. [`ChatEntry`] is the record the UI shell
//! keeps in its history.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label shown when a citation carries no page number.
pub const UNKNOWN_PAGE: &str = "Unknown";

/// A cited source document and location.
///
/// Two references are the same source when both the file name and the
/// page number are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceReference {
    pub file_name: String,
    pub page_number: Option<String>,
}

impl SourceReference {
    pub fn new(file_name: impl Into<String>, page_number: Option<String>) -> Self {
        Self {
            file_name: file_name.into(),
            page_number,
        }
    }

    /// Page number for display, or [`UNKNOWN_PAGE`].
    pub fn page_label(&self) -> &str {
        self.page_number.as_deref().unwrap_or(UNKNOWN_PAGE)
    }
}

impl fmt::Display for SourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Page: {}", self.file_name, self.page_label())
    }
}

/// The assistant's answer to one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub sources: Vec<SourceReference>,
}

impl Reply {
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the turn yielded no answer text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Who produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    You,
    Assistant,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::You => "You",
            Sender::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One displayed record of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceReference>,
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::You,
            text: text.into(),
            sources: Vec::new(),
        }
    }

    pub fn assistant(reply: Reply) -> Self {
        Self {
            sender: Sender::Assistant,
            text: reply.text,
            sources: reply.sources,
        }
    }
}
