//! OpenAI-compatible Assistants API backend.
//!
//! [`OpenAiAssistantClient`] implements the `AssistantClient` port over the
//! Assistants v2 REST surface (threads, messages, runs, files). Any service
//! exposing the same surface can be used by overriding the base URL.

pub mod client;
pub mod types;

pub use client::OpenAiAssistantClient;
