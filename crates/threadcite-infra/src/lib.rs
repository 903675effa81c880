//! Infrastructure layer for Threadcite.
//!
//! Contains the implementation of the [`AssistantClient`] port defined in
//! `threadcite-core` for OpenAI-compatible Assistants APIs, plus the
//! configuration loader, data directory resolution and API key lookup.
//!
//! [`AssistantClient`]: threadcite_core::assistant::client::AssistantClient

pub mod config;
pub mod filesystem;
pub mod openai;
pub mod secret;
