//! Shared domain types for Threadcite.
//!
//! This crate contains the types passed between the turn pipeline, the
//! remote assistant client, and the UI shell: sessions, runs, thread
//! messages with their content blocks and annotations, cited-source
//! references, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod assistant;
pub mod chat;
pub mod config;
pub mod error;
pub mod session;
