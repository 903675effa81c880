//! Turn orchestration and port trait definitions for Threadcite.
//!
//! This crate defines the [`assistant::client::AssistantClient`] port that the
//! infrastructure layer implements, and the turn pipeline built on top of it:
//! session lifecycle, turn submission, run polling, reply extraction and
//! source resolution. It depends only on `threadcite-types` -- never on
//! `threadcite-infra` or any HTTP crate.

pub mod assistant;
pub mod chat;

#[cfg(test)]
pub(crate) mod testing;
