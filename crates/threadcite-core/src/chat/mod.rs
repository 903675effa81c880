//! The conversational turn pipeline.
//!
//! Control flow for one turn: [`submit::submit_turn`] appends the user
//! message and starts a run, [`poller::RunPoller`] waits for it to finish,
//! and [`extractor::extract_reply`] turns the new assistant message into a
//! [`Reply`](threadcite_types::chat::Reply), resolving cited files through
//! [`resolver::SourceResolver`]. [`service::ChatService`] runs that pipeline
//! one turn at a time per session; [`conversation::Conversation`] adds the
//! display history the UI shell works with.

pub mod conversation;
pub mod extractor;
pub mod poller;
pub mod resolver;
pub mod service;
pub mod session;
pub mod submit;
