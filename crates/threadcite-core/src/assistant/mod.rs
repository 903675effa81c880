//! Remote assistant abstractions.
//!
//! - `AssistantClient`: RPITIT trait for the remote thread/run/message/file protocol

pub mod client;
