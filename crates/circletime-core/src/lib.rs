//! CircleTime Core: shared abstractions.
//!
//! This crate defines the error taxonomy, the chat-completion wire types, and
//! the transport port that the story context depends on. It contains no
//! infrastructure code.

pub mod completion;
pub mod error;
