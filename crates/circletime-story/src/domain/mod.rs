//! Domain layer for the story context.

pub mod prompt;
pub mod request;
pub mod session;
pub mod story;
