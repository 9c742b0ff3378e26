//! Shared test doubles and fixtures for the CircleTime story engine.

mod fixtures;
mod transport;

pub use fixtures::{envelope_with, story_envelope, story_json};
pub use transport::{FailingTransport, GatedTransport, ScriptedTransport};
