//! Provider response fixtures.

use serde_json::{Value, json};

/// A story document with `pages` three-option pages.
#[must_use]
pub fn story_json(pages: usize) -> Value {
    let pages: Vec<Value> = (0..pages)
        .map(|i| {
            json!({
                "text": format!("Page {} of the story.", i + 1),
                "question": format!("What happens on page {}?", i + 1),
                "options": ["Rain", "Sun", "Snow"],
            })
        })
        .collect();
    json!({ "title": "Leo and the Rain", "pages": pages })
}

/// Wraps `content` in a chat-completion envelope as its first choice.
#[must_use]
pub fn envelope_with(content: &str) -> String {
    json!({
        "id": "gen-test",
        "choices": [
            {
                "index": 0,
                "finish_reason": "stop",
                "message": { "role": "assistant", "content": content }
            }
        ]
    })
    .to_string()
}

/// An envelope whose content is [`story_json`] with `pages` pages.
#[must_use]
pub fn story_envelope(pages: usize) -> String {
    envelope_with(&story_json(pages).to_string())
}
