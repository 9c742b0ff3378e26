//! Instruction sent to the generative provider.

use circletime_core::completion::{ChatMessage, ChatRequest, ResponseFormat};

use super::request::GenerationRequest;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";

/// Number of pages the instruction asks for. Not enforced on the reply.
pub const REQUESTED_PAGE_COUNT: usize = 3;

/// Builds the chat request for one story.
///
/// Name and topic are interpolated into the instruction text only; the
/// reply is parsed as data and never evaluated.
#[must_use]
pub fn build_chat_request(request: &GenerationRequest, model: &str) -> ChatRequest {
    let request = request.normalized();
    let instruction = format!(
        "You are an experienced kindergarten teacher who writes stories for children \
         learning English as an additional language.\n\
         Write an interactive story for a {age} year old named {name}.\n\
         Topic: {topic}.\n\n\
         Return ONLY a JSON object with this shape:\n\
         {{\"title\": \"Title of story\", \"pages\": [{{\"text\": \"Simple sentence\", \
         \"question\": \"Simple check\", \"options\": [\"Option1\", \"Option2\"]}}]}}\n\
         Use exactly {pages} pages. Keep the vocabulary simple for second language learners.",
        age = request.age_bracket,
        name = request.student_name,
        topic = request.topic,
        pages = REQUESTED_PAGE_COUNT,
    );

    ChatRequest {
        model: model.to_owned(),
        messages: vec![ChatMessage::system(instruction)],
        response_format: Some(ResponseFormat::json_object()),
    }
}
