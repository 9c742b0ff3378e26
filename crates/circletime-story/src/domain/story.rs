//! Story content and the shape check applied to provider output.
//!
//! Provider output is untrusted. A candidate either passes every check and
//! becomes a [`Story`] as-is, or is rejected whole with
//! `StoryError::InvalidStoryShape`.

use circletime_core::error::StoryError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of narrative with its comprehension check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPage {
    /// Narrative text shown on the page.
    pub text: String,
    /// Comprehension question about the text.
    pub question: String,
    /// Answer options. Identity is positional; labels may repeat.
    pub options: Vec<String>,
}

impl StoryPage {
    fn from_candidate(index: usize, candidate: Value) -> Result<Self, StoryError> {
        let Value::Object(mut fields) = candidate else {
            return Err(shape_error(format!(
                "page {index} must be an object, found {}",
                kind_of(&candidate)
            )));
        };

        let text = required_string(&mut fields, index, "text")?;
        if text.trim().is_empty() {
            return Err(shape_error(format!("page {index} has empty text")));
        }
        let question = required_string(&mut fields, index, "question")?;

        let options = match fields.remove("options") {
            Some(Value::Array(options)) => options
                .into_iter()
                .enumerate()
                .map(|(position, option)| match option {
                    Value::String(label) => Ok(label),
                    other => Err(shape_error(format!(
                        "page {index} option {position} must be a string, found {}",
                        kind_of(&other)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(shape_error(format!(
                    "page {index} options must be an array, found {}",
                    kind_of(&other)
                )));
            }
            None => return Err(shape_error(format!("page {index} is missing options"))),
        };
        if options.is_empty() {
            return Err(shape_error(format!("page {index} has no options")));
        }

        Ok(Self {
            text,
            question,
            options,
        })
    }

    /// Whether two or more options share a label.
    #[must_use]
    pub fn has_duplicate_options(&self) -> bool {
        self.options
            .iter()
            .enumerate()
            .any(|(i, label)| self.options[..i].contains(label))
    }
}

/// A validated story: a title and its ordered pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Story title.
    pub title: String,
    /// Pages in reading order.
    pub pages: Vec<StoryPage>,
}

impl Story {
    /// Validates a parsed provider document and converts it into a story.
    ///
    /// An empty `pages` array passes; the session decides what to do with a
    /// story that has nothing to show.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::InvalidStoryShape` if the document is not an
    /// object, `pages` is missing or not an array, `title` is not a string,
    /// or any page is incomplete.
    pub fn from_candidate(candidate: Value) -> Result<Self, StoryError> {
        let Value::Object(mut fields) = candidate else {
            return Err(shape_error(format!(
                "story must be an object, found {}",
                kind_of(&candidate)
            )));
        };

        let pages = match fields.remove("pages") {
            Some(Value::Array(pages)) => pages,
            Some(other) => {
                return Err(shape_error(format!(
                    "pages must be an array, found {}",
                    kind_of(&other)
                )));
            }
            None => return Err(shape_error("pages is missing".into())),
        };

        let title = match fields.remove("title") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(title)) => title,
            Some(other) => {
                return Err(shape_error(format!(
                    "title must be a string, found {}",
                    kind_of(&other)
                )));
            }
        };

        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| StoryPage::from_candidate(index, page))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { title, pages })
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether the story has nothing to present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The page at `index`, if it exists.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<&StoryPage> {
        self.pages.get(index)
    }
}

fn required_string(
    fields: &mut Map<String, Value>,
    index: usize,
    name: &str,
) -> Result<String, StoryError> {
    match fields.remove(name) {
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(shape_error(format!(
            "page {index} {name} must be a string, found {}",
            kind_of(&other)
        ))),
        None => Err(shape_error(format!("page {index} is missing {name}"))),
    }
}

fn shape_error(message: String) -> StoryError {
    StoryError::InvalidStoryShape(message)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
