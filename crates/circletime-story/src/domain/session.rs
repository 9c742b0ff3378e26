//! Presentation state machine for a single story session.
//!
//! Transitions are pure: [`transition`] takes the current state and an event
//! and returns the next state plus at most one effect for the caller to run.
//! Acquisition results are tagged with the generation that requested them;
//! a result whose generation is no longer current is discarded.

use circletime_core::error::StoryError;
use serde::Serialize;

use super::request::GenerationRequest;
use super::story::{Story, StoryPage};

/// Shown once the last page has been answered.
pub const STORY_COMPLETE_MESSAGE: &str = "The End! Great job listening!";

/// Shown when a loaded story has nothing to present.
pub const RECOVERY_MESSAGE: &str = "The storybook is empty!";

/// Coarse session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the teacher to fill in name, age bracket and topic.
    #[default]
    Configuring,
    /// One acquisition is in flight.
    Loading,
    /// Showing `current_page_index` of the loaded story.
    Presenting,
    /// Loaded data cannot be shown; only reset leaves this phase.
    Recovering,
}

/// User-visible message attached to the Configuring phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The start form was incomplete.
    MissingDetails {
        /// Prompt asking for the missing input.
        message: String,
    },
    /// The story could not be obtained.
    AcquisitionFailed {
        /// User-facing explanation.
        message: String,
        /// HTTP status associated with the failure.
        status: u16,
        /// Whether pressing start again may help.
        retryable: bool,
    },
    /// The previous story was read to the end.
    StoryComplete {
        /// Closing message.
        message: String,
    },
}

impl Notice {
    fn missing_details(error: &StoryError) -> Self {
        Self::MissingDetails {
            message: error.user_message().to_owned(),
        }
    }

    fn acquisition_failed(error: &StoryError) -> Self {
        Self::AcquisitionFailed {
            message: error.user_message().to_owned(),
            status: error.http_status(),
            retryable: error.is_retryable(),
        }
    }

    fn story_complete() -> Self {
        Self::StoryComplete {
            message: STORY_COMPLETE_MESSAGE.to_owned(),
        }
    }
}

/// Inputs that drive the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The teacher pressed start.
    StartRequested(GenerationRequest),
    /// The acquisition for `generation` returned a story.
    AcquisitionSucceeded {
        /// Generation the acquisition was started for.
        generation: u64,
        /// The validated story.
        story: Story,
    },
    /// The acquisition for `generation` failed.
    AcquisitionFailed {
        /// Generation the acquisition was started for.
        generation: u64,
        /// Classified failure.
        error: StoryError,
    },
    /// An option was chosen on a page.
    OptionSelected {
        /// Page the option belongs to.
        page_index: usize,
        /// Position of the option on that page.
        option_index: usize,
    },
    /// The session was abandoned or acknowledged.
    ResetRequested,
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Acquire a story and report back with the same generation.
    Acquire {
        /// Generation token to echo in the completion event.
        generation: u64,
        /// Normalized request to send.
        request: GenerationRequest,
    },
}

/// State of the single in-memory session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    phase: Phase,
    story: Option<Story>,
    current_page_index: usize,
    generation: u64,
    notice: Option<Notice>,
}

impl SessionState {
    /// A fresh session in Configuring.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The loaded story, if any.
    #[must_use]
    pub fn story(&self) -> Option<&Story> {
        self.story.as_ref()
    }

    /// Page cursor. Meaningful only while Presenting.
    #[must_use]
    pub fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    /// Token of the most recent acquisition request.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Message to show alongside the configuration form.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The page under the cursor, when Presenting and in bounds.
    #[must_use]
    pub fn current_page(&self) -> Option<&StoryPage> {
        if self.phase != Phase::Presenting {
            return None;
        }
        self.story.as_ref()?.page(self.current_page_index)
    }

    /// Renders the state for display.
    ///
    /// A Presenting state whose cursor does not address a page renders as
    /// Recovering instead of indexing out of bounds.
    #[must_use]
    pub fn view(&self) -> SessionView {
        match self.phase {
            Phase::Configuring => SessionView::Configuring {
                notice: self.notice.clone(),
            },
            Phase::Loading => SessionView::Loading,
            Phase::Recovering => SessionView::recovering(),
            Phase::Presenting => {
                let (Some(story), Some(page)) = (self.story.as_ref(), self.current_page()) else {
                    return SessionView::recovering();
                };
                SessionView::Presenting {
                    title: story.title.clone(),
                    page_index: self.current_page_index,
                    page_number: self.current_page_index + 1,
                    page_count: story.page_count(),
                    text: page.text.clone(),
                    question: page.question.clone(),
                    options: page
                        .options
                        .iter()
                        .enumerate()
                        .map(|(index, label)| OptionView {
                            index,
                            label: label.clone(),
                        })
                        .collect(),
                }
            }
        }
    }

    fn reset(mut self) -> Self {
        if self.phase == Phase::Loading {
            self.generation = self.generation.wrapping_add(1);
        }
        self.phase = Phase::Configuring;
        self.story = None;
        self.current_page_index = 0;
        self.notice = None;
        self
    }

    fn start(mut self, request: GenerationRequest) -> (Self, Option<Effect>) {
        if self.phase != Phase::Configuring {
            return (self, None);
        }
        if let Err(error) = request.validate() {
            self.notice = Some(Notice::missing_details(&error));
            return (self, None);
        }

        self.generation = self.generation.wrapping_add(1);
        self.phase = Phase::Loading;
        self.story = None;
        self.current_page_index = 0;
        self.notice = None;

        let effect = Effect::Acquire {
            generation: self.generation,
            request: request.normalized(),
        };
        (self, Some(effect))
    }

    fn awaits(&self, generation: u64) -> bool {
        self.phase == Phase::Loading && self.generation == generation
    }

    fn loaded(mut self, generation: u64, story: Story) -> Self {
        if !self.awaits(generation) {
            return self;
        }
        self.phase = if story.is_empty() {
            Phase::Recovering
        } else {
            Phase::Presenting
        };
        self.story = Some(story);
        self.current_page_index = 0;
        self
    }

    fn failed(mut self, generation: u64, error: &StoryError) -> Self {
        if !self.awaits(generation) {
            return self;
        }
        self.phase = Phase::Configuring;
        self.story = None;
        self.current_page_index = 0;
        self.notice = Some(Notice::acquisition_failed(error));
        self
    }

    fn select(mut self, page_index: usize, option_index: usize) -> Self {
        if self.phase != Phase::Presenting || page_index != self.current_page_index {
            return self;
        }
        let Some((page_count, option_count)) = self.story.as_ref().and_then(|story| {
            story
                .page(page_index)
                .map(|page| (story.page_count(), page.options.len()))
        }) else {
            return self;
        };
        if option_index >= option_count {
            return self;
        }

        if page_index + 1 >= page_count {
            let mut done = self.reset();
            done.notice = Some(Notice::story_complete());
            return done;
        }
        self.current_page_index += 1;
        self
    }

    fn settle(mut self) -> Self {
        if self.phase == Phase::Presenting && self.current_page().is_none() {
            self.phase = Phase::Recovering;
        }
        self
    }
}

/// Applies `event` to `state`.
#[must_use]
pub fn transition(state: SessionState, event: SessionEvent) -> (SessionState, Option<Effect>) {
    let (next, effect) = match event {
        SessionEvent::StartRequested(request) => state.start(request),
        SessionEvent::AcquisitionSucceeded { generation, story } => {
            (state.loaded(generation, story), None)
        }
        SessionEvent::AcquisitionFailed { generation, error } => {
            (state.failed(generation, &error), None)
        }
        SessionEvent::OptionSelected {
            page_index,
            option_index,
        } => (state.select(page_index, option_index), None),
        SessionEvent::ResetRequested => (state.reset(), None),
    };
    (next.settle(), effect)
}

/// One selectable option as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    /// Position on the page; the identity used when selecting.
    pub index: usize,
    /// Display label. May repeat within a page.
    pub label: String,
}

/// Render model of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionView {
    /// The configuration form, with an optional message.
    Configuring {
        /// Message from the last validation, failure or completion.
        notice: Option<Notice>,
    },
    /// A story is being written.
    Loading,
    /// One page of the story.
    #[serde(rename_all = "camelCase")]
    Presenting {
        /// Story title.
        title: String,
        /// Zero-based cursor, echoed back when selecting.
        page_index: usize,
        /// One-based page number for display.
        page_number: usize,
        /// Total number of pages.
        page_count: usize,
        /// Narrative text.
        text: String,
        /// Comprehension question.
        question: String,
        /// Options in display order.
        options: Vec<OptionView>,
    },
    /// Nothing can be shown; offer reset only.
    Recovering {
        /// Explanation shown above the reset action.
        message: String,
    },
}

impl SessionView {
    fn recovering() -> Self {
        Self::Recovering {
            message: RECOVERY_MESSAGE.to_owned(),
        }
    }
}
