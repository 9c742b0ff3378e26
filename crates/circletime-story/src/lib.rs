//! CircleTime: story acquisition and presentation bounded context.
//!
//! Responsible for requesting an age-adapted story from the generative
//! provider, validating its shape, and pacing its pages through a
//! choice-gated session.

pub mod application;
pub mod domain;
