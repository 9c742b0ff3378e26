//! Application layer for the story context.

pub mod acquisition;
pub mod controller;
