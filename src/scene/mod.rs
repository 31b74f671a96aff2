//! Shared scene state mutated by drawing calls and read by the compositor.

mod state;

pub use state::SceneState;

use crate::draw::Point2d;

/// A string drawn at a baseline anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct TextAnnotation {
    pub text: String,
    pub anchor: Point2d,
}

impl TextAnnotation {
    pub fn new(text: impl Into<String>, anchor: Point2d) -> Self {
        Self {
            text: text.into(),
            anchor,
        }
    }
}
