#![forbid(unsafe_code)]

//! Measurement, layout and SVG emission for the clone diagram.
//!
//! The layout pass is bottom-up sizing followed by top-down placement: every
//! panel is measured from its text content first, then absolute coordinates are
//! assigned from the outside in. [`svg::render_clone_diagram_svg`] turns the
//! resulting geometry into markup without re-measuring anything.

pub mod clone;
pub mod model;
pub mod svg;
pub mod text;

use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid scenario: {message}")]
    InvalidScenario { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

pub use clone::layout_clone_diagram;
