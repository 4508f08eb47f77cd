//! The drawing sink: where finished slides go.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::{
    primitives::DrawPrimitive,
    slide::{Slide, SlideBackground},
};

/// Receives output slides and their primitives in paint order.
///
/// The exporter calls `add_slide` once per output slide and then only addresses the index it
/// got back.
pub trait DrawingSink {
    /// Appends an empty slide and returns its index.
    fn add_slide(&mut self) -> usize;
    fn set_background(&mut self, slide: usize, background: SlideBackground);
    fn set_notes(&mut self, slide: usize, notes: &str);
    /// Appends a primitive on top of everything already on `slide`.
    fn push_primitive(&mut self, slide: usize, primitive: DrawPrimitive);
}

/// An in-memory deck. Serializes to the JSON document consumed by deck writers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDeck {
    pub slides: Vec<Slide>,
}

impl SlideDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-printed JSON of the whole deck.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn slide_mut(&mut self, slide: usize) -> Option<&mut Slide> {
        let found = self.slides.get_mut(slide);
        if found.is_none() {
            warn!("SlideDeck: no slide at index {}", slide);
        }
        found
    }
}

impl DrawingSink for SlideDeck {
    fn add_slide(&mut self) -> usize {
        self.slides.push(Slide::default());
        self.slides.len() - 1
    }

    fn set_background(&mut self, slide: usize, background: SlideBackground) {
        if let Some(slide) = self.slide_mut(slide) {
            slide.background = Some(background);
        }
    }

    fn set_notes(&mut self, slide: usize, notes: &str) {
        if let Some(slide) = self.slide_mut(slide) {
            slide.notes = Some(notes.to_string());
        }
    }

    fn push_primitive(&mut self, slide: usize, primitive: DrawPrimitive) {
        if let Some(slide) = self.slide_mut(slide) {
            slide.primitives.push(primitive);
        }
    }
}
