//! Pagination of tables that run past the bottom of the slide.
//!
//! Only tables move. Everything else is emitted at its source position, shifted by the
//! current vertical offset.

use super::utils::px_to_in;
use crate::config::ExportConfig;
use crate::models::common::Geometry;

/// Where emission currently goes: the output slide index and how far source coordinates are
/// shifted up on it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct PaginationState {
    pub current_slide: usize,
    pub vertical_offset_px: f64,
}

/// What the policy decided for one table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TablePlacement {
    /// The table fits where it is.
    InPlace,
    /// The table starts a continuation slide.
    NewSlide,
    /// The table overflows but starts too close to the top for a new slide to help.
    Overflowing,
}

impl PaginationState {
    /// Starts on `slide` with no offset.
    pub fn at_slide(slide: usize) -> Self {
        PaginationState {
            current_slide: slide,
            vertical_offset_px: 0.0,
        }
    }

    /// Applies the current offset to a source geometry.
    pub fn place(&self, geometry: &Geometry) -> Geometry {
        geometry.shifted_up(self.vertical_offset_px)
    }

    /// Decides where a table with source geometry `table` goes.
    ///
    /// # Arguments
    /// * `table` - The table's geometry in source px, without offset.
    /// * `next_slide` - The index the continuation slide would get.
    ///
    /// # Returns
    /// The placement and the state to continue with. On `NewSlide` the state points at
    /// `next_slide` and the offset moves the table's top onto the top margin.
    pub fn place_table(
        self,
        table: &Geometry,
        next_slide: usize,
        config: &ExportConfig,
    ) -> (TablePlacement, PaginationState) {
        let placed = self.place(table);
        let top_in = px_to_in(placed.y, config);
        let bottom_in = px_to_in(placed.bottom(), config);

        if bottom_in <= config.usable_bottom_in() {
            return (TablePlacement::InPlace, self);
        }
        if top_in > config.pagination_min_top_in {
            let next = PaginationState {
                current_slide: next_slide,
                vertical_offset_px: table.y - config.top_margin_in * config.px_per_inch(),
            };
            return (TablePlacement::NewSlide, next);
        }
        (TablePlacement::Overflowing, self)
    }
}
