//! Defines constants used throughout the slide conversion process.

// Physical page: a fixed reference width in px maps onto a fixed document width in inches.
pub const REFERENCE_WIDTH_PX: f64 = 960.0;
pub const SLIDE_WIDTH_IN: f64 = 10.0;
pub const SLIDE_HEIGHT_IN: f64 = 5.625; // 16:9
pub const PT_PER_PX: f64 = 0.75;

// Thickness below which a strip or line would vanish in the output.
pub const MIN_THICKNESS_IN: f64 = 0.02;
// Boxes smaller than this in either dimension are not emitted.
pub const MIN_VISIBLE_PX: f64 = 1.0;
// A box counts as square for ellipse detection when its sides differ by at most this much.
pub const NEAR_SQUARE_TOLERANCE_PX: f64 = 2.0;

// Pagination.
pub const SLIDE_TOP_MARGIN_IN: f64 = 0.5;
pub const SLIDE_BOTTOM_MARGIN_IN: f64 = 0.5;
pub const PAGINATION_MIN_TOP_IN: f64 = 1.0;

// Heuristic: near-equal vertical padding with a real top padding reads as vertically centred.
// Approximates flexbox centring; the literal values are kept for output compatibility.
pub const CENTERING_PADDING_DIFF_PX: f64 = 5.0;
pub const CENTERING_MIN_TOP_PADDING_PX: f64 = 5.0;

// Spans beyond this are clamped, as browsers do for colspan/rowspan.
pub const MAX_CELL_SPAN: u32 = 1000;

// Rasterized images are requested at this multiple of their box size.
pub const RASTER_SCALE: f64 = 2.0;

// Default values used when specific properties are missing or cannot be resolved.
pub const DEFAULT_FONT_FACE: &str = "Arial";
pub const DEFAULT_TEXT_COLOR: &str = "000000";
pub const PLACEHOLDER_FILL_COLOR: &str = "FFFFFF";
