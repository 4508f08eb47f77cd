//! Data model of the compiler: the Styled Box Tree it reads and the slide primitives it emits.

pub mod common;
pub mod primitives;
pub mod slide;
pub mod styled_box;
pub mod text;
