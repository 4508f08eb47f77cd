use serde::{Deserialize, Serialize};

use crate::models::primitives::{deserialize_base64, serialize_base64, DrawPrimitive};

/// The background of an output slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideBackground {
    /// A solid colour, `RRGGBB` plus transparency percentage.
    Color { color: String, transparency: u8 },
    /// A rasterized background image.
    Image {
        #[serde(serialize_with = "serialize_base64", deserialize_with = "deserialize_base64")]
        data: Vec<u8>,
    },
}

/// One output slide: background, speaker notes and primitives in paint order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<SlideBackground>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub primitives: Vec<DrawPrimitive>,
}
