//! Editor configuration.

use crate::color::Color;
use crate::model::Point;
use serde::{Deserialize, Serialize};

/// Configuration for a new editing session.
///
/// Every field has a default, so hosts can deserialize a partial JSON object
/// (`{"history_depth": 50}`) and get sane values for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas width in pixels. Default: **900**.
    pub canvas_width: u32,

    /// Canvas height in pixels. Default: **600**.
    pub canvas_height: u32,

    /// Initial background color. Default: **#f8f9fa**.
    pub background: Color,

    /// Initial palette color applied to new objects. Default: **#000000**.
    pub object_color: Color,

    /// Maximum number of undo steps kept; `None` keeps everything.
    /// Default: **200**.
    pub history_depth: Option<usize>,

    /// Uploaded images are scaled to this display width. Default: **200**.
    pub image_width: f32,

    /// Where new text lands.
    pub text_origin: Point,

    /// Where new shapes land.
    pub shape_origin: Point,

    /// Stroke width for line shapes.
    pub line_width: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 900,
            canvas_height: 600,
            background: Color::rgb(0xf8, 0xf9, 0xfa),
            object_color: Color::BLACK,
            history_depth: Some(200),
            image_width: 200.0,
            text_origin: Point::new(100.0, 100.0),
            shape_origin: Point::new(150.0, 150.0),
            line_width: 5.0,
        }
    }
}
