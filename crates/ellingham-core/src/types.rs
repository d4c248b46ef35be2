// File: crates/ellingham-core/src/types.rs
// Summary: Shared sizes and metrics (surface, margins, legend, strokes, font sizes).

/// Default surface width in pixels.
pub const WIDTH: i32 = 1600;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 1000;

/// Width of one legend column in pixels.
pub const LEGEND_COLUMN_WIDTH: i32 = 230;
/// Height of one legend row in pixels.
pub const LEGEND_ROW_HEIGHT: i32 = 18;

/// Compound line stroke width in pixels.
pub const LINE_WIDTH: f32 = 1.5;
/// Length of tick marks outside the plot frame.
pub const TICK_LEN: f32 = 5.0;

pub const TITLE_SIZE: f32 = 18.0;
pub const AXIS_LABEL_SIZE: f32 = 14.0;
pub const TICK_LABEL_SIZE: f32 = 12.0;
pub const LEGEND_LABEL_SIZE: f32 = 12.0;
pub const ANNOTATION_SIZE: f32 = 11.0;

/// Margins around the plot area, in pixels; room for title, ticks and axis labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(96, 24, 56, 64)
    }
}
