// File: crates/ellingham-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math and data-to-pixel mapping.

use skia_safe as skia;

use crate::axis::Axis;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn from_ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
    pub const fn is_empty(&self) -> bool { self.width() <= 0 || self.height() <= 0 }

    pub fn to_skia(&self) -> skia::Rect {
        skia::Rect::from_ltrb(self.left as f32, self.top as f32, self.right as f32, self.bottom as f32)
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

/// Maps data coordinates onto a plot rectangle (y grows upwards in data space).
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    plot: RectI32,
    x_min: f64,
    x_span: f64,
    y_min: f64,
    y_span: f64,
}

impl Projection {
    pub fn new(plot: RectI32, x: &Axis, y: &Axis) -> Self {
        Self { plot, x_min: x.min, x_span: x.span(), y_min: y.min, y_span: y.span() }
    }

    #[inline]
    pub fn sx(&self, x: f64) -> f32 {
        self.plot.left as f32 + ((x - self.x_min) / self.x_span) as f32 * self.plot.width() as f32
    }

    #[inline]
    pub fn sy(&self, y: f64) -> f32 {
        self.plot.bottom as f32 - ((y - self.y_min) / self.y_span) as f32 * self.plot.height() as f32
    }

    pub fn point(&self, x: f64, y: f64) -> (f32, f32) {
        (self.sx(x), self.sy(y))
    }
}
