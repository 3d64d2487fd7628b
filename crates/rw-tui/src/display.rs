//! Mapping layout geometry onto a ratatui canvas
//!
//! Layout coordinates grow downward from the top-left corner; the ratatui
//! canvas grows upward from the bottom-left, so every y is flipped.

use ratatui::symbols::Marker;
use rw_core::{Point, Rect};
use strum::{Display, EnumString, VariantNames};

/// Canvas marker used to draw lines and outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Default)]
#[strum(serialize_all = "lowercase")]
pub enum MarkerMode {
    /// Braille dots, highest resolution
    #[default]
    Braille,
    /// One dot per cell
    Dot,
    /// Full block per cell
    Block,
    /// Half blocks, two rows per cell
    HalfBlock,
}

impl From<MarkerMode> for Marker {
    fn from(mode: MarkerMode) -> Self {
        match mode {
            MarkerMode::Braille => Marker::Braille,
            MarkerMode::Dot => Marker::Dot,
            MarkerMode::Block => Marker::Block,
            MarkerMode::HalfBlock => Marker::HalfBlock,
        }
    }
}

/// Converts layout coordinates to canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    width: f64,
    height: f64,
}

impl Projection {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.width]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [0.0, self.height]
    }

    /// Canvas position of a layout point
    pub fn point(&self, p: Point) -> (f64, f64) {
        (f64::from(p.x), self.height - f64::from(p.y))
    }

    /// Canvas rectangle `(x, y, width, height)` with `(x, y)` at the
    /// bottom-left, covering the same cells as `rect`
    pub fn rect(&self, rect: &Rect) -> (f64, f64, f64, f64) {
        let bottom_edge = f64::from(rect.top()) + f64::from(rect.height);
        (
            f64::from(rect.left()),
            self.height - bottom_edge,
            f64::from(rect.width),
            f64::from(rect.height),
        )
    }
}
