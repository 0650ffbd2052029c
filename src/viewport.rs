//! Mapping from the logical 800x600 field to device pixels

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::Rect;

/// Smallest stage width the layout will shrink to
pub const MIN_STAGE_WIDTH: f32 = 320.0;
/// Horizontal padding the host screen reserves around the stage
pub const STAGE_MARGIN: f32 = 52.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Stage size in device pixels
    pub size: Vec2,
    /// Device pixels per logical unit
    pub scale: f32,
}

impl Viewport {
    /// Fit the stage into a window of the given width, keeping 4:3
    pub fn for_window(window_width: f32) -> Self {
        let width = (window_width - STAGE_MARGIN).max(MIN_STAGE_WIDTH);
        let height = width * (FIELD_HEIGHT / FIELD_WIDTH);
        Self {
            size: Vec2::new(width, height),
            scale: width / FIELD_WIDTH,
        }
    }

    pub fn to_device(&self, rect: &Rect) -> Rect {
        rect.scaled(self.scale)
    }

    pub fn point_to_device(&self, p: Vec2) -> Vec2 {
        p * self.scale
    }

    /// Inverse mapping, for touch input
    pub fn point_to_logical(&self, p: Vec2) -> Vec2 {
        p / self.scale
    }
}
