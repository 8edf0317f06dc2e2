//! Integer geometry for window layout.
//!
//! Positions are signed (a drag can push a window partially off-screen to
//! the left); sizes are unsigned. All window-manager arithmetic works on
//! these plain-old-data types.

use serde::{Deserialize, Serialize};

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

/// An axis-aligned rectangle (position + size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            pos: Point::new(x, y),
            size: Size::new(w, h),
        }
    }

    /// Whether a point lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.pos.x
            && x < self.pos.x + self.size.w as i32
            && y >= self.pos.y
            && y < self.pos.y + self.size.h as i32
    }

    pub fn right(&self) -> i32 {
        self.pos.x + self.size.w as i32
    }

    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.h as i32
    }
}
