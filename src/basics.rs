//! Foundation types shared by the surface and the painter.
//!
//! Holds [`Bounds`], the inclusive integer box every clip computation is
//! carried out in. Widened to `i32` so that `i16` origins plus `u16` extents
//! never overflow while being intersected.

use core::mem;

// ============================================================================
// Bounds
// ============================================================================

/// An inclusive integer box defined by two corner points.
///
/// A box is empty when `x1 > x2` or `y1 > y2`; [`Bounds::EMPTY`] is the
/// canonical empty box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Bounds {
    pub const EMPTY: Bounds = Bounds {
        x1: 1,
        y1: 1,
        x2: 0,
        y2: 0,
    };

    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The box covering a `width` x `height` area whose top-left pixel is
    /// (`x`, `y`). Zero extents yield an empty box.
    pub fn from_extent(x: i32, y: i32, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::EMPTY;
        }
        Self {
            x1: x,
            y1: y,
            x2: x + (width as i32 - 1),
            y2: y + (height as i32 - 1),
        }
    }

    /// Normalize so that x1 <= x2 and y1 <= y2, swapping if needed.
    pub fn normalize(&mut self) -> &Self {
        if self.x1 > self.x2 {
            mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    /// Clip this box to the intersection with `r`.
    /// Returns `true` if the result is non-empty.
    pub fn clip(&mut self, r: &Self) -> bool {
        self.x1 = self.x1.max(r.x1);
        self.y1 = self.y1.max(r.y1);
        self.x2 = self.x2.min(r.x2);
        self.y2 = self.y2.min(r.y2);
        self.is_valid()
    }

    /// Returns `true` if the box is non-empty.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns `true` if the point (x, y) is inside the box.
    #[inline]
    pub fn hit_test(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Returns `true` if this box shares at least one pixel with `r`.
    pub fn overlaps(&self, r: &Self) -> bool {
        self.is_valid()
            && r.is_valid()
            && !(r.x1 > self.x2 || r.x2 < self.x1 || r.y1 > self.y2 || r.y2 < self.y1)
    }

    /// Number of pixels inside the box.
    pub fn area(&self) -> u64 {
        if !self.is_valid() {
            return 0;
        }
        (self.x2 - self.x1 + 1) as u64 * (self.y2 - self.y1 + 1) as u64
    }
}

/// Compute the intersection of two boxes. The result may be empty.
pub fn intersect_bounds(r1: &Bounds, r2: &Bounds) -> Bounds {
    let mut r = *r1;
    r.clip(r2);
    r
}

// ============================================================================
// Tests
// ============================================================================
