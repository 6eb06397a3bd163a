//! Geometric primitives in integer device coordinates.
//!
//! Plain `Copy` values built per draw call. Coordinates are `i16` so shapes
//! may start off-surface; extents and radii are `u16`.

use crate::basics::Bounds;

// ============================================================================
// Point / Line
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub const fn from_coords(x1: i16, y1: i16, x2: i16, y2: i16) -> Self {
        Self {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        }
    }

    /// Box enclosing both endpoints (always non-empty).
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::new(
            i32::from(self.start.x),
            i32::from(self.start.y),
            i32::from(self.end.x),
            i32::from(self.end.y),
        );
        b.normalize();
        b
    }
}

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned rectangle given by its top-left pixel and its extent.
///
/// The all-zero rect is reserved: used as a clip it means "no clipping",
/// see [`Rect::NO_CLIP`]. Any other rect with a zero extent is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub origin: Point,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Clip sentinel: only the surface bounds apply.
    pub const NO_CLIP: Rect = Rect {
        origin: Point::new(0, 0),
        width: 0,
        height: 0,
    };

    pub const fn new(origin: Point, width: u16, height: u16) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub const fn from_coords(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self::new(Point::new(x, y), width, height)
    }

    /// `true` for the zero-width, zero-height sentinel, wherever its origin.
    #[inline]
    pub const fn is_no_clip(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Inclusive pixel box covered by the rect. Empty for zero extents.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_extent(
            i32::from(self.origin.x),
            i32::from(self.origin.y),
            u32::from(self.width),
            u32::from(self.height),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds().hit_test(i32::from(p.x), i32::from(p.y))
    }
}

// ============================================================================
// Circle / Ellipse
// ============================================================================

/// Whether a round shape's bounding box has a unique centre pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Parity {
    /// Centre on `center`, diameter `2r + 1`.
    #[default]
    Odd,
    /// Centre on the corner shared by `center` and its left, upper and
    /// upper-left neighbours; diameter `2r`. A zero radius has no corner to
    /// straddle and is drawn as [`Parity::Odd`].
    Even,
}

impl Parity {
    /// The parity a shape with these radii is rasterized with.
    pub const fn for_radii(self, rx: u16, ry: u16) -> Parity {
        if rx == 0 || ry == 0 {
            Parity::Odd
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Circle {
    pub center: Point,
    pub radius: u16,
    pub parity: Parity,
}

impl Circle {
    pub const fn new(center: Point, radius: u16) -> Self {
        Self {
            center,
            radius,
            parity: Parity::Odd,
        }
    }

    /// Circle with an even diameter of `2 * radius` pixels.
    pub const fn even(center: Point, radius: u16) -> Self {
        Self {
            center,
            radius,
            parity: Parity::Even,
        }
    }

    pub const fn effective_parity(&self) -> Parity {
        self.parity.for_radii(self.radius, self.radius)
    }

    pub fn diameter(&self) -> u32 {
        diameter(self.radius, self.effective_parity())
    }

    pub fn bounds(&self) -> Bounds {
        round_bounds(self.center, self.radius, self.radius, self.effective_parity())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: u16,
    pub radius_y: u16,
    pub parity: Parity,
}

impl Ellipse {
    pub const fn new(center: Point, radius_x: u16, radius_y: u16) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
            parity: Parity::Odd,
        }
    }

    /// Ellipse with even extents of `2 * radius_x` by `2 * radius_y` pixels.
    pub const fn even(center: Point, radius_x: u16, radius_y: u16) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
            parity: Parity::Even,
        }
    }

    pub const fn effective_parity(&self) -> Parity {
        self.parity.for_radii(self.radius_x, self.radius_y)
    }

    pub fn bounds(&self) -> Bounds {
        round_bounds(self.center, self.radius_x, self.radius_y, self.effective_parity())
    }
}

impl From<Circle> for Ellipse {
    fn from(c: Circle) -> Self {
        Self {
            center: c.center,
            radius_x: c.radius,
            radius_y: c.radius,
            parity: c.parity,
        }
    }
}

fn diameter(radius: u16, parity: Parity) -> u32 {
    match parity {
        Parity::Odd => 2 * u32::from(radius) + 1,
        Parity::Even => 2 * u32::from(radius),
    }
}

fn round_bounds(center: Point, rx: u16, ry: u16, parity: Parity) -> Bounds {
    Bounds::from_extent(
        i32::from(center.x) - i32::from(rx),
        i32::from(center.y) - i32::from(ry),
        diameter(rx, parity),
        diameter(ry, parity),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_clip_sentinel() {
        assert!(Rect::NO_CLIP.is_no_clip());
        assert!(Rect::default().is_no_clip());
        assert!(Rect::from_coords(5, 5, 0, 0).is_no_clip());
        assert!(!Rect::from_coords(0, 0, 0, 3).is_no_clip());
        assert!(Rect::from_coords(0, 0, 0, 3).is_empty());
    }

    #[test]
    fn test_rect_bounds() {
        let r = Rect::from_coords(-2, 3, 4, 2);
        assert_eq!(r.bounds(), Bounds::new(-2, 3, 1, 4));
        assert!(r.contains(Point::new(1, 4)));
        assert!(!r.contains(Point::new(2, 4)));
        assert!(!Rect::from_coords(0, 0, 3, 0).bounds().is_valid());
    }

    #[test]
    fn test_line_bounds() {
        let l = Line::from_coords(7, -1, 2, 4);
        assert_eq!(l.bounds(), Bounds::new(2, -1, 7, 4));
    }

    #[test]
    fn test_circle_bounds() {
        let c = Circle::new(Point::new(10, 10), 3);
        assert_eq!(c.diameter(), 7);
        assert_eq!(c.bounds(), Bounds::new(7, 7, 13, 13));

        let e = Circle::even(Point::new(10, 10), 3);
        assert_eq!(e.diameter(), 6);
        assert_eq!(e.bounds(), Bounds::new(7, 7, 12, 12));

        assert_eq!(Circle::new(Point::new(4, 4), 0).bounds().area(), 1);
        let dot = Circle::even(Point::new(4, 4), 0);
        assert_eq!(dot.effective_parity(), Parity::Odd);
        assert_eq!(dot.diameter(), 1);
        assert_eq!(dot.bounds(), Bounds::new(4, 4, 4, 4));
    }

    #[test]
    fn test_ellipse_bounds() {
        let e = Ellipse::new(Point::new(0, 0), 5, 2);
        assert_eq!(e.bounds(), Bounds::new(-5, -2, 5, 2));
        let even = Ellipse::even(Point::new(0, 0), 5, 2);
        assert_eq!(even.bounds(), Bounds::new(-5, -2, 4, 1));
        assert_eq!(Ellipse::from(Circle::new(Point::new(1, 1), 2)).radius_y, 2);

        let flat = Ellipse::even(Point::new(0, 0), 0, 3);
        assert_eq!(flat.effective_parity(), Parity::Odd);
        assert_eq!(flat.bounds(), Bounds::new(0, -3, 0, 3));
        assert_eq!(Ellipse::even(Point::new(0, 0), 2, 3).effective_parity(), Parity::Even);
    }
}
