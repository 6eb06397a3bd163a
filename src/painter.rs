//! Shape rasterizer.
//!
//! [`Painter`] borrows a [`Surface`] and turns lines, rectangles, circles and
//! ellipses into composited pixel writes. Everything is integer-only and
//! allocation-free. Each call resolves its operator to a [`CompositionFn`]
//! once, intersects the optional clip rectangle with the surface bounds once,
//! and then only ever touches pixels inside that box; pixels outside are
//! skipped silently, nothing is reported back.
//!
//! Round shapes come in two parities (see [`Parity`]). The midpoint
//! recurrences differ between a shape centred on a pixel and one centred on
//! a pixel corner, so each parity has its own generator, picked before the
//! loop starts. A shape with a zero radius is always drawn with odd parity.

use crate::basics::{intersect_bounds, Bounds};
use crate::color::Rgba8;
use crate::comp_op::{CompOp, CompositionFn, NativeColor, Source};
use crate::geometry::{Circle, Ellipse, Line, Parity, Rect};
use crate::surface::Surface;

// ============================================================================
// Pen: per-call state
// ============================================================================

/// Everything a single draw call resolved up front.
struct Pen<C> {
    source: Source<C>,
    blend: CompositionFn<C>,
    clip: Bounds,
}

// ============================================================================
// Painter
// ============================================================================

pub struct Painter<'a, C: NativeColor, const W: usize, const H: usize> {
    surface: &'a mut Surface<C, W, H>,
}

impl<'a, C: NativeColor, const W: usize, const H: usize> Painter<'a, C, W, H> {
    pub fn new(surface: &'a mut Surface<C, W, H>) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &Surface<C, W, H> {
        &*self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface<C, W, H> {
        &mut *self.surface
    }

    /// The box a call with `clip` may write to: the surface bounds for
    /// [`Rect::NO_CLIP`], otherwise their intersection with `clip`.
    pub fn clip_bounds(clip: &Rect) -> Bounds {
        let surface = Bounds::from_extent(0, 0, W as u32, H as u32);
        if clip.is_no_clip() {
            surface
        } else {
            intersect_bounds(&clip.bounds(), &surface)
        }
    }

    fn pen(&self, color: Rgba8, op: CompOp, clip: &Rect, extent: Bounds, what: &str) -> Option<Pen<C>> {
        let clip = Self::clip_bounds(clip);
        if !clip.overlaps(&extent) {
            log::trace!("{what}: nothing of {extent:?} inside {clip:?}, skipped");
            return None;
        }
        Some(Pen {
            source: Source::new(color),
            blend: C::composition(op),
            clip,
        })
    }

    // ------------------------------------------------------------------------
    // Pixel and span writes. Coordinates are checked against the pen's clip,
    // which already lies inside the surface.
    // ------------------------------------------------------------------------

    #[inline]
    fn plot(&mut self, pen: &Pen<C>, x: i32, y: i32) {
        if !pen.clip.hit_test(x, y) {
            return;
        }
        if let Some(p) = self.surface.pixel_mut(x as u16, y as u16) {
            (pen.blend)(p, &pen.source);
        }
    }

    /// Pixels `x1..=x2` of row `y`, `x1 <= x2`.
    fn hspan(&mut self, pen: &Pen<C>, y: i32, x1: i32, x2: i32) {
        if y < pen.clip.y1 || y > pen.clip.y2 {
            return;
        }
        let x1 = x1.max(pen.clip.x1);
        let x2 = x2.min(pen.clip.x2);
        if x1 > x2 {
            return;
        }
        if let Some(span) = self.surface.span_mut(y as u16, x1 as u16..=x2 as u16) {
            for p in span.iter_mut() {
                (pen.blend)(p, &pen.source);
            }
        }
    }

    /// Pixels `y1..=y2` of column `x`, `y1 <= y2`.
    fn vspan(&mut self, pen: &Pen<C>, x: i32, y1: i32, y2: i32) {
        if x < pen.clip.x1 || x > pen.clip.x2 {
            return;
        }
        let y1 = y1.max(pen.clip.y1);
        let y2 = y2.min(pen.clip.y2);
        for y in y1..=y2 {
            if let Some(p) = self.surface.pixel_mut(x as u16, y as u16) {
                (pen.blend)(p, &pen.source);
            }
        }
    }

    /// Every pixel of `b` inside the clip, one row span at a time.
    fn fill_bounds(&mut self, pen: &Pen<C>, b: &Bounds) {
        for y in b.y1.max(pen.clip.y1)..=b.y2.min(pen.clip.y2) {
            self.hspan(pen, y, b.x1, b.x2);
        }
    }

    /// The (±x, ±y) reflections of a quadrant point around (cx, cy), each
    /// pixel once. `m` is 1 when the centre sits on a pixel corner.
    #[inline]
    fn plot_quadrants(&mut self, pen: &Pen<C>, cx: i32, cy: i32, x: i32, y: i32, m: i32) {
        let (left, right) = (cx - x - m, cx + x);
        let (top, bottom) = (cy - y - m, cy + y);
        self.plot(pen, right, bottom);
        if left != right {
            self.plot(pen, left, bottom);
        }
        if top != bottom {
            self.plot(pen, right, top);
            if left != right {
                self.plot(pen, left, top);
            }
        }
    }

    /// Adds the (±y, ±x) reflections for a first-octant point.
    #[inline]
    fn plot_octants(&mut self, pen: &Pen<C>, cx: i32, cy: i32, x: i32, y: i32, m: i32) {
        self.plot_quadrants(pen, cx, cy, x, y, m);
        if x != y {
            self.plot_quadrants(pen, cx, cy, y, x, m);
        }
    }

    /// Spans `cx - half ..= cx + half` on the rows `row` above and below the
    /// centre, each row once.
    #[inline]
    fn mirrored_rows(&mut self, pen: &Pen<C>, cx: i32, cy: i32, row: i32, half: i32, m: i32) {
        let (x1, x2) = (cx - half - m, cx + half);
        let (top, bottom) = (cy - row - m, cy + row);
        self.hspan(pen, bottom, x1, x2);
        if top != bottom {
            self.hspan(pen, top, x1, x2);
        }
    }

    // ========================================================================
    // Spans
    // ========================================================================

    /// Row `y` from `begin_x` to `end_x`, both inclusive, in either order.
    pub fn draw_horizontal_line(
        &mut self,
        y: i16,
        begin_x: i16,
        end_x: i16,
        color: Rgba8,
        op: CompOp,
        clip: Rect,
    ) {
        let mut b = Bounds::new(begin_x.into(), y.into(), end_x.into(), y.into());
        b.normalize();
        if let Some(pen) = self.pen(color, op, &clip, b, "draw_horizontal_line") {
            self.hspan(&pen, b.y1, b.x1, b.x2);
        }
    }

    /// Column `x` from `begin_y` to `end_y`, both inclusive, in either order.
    pub fn draw_vertical_line(
        &mut self,
        x: i16,
        begin_y: i16,
        end_y: i16,
        color: Rgba8,
        op: CompOp,
        clip: Rect,
    ) {
        let mut b = Bounds::new(x.into(), begin_y.into(), x.into(), end_y.into());
        b.normalize();
        if let Some(pen) = self.pen(color, op, &clip, b, "draw_vertical_line") {
            self.vspan(&pen, b.x1, b.y1, b.y2);
        }
    }

    // ========================================================================
    // Lines
    // ========================================================================

    pub fn draw_line(&mut self, line: &Line, color: Rgba8) {
        self.draw_line_with(line, color, CompOp::A, Rect::NO_CLIP);
    }

    /// Bresenham line including both endpoints. Clipping removes pixels,
    /// it never moves the path.
    pub fn draw_line_with(&mut self, line: &Line, color: Rgba8, op: CompOp, clip: Rect) {
        let Some(pen) = self.pen(color, op, &clip, line.bounds(), "draw_line") else {
            return;
        };
        let (mut x, mut y) = (i32::from(line.start.x), i32::from(line.start.y));
        let (x2, y2) = (i32::from(line.end.x), i32::from(line.end.y));

        if y == y2 {
            self.hspan(&pen, y, x.min(x2), x.max(x2));
            return;
        }
        if x == x2 {
            self.vspan(&pen, x, y.min(y2), y.max(y2));
            return;
        }

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(&pen, x, y);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    // ========================================================================
    // Rectangles
    // ========================================================================

    pub fn draw_rect(&mut self, rect: &Rect, color: Rgba8) {
        self.draw_rect_with(rect, color, CompOp::A, Rect::NO_CLIP);
    }

    /// Outline only; interior pixels are untouched. Every edge pixel is
    /// written exactly once.
    pub fn draw_rect_with(&mut self, rect: &Rect, color: Rgba8, op: CompOp, clip: Rect) {
        let b = rect.bounds();
        let Some(pen) = self.pen(color, op, &clip, b, "draw_rect") else {
            return;
        };
        if b.x1 == b.x2 || b.y1 == b.y2 {
            self.fill_bounds(&pen, &b);
            return;
        }
        self.hspan(&pen, b.y1, b.x1, b.x2);
        self.hspan(&pen, b.y2, b.x1, b.x2);
        self.vspan(&pen, b.x1, b.y1 + 1, b.y2 - 1);
        self.vspan(&pen, b.x2, b.y1 + 1, b.y2 - 1);
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: Rgba8) {
        self.fill_rect_with(rect, color, CompOp::A, Rect::NO_CLIP);
    }

    pub fn fill_rect_with(&mut self, rect: &Rect, color: Rgba8, op: CompOp, clip: Rect) {
        let b = rect.bounds();
        if let Some(pen) = self.pen(color, op, &clip, b, "fill_rect") {
            self.fill_bounds(&pen, &b);
        }
    }

    // ========================================================================
    // Circles
    // ========================================================================

    pub fn draw_circle(&mut self, circle: &Circle, color: Rgba8) {
        self.draw_circle_with(circle, color, CompOp::A, Rect::NO_CLIP);
    }

    pub fn draw_circle_with(&mut self, circle: &Circle, color: Rgba8, op: CompOp, clip: Rect) {
        let Some(pen) = self.pen(color, op, &clip, circle.bounds(), "draw_circle") else {
            return;
        };
        let (cx, cy) = (i32::from(circle.center.x), i32::from(circle.center.y));
        let r = i32::from(circle.radius);
        match circle.effective_parity() {
            Parity::Odd => odd_circle_octant(r, |x, y, _| self.plot_octants(&pen, cx, cy, x, y, 0)),
            Parity::Even => even_circle_octant(r, |x, y, _| self.plot_octants(&pen, cx, cy, x, y, 1)),
        }
    }

    pub fn fill_circle(&mut self, circle: &Circle, color: Rgba8) {
        self.fill_circle_with(circle, color, CompOp::A, Rect::NO_CLIP);
    }

    /// Solid disk, one span per row. Each octant point yields the rows at
    /// ±x; the rows at ±y are taken from the widest point on them and only
    /// when they lie beyond the diagonal, so no row is drawn twice.
    pub fn fill_circle_with(&mut self, circle: &Circle, color: Rgba8, op: CompOp, clip: Rect) {
        let Some(pen) = self.pen(color, op, &clip, circle.bounds(), "fill_circle") else {
            return;
        };
        let (cx, cy) = (i32::from(circle.center.x), i32::from(circle.center.y));
        let r = i32::from(circle.radius);
        match circle.effective_parity() {
            Parity::Odd => odd_circle_octant(r, |x, y, row_done| {
                self.mirrored_rows(&pen, cx, cy, x, y, 0);
                if row_done && y > x {
                    self.mirrored_rows(&pen, cx, cy, y, x, 0);
                }
            }),
            Parity::Even => even_circle_octant(r, |x, y, row_done| {
                self.mirrored_rows(&pen, cx, cy, x, y, 1);
                if row_done && y > x {
                    self.mirrored_rows(&pen, cx, cy, y, x, 1);
                }
            }),
        }
    }

    // ========================================================================
    // Ellipses
    // ========================================================================

    pub fn draw_ellipse(&mut self, ellipse: &Ellipse, color: Rgba8) {
        self.draw_ellipse_with(ellipse, color, CompOp::A, Rect::NO_CLIP);
    }

    pub fn draw_ellipse_with(&mut self, ellipse: &Ellipse, color: Rgba8, op: CompOp, clip: Rect) {
        let Some(pen) = self.pen(color, op, &clip, ellipse.bounds(), "draw_ellipse") else {
            return;
        };
        if self.flat_ellipse(&pen, ellipse) {
            return;
        }
        let (cx, cy) = (i32::from(ellipse.center.x), i32::from(ellipse.center.y));
        let (rx, ry) = radii(ellipse);
        match ellipse.effective_parity() {
            Parity::Odd => odd_ellipse_quadrant(rx, ry, |x, y| self.plot_quadrants(&pen, cx, cy, x, y, 0)),
            Parity::Even => even_ellipse_quadrant(rx, ry, |x, y| self.plot_quadrants(&pen, cx, cy, x, y, 1)),
        }
    }

    pub fn fill_ellipse(&mut self, ellipse: &Ellipse, color: Rgba8) {
        self.fill_ellipse_with(ellipse, color, CompOp::A, Rect::NO_CLIP);
    }

    /// Solid ellipse, one span per row. Quadrant points arrive row by row
    /// with x growing, so a row is emitted once the next point leaves it.
    pub fn fill_ellipse_with(&mut self, ellipse: &Ellipse, color: Rgba8, op: CompOp, clip: Rect) {
        let Some(pen) = self.pen(color, op, &clip, ellipse.bounds(), "fill_ellipse") else {
            return;
        };
        if self.flat_ellipse(&pen, ellipse) {
            return;
        }
        let (cx, cy) = (i32::from(ellipse.center.x), i32::from(ellipse.center.y));
        let (rx, ry) = radii(ellipse);
        let parity = ellipse.effective_parity();
        let m = match parity {
            Parity::Odd => 0,
            Parity::Even => 1,
        };
        let mut pending: Option<(i32, i32)> = None;
        let mut visit = |x: i32, y: i32| {
            if let Some((row, half)) = pending {
                if row != y {
                    self.mirrored_rows(&pen, cx, cy, row, half, m);
                }
            }
            pending = Some((y, x));
        };
        match parity {
            Parity::Odd => odd_ellipse_quadrant(rx, ry, &mut visit),
            Parity::Even => even_ellipse_quadrant(rx, ry, &mut visit),
        }
        if let Some((row, half)) = pending {
            self.mirrored_rows(&pen, cx, cy, row, half, m);
        }
    }

    /// An ellipse with a zero radius collapses onto the axis line through its
    /// centre, whatever its parity. Returns `true` when handled.
    fn flat_ellipse(&mut self, pen: &Pen<C>, ellipse: &Ellipse) -> bool {
        if ellipse.radius_x != 0 && ellipse.radius_y != 0 {
            return false;
        }
        let b = ellipse.bounds();
        self.fill_bounds(pen, &b);
        true
    }
}

/// `4·rx²·ry²` needs more than 64 bits once a radius passes 2^15.
fn radii(ellipse: &Ellipse) -> (i128, i128) {
    (i128::from(ellipse.radius_x), i128::from(ellipse.radius_y))
}

// ============================================================================
// Midpoint circle
//
// Both generators walk the octant 0 <= x <= y from (0, r) and call
// `visit(x, y, row_done)` for every boundary point; `row_done` is set on the
// last point with a given y.
// ============================================================================

/// Centre on a pixel. A pixel (x, y) of the octant is on the boundary when
/// the midpoint below it, (x, y - 1/2), is inside the circle and the one
/// above is not.
fn odd_circle_octant(r: i32, mut visit: impl FnMut(i32, i32, bool)) {
    let (mut x, mut y) = (0, r);
    let mut d = 1 - r;
    while x <= y {
        visit(x, y, d >= 0);
        if d < 0 {
            d += 2 * x + 3;
        } else {
            d += 2 * (x - y) + 5;
            y -= 1;
        }
        x += 1;
    }
}

/// Centre on a pixel corner; (x, y) names the pixel whose centre is at
/// (x + 1/2, y + 1/2) from it. Same rule as the odd case, with the decision
/// variable scaled by 4 to stay integral.
fn even_circle_octant(r: i32, mut visit: impl FnMut(i32, i32, bool)) {
    let r = i64::from(r);
    let (mut x, mut y) = (0i64, r - 1);
    let mut d = 13 - 8 * r;
    while x <= y {
        visit(x as i32, y as i32, d >= 0);
        if d < 0 {
            d += 8 * x + 16;
        } else {
            d += 8 * (x - y) + 20;
            y -= 1;
        }
        x += 1;
    }
}

// ============================================================================
// Midpoint ellipse
//
// Both generators walk the quadrant from the top vertex to the right one,
// calling `visit(x, y)` with y never increasing and x never decreasing.
// Region 1 (|slope| <= 1) steps x every iteration. Region 2 steps y, and
// before leaving a row widens it to every pixel whose outer edge midpoint is
// still inside, so shallow rows are never cut short. The row through the
// centre always runs out to the vertex. Decision variables are
// 4 * F(midpoint), F = ry²x² + rx²y² - rx²ry².
// ============================================================================

fn odd_ellipse_quadrant(rx: i128, ry: i128, mut visit: impl FnMut(i32, i32)) {
    let (rx2, ry2) = (rx * rx, ry * ry);
    let (mut x, mut y) = (0i128, ry);

    let mut d = 4 * ry2 - 4 * rx2 * ry + rx2;
    while rx2 * (2 * y - 1) > 2 * ry2 * (x + 1) {
        visit(x as i32, y as i32);
        if d < 0 {
            d += 4 * ry2 * (2 * x + 3);
        } else {
            d += 4 * ry2 * (2 * x + 3) - 8 * rx2 * (y - 1);
            y -= 1;
        }
        x += 1;
    }

    // d = 4 * F(x + 1/2, y)
    let mut d = ry2 * (2 * x + 1) * (2 * x + 1) + 4 * rx2 * y * y - 4 * rx2 * ry2;
    while y > 0 {
        visit(x as i32, y as i32);
        while d <= 0 {
            d += 8 * ry2 * (x + 1);
            x += 1;
            visit(x as i32, y as i32);
        }
        d += 4 * rx2 * (1 - 2 * y);
        y -= 1;
        if d <= 0 {
            d += 8 * ry2 * (x + 1);
            x += 1;
        }
    }

    for x in x.min(rx)..=rx {
        visit(x as i32, 0);
    }
}

/// (x, y) names the pixel whose centre is at (x + 1/2, y + 1/2) from the
/// centre corner; the quadrant spans x in 0..rx, y in 0..ry.
fn even_ellipse_quadrant(rx: i128, ry: i128, mut visit: impl FnMut(i32, i32)) {
    let (rx2, ry2) = (rx * rx, ry * ry);
    let (mut x, mut y) = (0i128, ry - 1);

    let mut d = 9 * ry2 + 4 * rx2 * (1 - 2 * ry);
    while 2 * rx2 * y > ry2 * (2 * x + 3) {
        visit(x as i32, y as i32);
        if d < 0 {
            d += 8 * ry2 * (x + 2);
        } else {
            d += 8 * ry2 * (x + 2) - 4 * rx2 * (2 * y - 1);
            y -= 1;
        }
        x += 1;
    }

    // d = 4 * F(x + 1, y + 1/2)
    let mut d = 4 * ry2 * (x + 1) * (x + 1) + rx2 * (2 * y + 1) * (2 * y + 1) - 4 * rx2 * ry2;
    while y > 0 {
        visit(x as i32, y as i32);
        while d <= 0 {
            d += 4 * ry2 * (2 * x + 3);
            x += 1;
            visit(x as i32, y as i32);
        }
        d -= 8 * rx2 * y;
        y -= 1;
        if d <= 0 {
            d += 4 * ry2 * (2 * x + 3);
            x += 1;
        }
    }

    for x in x.min(rx - 1)..rx {
        visit(x as i32, 0);
    }
}

// ============================================================================
// Tests
// ============================================================================
