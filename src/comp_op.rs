//! Porter-Duff compositing operators and the native color trait.
//!
//! Every pixel format implements [`NativeColor`]: a packed, plain-old-data
//! pixel value that knows how to convert to and from [`Rgba8`] and how to
//! composite an incoming source into itself in place. All thirteen operators
//! have integer default implementations expressed through the classic
//! Porter-Duff factor pairs; formats override the ones they can do directly
//! on packed bits.
//!
//! Operators are selected by the closed [`CompOp`] enum and resolved once per
//! draw call into a plain [`CompositionFn`] through a per-format lookup
//! table, so the rasterizer's inner loops never match on the operator.

use core::fmt;

use bytemuck::Pod;
use thiserror::Error;

use crate::color::Rgba8;
use crate::pixel_buffer::PixelFormat;

// ============================================================================
// CompOp enum
// ============================================================================

/// Porter-Duff compositing operator. `A` is the incoming source color, `B`
/// the destination pixel already in the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CompOp {
    Clear = 0,
    /// Source replaces destination. The default for plain draw and fill calls.
    #[default]
    A = 1,
    B = 2,
    AOverB = 3,
    BOverA = 4,
    AInB = 5,
    BInA = 6,
    AOutB = 7,
    BOutA = 8,
    AAtopB = 9,
    BAtopA = 10,
    Xor = 11,
    Plus = 12,
}

/// Number of [`CompOp`] variants.
pub const COMP_OP_COUNT: usize = 13;

impl CompOp {
    /// All operators in discriminant order.
    pub const ALL: [CompOp; COMP_OP_COUNT] = [
        CompOp::Clear,
        CompOp::A,
        CompOp::B,
        CompOp::AOverB,
        CompOp::BOverA,
        CompOp::AInB,
        CompOp::BInA,
        CompOp::AOutB,
        CompOp::BOutA,
        CompOp::AAtopB,
        CompOp::BAtopA,
        CompOp::Xor,
        CompOp::Plus,
    ];

    /// Source and destination weights: `result = Fa * A + Fb * B`, applied to
    /// premultiplied channels and to alpha alike.
    pub const fn factors(self) -> (Factor, Factor) {
        use Factor::*;
        match self {
            CompOp::Clear => (Zero, Zero),
            CompOp::A => (One, Zero),
            CompOp::B => (Zero, One),
            CompOp::AOverB => (One, InvSrcAlpha),
            CompOp::BOverA => (InvDstAlpha, One),
            CompOp::AInB => (DstAlpha, Zero),
            CompOp::BInA => (Zero, SrcAlpha),
            CompOp::AOutB => (InvDstAlpha, Zero),
            CompOp::BOutA => (Zero, InvSrcAlpha),
            CompOp::AAtopB => (DstAlpha, InvSrcAlpha),
            CompOp::BAtopA => (InvDstAlpha, SrcAlpha),
            CompOp::Xor => (InvDstAlpha, InvSrcAlpha),
            CompOp::Plus => (One, One),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown composition operator {0}")]
pub struct UnknownCompOp(pub u8);

impl TryFrom<u8> for CompOp {
    type Error = UnknownCompOp;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        CompOp::ALL.get(v as usize).copied().ok_or(UnknownCompOp(v))
    }
}

// ============================================================================
// Factor
// ============================================================================

/// One side's weight in a Porter-Duff sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    Zero,
    One,
    SrcAlpha,
    InvSrcAlpha,
    DstAlpha,
    InvDstAlpha,
}

impl Factor {
    /// The factor as an 8-bit fixed-point weight (255 = 1.0).
    #[inline]
    pub const fn resolve(self, src_alpha: u8, dst_alpha: u8) -> u8 {
        match self {
            Factor::Zero => 0,
            Factor::One => 255,
            Factor::SrcAlpha => src_alpha,
            Factor::InvSrcAlpha => Rgba8::invert(src_alpha),
            Factor::DstAlpha => dst_alpha,
            Factor::InvDstAlpha => Rgba8::invert(dst_alpha),
        }
    }
}

// ============================================================================
// Source
// ============================================================================

/// An incoming color prepared once per draw call for a given format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Source<C> {
    /// Straight color as given by the caller.
    pub color: Rgba8,
    /// `color` with channels scaled by its alpha.
    pub premultiplied: Rgba8,
    /// `color` packed into the destination format.
    pub native: C,
}

impl<C: NativeColor> Source<C> {
    pub fn new(color: Rgba8) -> Self {
        Self {
            color,
            premultiplied: color.premultiplied(),
            native: C::from_rgba8(color),
        }
    }
}

/// A resolved operator: composites the source into the destination in place.
pub type CompositionFn<C> = fn(&mut C, &Source<C>);

// ============================================================================
// NativeColor
// ============================================================================

/// A pixel value in a concrete packed format.
///
/// The zero bit pattern must be [`NativeColor::TRANSPARENT`] so that
/// zero-filled storage is a cleared surface.
pub trait NativeColor: Pod + PartialEq + fmt::Debug {
    /// Tag describing this layout in a [`PixelBuffer`](crate::pixel_buffer::PixelBuffer).
    const FORMAT: PixelFormat;
    /// The cleared value; all bits zero.
    const TRANSPARENT: Self;

    fn from_rgba8(c: Rgba8) -> Self;
    fn to_rgba8(self) -> Rgba8;

    /// Pack a composited, premultiplied result.
    #[inline]
    fn from_premultiplied(c: Rgba8) -> Self {
        Self::from_rgba8(c.demultiplied())
    }

    /// Look up the implementation of `op` for this format.
    #[inline]
    fn composition(op: CompOp) -> CompositionFn<Self> {
        let table: [CompositionFn<Self>; COMP_OP_COUNT] = [
            Self::clear,
            Self::a,
            Self::b,
            Self::a_over_b,
            Self::b_over_a,
            Self::a_in_b,
            Self::b_in_a,
            Self::a_out_b,
            Self::b_out_a,
            Self::a_atop_b,
            Self::b_atop_a,
            Self::xor,
            Self::plus,
        ];
        table[op as usize]
    }

    /// Composite `src` into `self` with a runtime-selected operator.
    /// Prefer [`composition`](Self::composition) in loops.
    #[inline]
    fn composite(&mut self, src: &Source<Self>, op: CompOp) {
        Self::composition(op)(self, src);
    }

    fn clear(&mut self, _src: &Source<Self>) {
        *self = Self::TRANSPARENT;
    }

    fn a(&mut self, src: &Source<Self>) {
        *self = src.native;
    }

    fn b(&mut self, _src: &Source<Self>) {}

    fn a_over_b(&mut self, src: &Source<Self>) {
        match src.color.a {
            0 => {}
            255 => *self = src.native,
            _ => compose(self, src, CompOp::AOverB),
        }
    }

    fn b_over_a(&mut self, src: &Source<Self>) {
        compose(self, src, CompOp::BOverA);
    }

    fn a_in_b(&mut self, src: &Source<Self>) {
        compose(self, src, CompOp::AInB);
    }

    fn b_in_a(&mut self, src: &Source<Self>) {
        compose(self, src, CompOp::BInA);
    }

    fn a_out_b(&mut self, src: &Source<Self>) {
        compose(self, src, CompOp::AOutB);
    }

    fn b_out_a(&mut self, src: &Source<Self>) {
        compose(self, src, CompOp::BOutA);
    }

    fn a_atop_b(&mut self, src: &Source<Self>) {
        compose(self, src, CompOp::AAtopB);
    }

    fn b_atop_a(&mut self, src: &Source<Self>) {
        compose(self, src, CompOp::BAtopA);
    }

    fn xor(&mut self, src: &Source<Self>) {
        compose(self, src, CompOp::Xor);
    }

    fn plus(&mut self, src: &Source<Self>) {
        compose(self, src, CompOp::Plus);
    }
}

/// Generic Porter-Duff path: premultiply, weight, saturate, repack.
#[inline]
pub fn compose<C: NativeColor>(dst: &mut C, src: &Source<C>, op: CompOp) {
    let s = src.premultiplied;
    let d = dst.to_rgba8().premultiplied();
    let (fa, fb) = op.factors();
    let fa = fa.resolve(s.a, d.a);
    let fb = fb.resolve(s.a, d.a);
    let out = Rgba8::new(
        weighted_sum(s.r, fa, d.r, fb),
        weighted_sum(s.g, fa, d.g, fb),
        weighted_sum(s.b, fa, d.b, fb),
        weighted_sum(s.a, fa, d.a, fb),
    );
    *dst = C::from_premultiplied(out);
}

#[inline]
fn weighted_sum(s: u8, fa: u8, d: u8, fb: u8) -> u8 {
    let sum = u32::from(Rgba8::multiply(s, fa)) + u32::from(Rgba8::multiply(d, fb));
    sum.min(Rgba8::BASE_MASK) as u8
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixfmt_argb1555::Argb1555;
    use crate::pixfmt_argb8888::Argb8888;

    fn apply(dst: Rgba8, src: Rgba8, op: CompOp) -> Rgba8 {
        let mut p = Argb8888::from_rgba8(dst);
        p.composite(&Source::new(src), op);
        p.to_rgba8()
    }

    const HALF_RED: Rgba8 = Rgba8::new(255, 0, 0, 128);

    #[test]
    fn test_comp_op_default() {
        assert_eq!(CompOp::default(), CompOp::A);
    }

    #[test]
    fn test_comp_op_from_u8() {
        for (i, op) in CompOp::ALL.iter().enumerate() {
            assert_eq!(*op as usize, i);
            assert_eq!(CompOp::try_from(i as u8), Ok(*op));
        }
        assert_eq!(CompOp::try_from(13), Err(UnknownCompOp(13)));
        assert_eq!(
            UnknownCompOp(99).to_string(),
            "unknown composition operator 99"
        );
    }

    #[test]
    fn test_clear_is_absorbing() {
        for dst in [Rgba8::WHITE, HALF_RED, Rgba8::TRANSPARENT] {
            for src in [Rgba8::BLUE, Rgba8::TRANSPARENT] {
                assert_eq!(apply(dst, src, CompOp::Clear), Rgba8::TRANSPARENT);
            }
        }
    }

    #[test]
    fn test_a_replaces_and_b_keeps() {
        assert_eq!(apply(Rgba8::BLUE, HALF_RED, CompOp::A), HALF_RED);
        assert_eq!(apply(Rgba8::BLUE, HALF_RED, CompOp::B), Rgba8::BLUE);
    }

    #[test]
    fn test_a_over_b() {
        let out = apply(Rgba8::BLUE, HALF_RED, CompOp::AOverB);
        assert_eq!(out, Rgba8::new(128, 0, 127, 255));
        // Opaque and fully transparent sources take the packed fast paths.
        assert_eq!(apply(Rgba8::BLUE, Rgba8::RED, CompOp::AOverB), Rgba8::RED);
        assert_eq!(
            apply(Rgba8::BLUE, Rgba8::TRANSPARENT, CompOp::AOverB),
            Rgba8::BLUE
        );
    }

    #[test]
    fn test_b_over_a() {
        // Opaque destination hides the source entirely.
        assert_eq!(apply(Rgba8::BLUE, HALF_RED, CompOp::BOverA), Rgba8::BLUE);
        // Transparent destination lets it through.
        assert_eq!(
            apply(Rgba8::TRANSPARENT, HALF_RED, CompOp::BOverA),
            HALF_RED
        );
    }

    #[test]
    fn test_in_and_out() {
        assert_eq!(apply(Rgba8::BLUE, HALF_RED, CompOp::AInB), HALF_RED);
        assert_eq!(
            apply(Rgba8::TRANSPARENT, HALF_RED, CompOp::AInB),
            Rgba8::TRANSPARENT
        );
        assert_eq!(
            apply(Rgba8::BLUE, HALF_RED, CompOp::BInA),
            Rgba8::new(0, 0, 255, 128)
        );
        assert_eq!(
            apply(Rgba8::BLUE, HALF_RED, CompOp::AOutB),
            Rgba8::TRANSPARENT
        );
        assert_eq!(
            apply(Rgba8::TRANSPARENT, HALF_RED, CompOp::AOutB),
            HALF_RED
        );
        assert_eq!(
            apply(Rgba8::BLUE, HALF_RED, CompOp::BOutA),
            Rgba8::new(0, 0, 255, 127)
        );
    }

    #[test]
    fn test_atop() {
        // A atop B keeps B's coverage.
        let out = apply(Rgba8::BLUE, HALF_RED, CompOp::AAtopB);
        assert_eq!(out, Rgba8::new(128, 0, 127, 255));
        assert_eq!(
            apply(Rgba8::TRANSPARENT, HALF_RED, CompOp::AAtopB),
            Rgba8::TRANSPARENT
        );
        // B atop A takes A's coverage.
        let out = apply(Rgba8::BLUE, HALF_RED, CompOp::BAtopA);
        assert_eq!(out, Rgba8::new(0, 0, 255, 128));
    }

    #[test]
    fn test_xor() {
        assert_eq!(
            apply(Rgba8::BLUE, Rgba8::RED, CompOp::Xor),
            Rgba8::TRANSPARENT
        );
        assert_eq!(apply(Rgba8::TRANSPARENT, Rgba8::RED, CompOp::Xor), Rgba8::RED);
        assert_eq!(apply(Rgba8::BLUE, Rgba8::TRANSPARENT, CompOp::Xor), Rgba8::BLUE);
    }

    #[test]
    fn test_plus_saturates() {
        assert_eq!(
            apply(Rgba8::BLUE, Rgba8::RED, CompOp::Plus),
            Rgba8::MAGENTA
        );
        assert_eq!(
            apply(Rgba8::WHITE, Rgba8::WHITE, CompOp::Plus),
            Rgba8::WHITE
        );
    }

    #[test]
    fn test_a_is_idempotent_for_opaque_colors() {
        for op_color in [Rgba8::RED, Rgba8::new_opaque(10, 20, 30)] {
            let once = apply(HALF_RED, op_color, CompOp::A);
            let twice = apply(once, op_color, CompOp::A);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_table_matches_generic_path() {
        let dsts = [Rgba8::BLUE, HALF_RED, Rgba8::TRANSPARENT, Rgba8::new(10, 200, 30, 77)];
        let srcs = [Rgba8::GREEN, Rgba8::new(40, 50, 60, 190), Rgba8::TRANSPARENT];
        for op in CompOp::ALL {
            for dst in dsts {
                for src in srcs {
                    let source = Source::<Argb8888>::new(src);
                    let mut via_table = Argb8888::from_rgba8(dst);
                    Argb8888::composition(op)(&mut via_table, &source);
                    let mut via_generic = Argb8888::from_rgba8(dst);
                    compose(&mut via_generic, &source, op);
                    // Fast paths skip the premultiply round trip, so
                    // channels of translucent pixels may differ by rounding.
                    let (t, g) = (via_table.to_rgba8(), via_generic.to_rgba8());
                    assert_eq!(t.a, g.a, "{op:?} {src:?} onto {dst:?}");
                    if t.a == 0 {
                        continue;
                    }
                    for (ct, cg) in [(t.r, g.r), (t.g, g.g), (t.b, g.b)] {
                        assert!(
                            (ct as i32 - cg as i32).abs() <= 2,
                            "{op:?} {src:?} onto {dst:?}: {t:?} vs {g:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_one_bit_alpha_format() {
        let mut p = Argb1555::from_rgba8(Rgba8::BLUE);
        p.composite(&Source::new(Rgba8::RED), CompOp::AOverB);
        assert_eq!(p.to_rgba8(), Rgba8::RED);

        p.composite(&Source::new(Rgba8::GREEN), CompOp::AOutB);
        assert_eq!(p, Argb1555::TRANSPARENT);
    }
}
