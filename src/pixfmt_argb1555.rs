//! ARGB1555 pixel format.
//!
//! 16 bits per pixel: bit 15 is a one-bit alpha, then five bits each of red,
//! green and blue. With only two alpha levels several operators reduce to a
//! choice between the source, the destination and zero, which is done here
//! directly on the packed word.

use bytemuck::{Pod, Zeroable};

use crate::color::Rgba8;
use crate::comp_op::{CompOp, NativeColor, Source};
use crate::pixel_buffer::PixelFormat;

/// A packed ARGB1555 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Argb1555(pub u16);

impl Argb1555 {
    pub const ALPHA_BIT: u16 = 0x8000;
    const CHANNEL_MASK: u16 = 0x1F;

    /// Build from an alpha flag and three 5-bit channel values.
    /// Channel values above 31 are masked.
    pub const fn new(opaque: bool, r: u8, g: u8, b: u8) -> Self {
        let a = if opaque { Self::ALPHA_BIT } else { 0 };
        Self(
            a | ((r as u16 & Self::CHANNEL_MASK) << 10)
                | ((g as u16 & Self::CHANNEL_MASK) << 5)
                | (b as u16 & Self::CHANNEL_MASK),
        )
    }

    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.0 & Self::ALPHA_BIT != 0
    }

    pub const fn red(self) -> u8 {
        ((self.0 >> 10) & Self::CHANNEL_MASK) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & Self::CHANNEL_MASK) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & Self::CHANNEL_MASK) as u8
    }

    #[inline]
    const fn expand(v: u8) -> u8 {
        (v << 3) | (v >> 2)
    }
}

impl NativeColor for Argb1555 {
    const FORMAT: PixelFormat = PixelFormat::Argb1555;
    const TRANSPARENT: Self = Argb1555(0);

    #[inline]
    fn from_rgba8(c: Rgba8) -> Self {
        Self::new(c.a >= 0x80, c.r >> 3, c.g >> 3, c.b >> 3)
    }

    #[inline]
    fn to_rgba8(self) -> Rgba8 {
        Rgba8::new(
            Self::expand(self.red()),
            Self::expand(self.green()),
            Self::expand(self.blue()),
            if self.is_opaque() { 255 } else { 0 },
        )
    }

    fn b_over_a(&mut self, src: &Source<Self>) {
        if !self.is_opaque() {
            *self = src.native;
        }
    }

    fn a_in_b(&mut self, src: &Source<Self>) {
        *self = if self.is_opaque() {
            src.native
        } else {
            Self::TRANSPARENT
        };
    }

    fn a_out_b(&mut self, src: &Source<Self>) {
        *self = if self.is_opaque() {
            Self::TRANSPARENT
        } else {
            src.native
        };
    }

    fn a_atop_b(&mut self, src: &Source<Self>) {
        if self.is_opaque() {
            self.a_over_b(src);
        } else {
            *self = Self::TRANSPARENT;
        }
    }

    fn xor(&mut self, src: &Source<Self>) {
        if self.is_opaque() {
            self.b_out_a(src);
        } else {
            *self = src.native;
        }
    }
}

impl From<Rgba8> for Argb1555 {
    fn from(c: Rgba8) -> Self {
        Self::from_rgba8(c)
    }
}

// ============================================================================
// Tests
// ============================================================================
