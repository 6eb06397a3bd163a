//! RGB565 pixel format.
//!
//! 16 bits per pixel, no alpha: five bits red, six green, five blue. Every
//! stored pixel is opaque, so the destination alpha seen by the operators is
//! always 1. A color or composited result with alpha below 1 is stored as
//! if drawn over black, i.e. its premultiplied channels. The zero value is
//! both fully transparent and opaque black.

use bytemuck::{Pod, Zeroable};

use crate::color::Rgba8;
use crate::comp_op::{NativeColor, Source};
use crate::pixel_buffer::PixelFormat;

/// A packed RGB565 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Build from 5-bit red, 6-bit green and 5-bit blue. Excess bits are masked.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0x1F) << 11) | ((g as u16 & 0x3F) << 5) | (b as u16 & 0x1F))
    }

    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 11) as u8 & 0x1F
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 5) as u8 & 0x3F
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8 & 0x1F
    }
}

impl NativeColor for Rgb565 {
    const FORMAT: PixelFormat = PixelFormat::Rgb565;
    const TRANSPARENT: Self = Rgb565(0);

    #[inline]
    fn from_rgba8(c: Rgba8) -> Self {
        Self::from_premultiplied(c.premultiplied())
    }

    #[inline]
    fn from_premultiplied(c: Rgba8) -> Self {
        Self::new(c.r >> 3, c.g >> 2, c.b >> 3)
    }

    #[inline]
    fn to_rgba8(self) -> Rgba8 {
        let (r, g, b) = (self.red(), self.green(), self.blue());
        Rgba8::new_opaque((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    // Destination alpha is always 1: B covers A completely.
    fn b_over_a(&mut self, _src: &Source<Self>) {}

    fn a_in_b(&mut self, src: &Source<Self>) {
        *self = src.native;
    }

    fn a_out_b(&mut self, _src: &Source<Self>) {
        *self = Self::TRANSPARENT;
    }

    fn a_atop_b(&mut self, src: &Source<Self>) {
        self.a_over_b(src);
    }
}

impl From<Rgba8> for Rgb565 {
    fn from(c: Rgba8) -> Self {
        Self::from_rgba8(c)
    }
}

// ============================================================================
// Tests
// ============================================================================
