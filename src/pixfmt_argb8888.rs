//! ARGB8888 pixel format.
//!
//! 32 bits per pixel packed as `0xAARRGGBB`. Lossless against [`Rgba8`], so
//! every operator uses the generic integer path unchanged.

use bytemuck::{Pod, Zeroable};

use crate::color::{argb8_packed, Rgba8};
use crate::comp_op::NativeColor;
use crate::pixel_buffer::PixelFormat;

/// A packed ARGB8888 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Argb8888(pub u32);

impl Argb8888 {
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl NativeColor for Argb8888 {
    const FORMAT: PixelFormat = PixelFormat::Argb8888;
    const TRANSPARENT: Self = Argb8888(0);

    #[inline]
    fn from_rgba8(c: Rgba8) -> Self {
        Self(c.to_argb_u32())
    }

    #[inline]
    fn to_rgba8(self) -> Rgba8 {
        argb8_packed(self.0)
    }
}

impl From<Rgba8> for Argb8888 {
    fn from(c: Rgba8) -> Self {
        Self::from_rgba8(c)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing() {
        let c = Argb8888::from_rgba8(Rgba8::new(0x11, 0x22, 0x33, 0x44));
        assert_eq!(c.value(), 0x44112233);
        assert_eq!(c.alpha(), 0x44);
        assert_eq!(c.to_rgba8(), Rgba8::new(0x11, 0x22, 0x33, 0x44));
        assert_eq!(Argb8888::from(Rgba8::new(0x11, 0x22, 0x33, 0x44)), c);
        assert_eq!(Argb8888::TRANSPARENT.to_rgba8(), Rgba8::TRANSPARENT);
    }
}
