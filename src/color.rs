//! Format-independent source color.
//!
//! [`Rgba8`] is the color every painter call takes: straight (not
//! premultiplied) 8-bit red, green and blue plus an 8-bit alpha where 0 is
//! fully transparent and 255 fully opaque. Pixel formats convert it to and
//! from their packed native layout.
//!
//! The fixed-point helpers here are the arithmetic the compositing operators
//! are built on; none of them touch floating point.

// ============================================================================
// Rgba8
// ============================================================================

/// RGBA color with u8 components, straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_SHIFT: u32 = 8;
    pub const BASE_SCALE: u32 = 1 << Self::BASE_SHIFT;
    pub const BASE_MASK: u32 = Self::BASE_SCALE - 1;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);
    pub const BLACK: Rgba8 = Rgba8::new_opaque(0, 0, 0);
    pub const WHITE: Rgba8 = Rgba8::new_opaque(255, 255, 255);
    pub const RED: Rgba8 = Rgba8::new_opaque(255, 0, 0);
    pub const GREEN: Rgba8 = Rgba8::new_opaque(0, 255, 0);
    pub const BLUE: Rgba8 = Rgba8::new_opaque(0, 0, 255);
    pub const YELLOW: Rgba8 = Rgba8::new_opaque(255, 255, 0);
    pub const CYAN: Rgba8 = Rgba8::new_opaque(0, 255, 255);
    pub const MAGENTA: Rgba8 = Rgba8::new_opaque(255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, Self::BASE_MASK as u8)
    }

    pub const fn with_opacity(c: Rgba8, a: u8) -> Self {
        Self::new(c.r, c.g, c.b, a)
    }

    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == Self::BASE_MASK as u8
    }

    #[inline]
    pub const fn invert(x: u8) -> u8 {
        Self::BASE_MASK as u8 - x
    }

    /// Fixed-point multiply, exact over u8.
    /// `(a * b + 128) >> 8`, with rounding correction.
    #[inline]
    pub const fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    /// Color channels scaled by alpha. Alpha itself is unchanged.
    pub const fn premultiplied(self) -> Self {
        match self.a {
            0 => Self::TRANSPARENT,
            255 => self,
            a => Self::new(
                Self::multiply(self.r, a),
                Self::multiply(self.g, a),
                Self::multiply(self.b, a),
                a,
            ),
        }
    }

    /// Inverse of [`premultiplied`](Self::premultiplied), rounding to nearest
    /// and saturating channels that exceed alpha.
    pub const fn demultiplied(self) -> Self {
        match self.a {
            0 => Self::TRANSPARENT,
            255 => self,
            a => Self::new(
                Self::demultiply_value(self.r, a),
                Self::demultiply_value(self.g, a),
                Self::demultiply_value(self.b, a),
                a,
            ),
        }
    }

    #[inline]
    const fn demultiply_value(v: u8, a: u8) -> u8 {
        if v >= a {
            return Self::BASE_MASK as u8;
        }
        ((v as u32 * Self::BASE_MASK + (a as u32 >> 1)) / a as u32) as u8
    }

    /// Pack as `0xAARRGGBB`.
    pub const fn to_argb_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// Create an opaque Rgba8 from a packed RGB value (0xRRGGBB).
pub const fn rgb8_packed(v: u32) -> Rgba8 {
    Rgba8::new_opaque((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

/// Create an Rgba8 from a packed ARGB value (0xAARRGGBB).
pub const fn argb8_packed(v: u32) -> Rgba8 {
    Rgba8::new((v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8)
}

// ============================================================================
// Tests
// ============================================================================
