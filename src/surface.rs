//! Fixed-size framebuffer storage.
//!
//! A [`Surface`] owns a `W` x `H` array of native pixels, sized at compile
//! time and zero-initialised, so it can live in a `static` on targets without
//! a heap. It is the only place pixels are mutated; every access is bounds
//! checked and an out-of-range coordinate is a silent no-op rather than an
//! error.
//!
//! Storage is row-major so a horizontal span is one contiguous slice.

use core::ops::RangeInclusive;

use crate::comp_op::NativeColor;
use crate::pixel_buffer::{PixelBuffer, PixelFormat};
use crate::pixfmt_argb1555::Argb1555;
use crate::pixfmt_argb8888::Argb8888;
use crate::pixfmt_rgb565::Rgb565;

// ============================================================================
// Surface
// ============================================================================

pub struct Surface<C: NativeColor, const W: usize, const H: usize> {
    buffer: [[C; W]; H],
}

pub type SurfaceArgb1555<const W: usize, const H: usize> = Surface<Argb1555, W, H>;
pub type SurfaceRgb565<const W: usize, const H: usize> = Surface<Rgb565, W, H>;
pub type SurfaceArgb8888<const W: usize, const H: usize> = Surface<Argb8888, W, H>;

impl<C: NativeColor, const W: usize, const H: usize> Surface<C, W, H> {
    const DIMENSIONS_FIT_U16: () = assert!(
        W <= u16::MAX as usize && H <= u16::MAX as usize,
        "surface dimensions must fit in u16"
    );

    /// A surface with every pixel set to the zero value.
    pub const fn new() -> Self {
        let () = Self::DIMENSIONS_FIT_U16;
        Self {
            buffer: [[C::TRANSPARENT; W]; H],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        W as u16
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        H as u16
    }

    pub const fn pixel_format(&self) -> PixelFormat {
        C::FORMAT
    }

    /// Format-erased view of the storage, valid while the surface is borrowed.
    pub fn pixel_buffer(&self) -> PixelBuffer<'_> {
        let bytes: &[u8] = bytemuck::cast_slice(&self.buffer[..]);
        PixelBuffer::from_parts(bytes, W as u16, H as u16, C::FORMAT)
    }

    /// Typed pixels, row-major.
    pub fn pixels(&self) -> &[[C; W]; H] {
        &self.buffer
    }

    /// Reset every pixel to the zero value.
    pub fn clear(&mut self) {
        log::debug!("clearing {}x{} {:?} surface", W, H, C::FORMAT);
        bytemuck::fill_zeroes(&mut self.buffer[..]);
    }

    /// Set every pixel to `color`.
    pub fn clear_with(&mut self, color: C) {
        log::debug!("filling {}x{} {:?} surface with {:?}", W, H, C::FORMAT, color);
        for row in self.buffer.iter_mut() {
            row.fill(color);
        }
    }

    /// Store `color` at (x, y). Returns `false`, touching nothing, when the
    /// coordinate is outside the surface.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: C) -> bool {
        match self.pixel_mut(x, y) {
            Some(p) => {
                *p = color;
                true
            }
            None => false,
        }
    }

    pub fn clear_pixel(&mut self, x: u16, y: u16) -> bool {
        self.set_pixel(x, y, C::TRANSPARENT)
    }

    /// Pixel at (x, y), or the zero value outside the surface.
    pub fn get_pixel(&self, x: u16, y: u16) -> C {
        self.buffer
            .get(usize::from(y))
            .and_then(|row| row.get(usize::from(x)))
            .copied()
            .unwrap_or(C::TRANSPARENT)
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: u16, y: u16) -> Option<&mut C> {
        self.buffer
            .get_mut(usize::from(y))
            .and_then(|row| row.get_mut(usize::from(x)))
    }

    /// Contiguous pixels `xs` of row `y`; the range is cut to the surface
    /// width. `None` when nothing of it is on the surface.
    pub fn span_mut(&mut self, y: u16, xs: RangeInclusive<u16>) -> Option<&mut [C]> {
        let row = self.buffer.get_mut(usize::from(y))?;
        let start = usize::from(*xs.start());
        let end = usize::from(*xs.end()).min(W.checked_sub(1)?);
        if start > end {
            return None;
        }
        row.get_mut(start..=end)
    }
}

impl<C: NativeColor, const W: usize, const H: usize> Default for Surface<C, W, H> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
