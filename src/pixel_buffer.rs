//! Format-erased framebuffer views.
//!
//! A [`PixelBuffer`] borrows the storage of a surface together with its
//! dimensions and a [`PixelFormat`] tag. It is what crosses the boundary to
//! code that must not depend on the compile-time pixel type, such as a
//! display driver. Pixels are stored row-major, `width` pixels per row, each
//! pixel one native word in platform byte order.

use thiserror::Error;

use crate::comp_op::NativeColor;

// ============================================================================
// PixelFormat
// ============================================================================

/// Tag naming a packed pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PixelFormat {
    /// 1-bit alpha, 5 bits each of red, green and blue.
    Argb1555 = 0,
    /// 5 bits red, 6 bits green, 5 bits blue, no alpha.
    Rgb565 = 1,
    /// 8 bits each of alpha, red, green and blue.
    Argb8888 = 2,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Argb1555 | PixelFormat::Rgb565 => 2,
            PixelFormat::Argb8888 => 4,
        }
    }

    pub const fn has_alpha(self) -> bool {
        !matches!(self, PixelFormat::Rgb565)
    }
}

impl TryFrom<u8> for PixelFormat {
    type Error = PixelBufferError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(PixelFormat::Argb1555),
            1 => Ok(PixelFormat::Rgb565),
            2 => Ok(PixelFormat::Argb8888),
            _ => Err(PixelBufferError::UnknownFormat(v)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PixelBufferError {
    #[error("unknown pixel format tag {0}")]
    UnknownFormat(u8),
    #[error("pixel buffer holds {found:?} pixels, not {expected:?}")]
    FormatMismatch {
        expected: PixelFormat,
        found: PixelFormat,
    },
    #[error("pixel buffer of {len} bytes does not match {width}x{height} {format:?}")]
    LengthMismatch {
        len: usize,
        width: u16,
        height: u16,
        format: PixelFormat,
    },
    #[error("pixel buffer storage is not aligned for {0:?} pixels")]
    Misaligned(PixelFormat),
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Non-owning view of a packed framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: u16,
    height: u16,
    format: PixelFormat,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap externally owned bytes. The length must be exactly
    /// `width * height * format.bytes_per_pixel()`.
    pub fn new(
        data: &'a [u8],
        width: u16,
        height: u16,
        format: PixelFormat,
    ) -> Result<Self, PixelBufferError> {
        let expected = usize::from(width) * usize::from(height) * format.bytes_per_pixel();
        if data.len() != expected {
            return Err(PixelBufferError::LengthMismatch {
                len: data.len(),
                width,
                height,
                format,
            });
        }
        Ok(Self::from_parts(data, width, height, format))
    }

    /// Caller guarantees the length invariant.
    pub(crate) fn from_parts(data: &'a [u8], width: u16, height: u16, format: PixelFormat) -> Self {
        Self {
            data,
            width,
            height,
            format,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        usize::from(self.width) * self.bytes_per_pixel()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes of row `y`, or `None` past the last row.
    pub fn row_bytes(&self, y: u16) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = usize::from(y) * self.stride();
        self.data.get(start..start + self.stride())
    }

    /// Recover the typed pixels when `C` is the format this buffer holds.
    pub fn pixels<C: NativeColor>(&self) -> Result<&'a [C], PixelBufferError> {
        if C::FORMAT != self.format {
            return Err(PixelBufferError::FormatMismatch {
                expected: C::FORMAT,
                found: self.format,
            });
        }
        bytemuck::try_cast_slice(self.data).map_err(|_| PixelBufferError::Misaligned(self.format))
    }

    /// Typed pixel at (x, y), `None` out of bounds or on a format mismatch.
    pub fn pixel<C: NativeColor>(&self, x: u16, y: u16) -> Option<C> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let pixels = self.pixels::<C>().ok()?;
        pixels
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }
}

/// The consumer side of a rendered frame, e.g. a display driver streaming
/// the buffer to a panel.
pub trait DisplaySink {
    fn present(&mut self, buffer: PixelBuffer<'_>);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixfmt_argb1555::Argb1555;
    use crate::pixfmt_argb8888::Argb8888;

    #[test]
    fn test_format_tags() {
        for f in [PixelFormat::Argb1555, PixelFormat::Rgb565, PixelFormat::Argb8888] {
            assert_eq!(PixelFormat::try_from(f as u8), Ok(f));
        }
        assert_eq!(
            PixelFormat::try_from(7),
            Err(PixelBufferError::UnknownFormat(7))
        );
        assert_eq!(PixelFormat::Argb1555.bytes_per_pixel(), 2);
        assert_eq!(PixelFormat::Argb8888.bytes_per_pixel(), 4);
        assert!(!PixelFormat::Rgb565.has_alpha());
    }

    #[test]
    fn test_length_is_validated() {
        let bytes = [0u8; 12];
        assert!(PixelBuffer::new(&bytes, 3, 2, PixelFormat::Argb1555).is_ok());
        let err = PixelBuffer::new(&bytes, 3, 3, PixelFormat::Argb1555).unwrap_err();
        assert!(matches!(err, PixelBufferError::LengthMismatch { len: 12, .. }));
    }

    #[test]
    fn test_typed_view() {
        let words = [Argb1555(0x8001), Argb1555(0x8002), Argb1555(0x8003), Argb1555(0x8004)];
        let bytes: &[u8] = bytemuck::cast_slice(&words);
        let buf = PixelBuffer::new(bytes, 2, 2, PixelFormat::Argb1555).unwrap();
        assert_eq!(buf.stride(), 4);
        assert_eq!(buf.pixels::<Argb1555>().unwrap(), &words);
        assert_eq!(buf.pixel::<Argb1555>(1, 1), Some(Argb1555(0x8004)));
        assert_eq!(buf.pixel::<Argb1555>(2, 0), None);
        assert_eq!(buf.row_bytes(1).map(<[u8]>::len), Some(4));
        assert_eq!(buf.row_bytes(2), None);
        assert_eq!(
            buf.pixels::<Argb8888>(),
            Err(PixelBufferError::FormatMismatch {
                expected: PixelFormat::Argb8888,
                found: PixelFormat::Argb1555,
            })
        );
    }
}
