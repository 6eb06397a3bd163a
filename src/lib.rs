//! # ges-raster
//!
//! Small integer-only 2D rasterizer for embedded framebuffers.
//!
//! Shapes are drawn into a fixed-size [`surface::Surface`] whose pixel type is
//! chosen at compile time. Every pixel write goes through one of the thirteen
//! Porter-Duff operators of [`comp_op::CompOp`].
//!
//! - Lines, rectangles, circles and ellipses, outlined or filled
//! - Odd and even diameter circles and ellipses
//! - Optional clip rectangle per call
//! - ARGB1555, RGB565 and ARGB8888 storage
//! - No heap allocation and no floating point
//!
//! ## Layers
//!
//! 1. **Geometry**: points, lines, rects, circles, ellipses
//! 2. **Color**: straight RGBA plus native packed formats
//! 3. **Compositing**: operator lookup resolved once per draw call
//! 4. **Surface**: owned pixel storage, format-erased [`pixel_buffer::PixelBuffer`] views
//! 5. **Painter**: scan conversion into surface spans

// Foundation types
pub mod basics;
pub mod color;
pub mod geometry;

// Compositing and pixel formats
pub mod comp_op;
pub mod pixel_buffer;
pub mod pixfmt_argb1555;
pub mod pixfmt_argb8888;
pub mod pixfmt_rgb565;

// Storage and rasterization
pub mod painter;
pub mod surface;
