//! A multi-threaded scanline rasterizer for flat-coloured 2D triangles.
//!
//! Triangles are given in normalized device coordinates (y up) and drawn
//! into a [`PixelBuffer`] with [`draw`] or [`draw_with`].
//!
//! ```
//! use scanline::{draw_with, Color, PixelBuffer, Point2D, RasterConfig, Triangle};
//!
//! let mut buffer = PixelBuffer::new(64, 64, 3).unwrap();
//! let tri = Triangle::new(
//!     Point2D::new(-0.5, -0.5),
//!     Point2D::new(0.5, -0.5),
//!     Point2D::new(0.0, 0.5),
//!     Color::new(255.0, 0.0, 0.0),
//! );
//! draw_with(&mut buffer, &[tri], &RasterConfig::with_workers(2));
//! assert_eq!(buffer.pixel(32, 32), Some(&[255u8, 0, 0][..]));
//! ```

pub mod config;
pub mod error;
pub mod partition;
pub mod point2d;
pub mod scanline;
pub mod screen;
pub mod triangle;

pub use crate::config::RasterConfig;
pub use crate::error::BufferError;
pub use crate::point2d::Point2D;
pub use crate::scanline::{draw, draw_with};
pub use crate::screen::PixelBuffer;
pub use crate::triangle::{Color, Triangle};
