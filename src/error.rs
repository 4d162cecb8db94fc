use std::fmt;

/// Errors raised by [`PixelBuffer`](crate::screen::PixelBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Width or height was zero.
    InvalidDimension { width: u32, height: u32 },
    /// Channel count outside `1..=4`, or a fill pixel of the wrong length.
    InvalidChannelCount(usize),
    /// Pixel or channel index past the end of the raster.
    OutOfBounds { x: u32, y: u32, channel: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::InvalidDimension { width, height } => {
                write!(f, "invalid buffer dimensions {width}x{height}")
            }
            BufferError::InvalidChannelCount(channels) => {
                write!(f, "buffer must have between 1 and 4 channels, got {channels}")
            }
            BufferError::OutOfBounds { x, y, channel } => {
                write!(f, "pixel ({x}, {y}) channel {channel} out of bounds")
            }
        }
    }
}

impl std::error::Error for BufferError {}
