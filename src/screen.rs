use std::fs::File;
use std::io::{Write, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use bytemuck::try_cast_slice_mut;
use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageFormat, RgbImage, RgbaImage};

use crate::error::BufferError;

/// An owned raster of interleaved 8-bit channels.
///
/// Row-major, row 0 first, `channels` bytes per pixel. The rasterizer maps
/// row 0 to NDC y = -1, so row 0 is the bottom of the picture.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a zeroed buffer.
    pub fn new(width: u32, height: u32, channels: usize) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimension { width, height });
        }
        if !(1..=4).contains(&channels) {
            return Err(BufferError::InvalidChannelCount(channels));
        }
        let size_calc = width as usize * height as usize * channels;
        Ok(Self { width, height, channels, data: vec![0; size_calc] })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Bytes in one row of pixels.
    #[inline(always)]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.channels
    }

    #[inline(always)]
    fn index(&self, x: u32, y: u32, channel: usize) -> Result<usize, BufferError> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return Err(BufferError::OutOfBounds { x, y, channel });
        }
        Ok((y as usize * self.width as usize + x as usize) * self.channels + channel)
    }

    pub fn set_channel(&mut self, x: u32, y: u32, channel: usize, value: u8) -> Result<(), BufferError> {
        let i = self.index(x, y, channel)?;
        self.data[i] = value;
        Ok(())
    }

    pub fn get_channel(&self, x: u32, y: u32, channel: usize) -> Result<u8, BufferError> {
        let i = self.index(x, y, channel)?;
        Ok(self.data[i])
    }

    /// All channels of one pixel, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let i = self.index(x, y, 0).ok()?;
        Some(&self.data[i..i + self.channels])
    }

    /// Fills every pixel with `pixel`, which must hold exactly `channels` values.
    pub fn clear(&mut self, pixel: &[u8]) -> Result<(), BufferError> {
        if pixel.len() != self.channels {
            return Err(BufferError::InvalidChannelCount(pixel.len()));
        }
        if let [r, g, b, a] = *pixel {
            // Word-sized fill when the allocation happens to be 4-byte aligned
            if let Ok(words) = try_cast_slice_mut::<u8, u32>(&mut self.data) {
                words.fill(u32::from_ne_bytes([r, g, b, a]));
                return Ok(());
            }
        }
        for px in self.data.chunks_exact_mut(self.channels) {
            px.copy_from_slice(pixel);
        }
        Ok(())
    }

    /// Reallocates to a new size, keeping the channel count. Contents are zeroed.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), BufferError> {
        *self = Self::new(width, height, self.channels)?;
        Ok(())
    }

    /// RGB triple of a pixel for export. One and two channel buffers are greyscale.
    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * self.channels;
        if self.channels >= 3 {
            [self.data[i], self.data[i + 1], self.data[i + 2]]
        } else {
            [self.data[i]; 3]
        }
    }

    pub fn write_bmp<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let width = self.width;
        let height = self.height;
        let row_stride = (3 * width + 3) & !3;
        let pixel_array_size = row_stride * height;
        let file_size = 54 + pixel_array_size;
        let mut file = BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        );
        file.write_all(b"BM")?;
        file.write_all(&file_size.to_le_bytes())?;
        file.write_all(&[0u8; 4])?;
        file.write_all(&54u32.to_le_bytes())?;
        file.write_all(&[40u8, 0, 0, 0])?;
        file.write_all(&(width as i32).to_le_bytes())?;
        file.write_all(&(height as i32).to_le_bytes())?;
        file.write_all(&[1, 0])?;
        file.write_all(&[24, 0])?;
        file.write_all(&[0u8; 4])?;
        file.write_all(&pixel_array_size.to_le_bytes())?;
        file.write_all(&[0u8; 4])?;
        file.write_all(&[0u8; 4])?;
        file.write_all(&[0u8; 4])?;
        file.write_all(&[0u8; 4])?;
        let padding = vec![0u8; (row_stride - width * 3) as usize];
        // BMP stores the bottom row first, which is already our row 0
        for y in 0..height {
            for x in 0..width {
                let [r, g, b] = self.rgb_at(x, y);
                file.write_all(&[b, g, r])?;
            }
            file.write_all(&padding)?;
        }
        file.flush()?;
        Ok(())
    }

    pub fn to_image(&self) -> Result<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let raw = self.data.clone();
        let img = match self.channels {
            1 => GrayImage::from_raw(w, h, raw).map(DynamicImage::ImageLuma8),
            2 => GrayAlphaImage::from_raw(w, h, raw).map(DynamicImage::ImageLumaA8),
            3 => RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
            _ => RgbaImage::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
        };
        img.context("pixel buffer does not match image layout")
    }

    /// Writes a PNG flipped so that NDC y = 1 ends up at the top.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.to_image()?
            .flipv()
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("writing {}", path.display()))
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "PixelBuffer({}x{}, {} channels)", self.width, self.height, self.channels)
    }
}
