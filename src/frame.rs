//! In-memory video frame.
//!
//! A `Frame` is a single decoded RGB24 image pulled from a stream source.
//! Frames are transient: one is alive per loop iteration and it is dropped
//! at the end of the iteration. Nothing here is persisted.

use anyhow::{anyhow, Context, Result};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

/// Owned RGB24 pixel buffer with dimensions.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    /// Create a frame from raw RGB24 bytes. The buffer length must match
    /// `width * height * 3`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * 3;
        if data.len() != expected {
            return Err(anyhow!(
                "frame buffer is {} bytes; expected {} for {}x{} RGB",
                data.len(),
                expected,
                width,
                height
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A zero-sized frame. Sources may hand these back on decode hiccups;
    /// the viewer skips them.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// Encode the frame as PNG for the detection request body.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let image = self.to_rgb_image()?;
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .context("encode frame as png")?;
        Ok(bytes)
    }

    /// Copy into an `RgbImage` for annotation.
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        RgbImage::from_vec(self.width, self.height, self.data.clone())
            .ok_or_else(|| anyhow!("frame buffer does not match dimensions"))
    }

    /// Consume the frame into an `RgbImage` without copying.
    pub fn into_rgb_image(self) -> Result<RgbImage> {
        let (width, height) = (self.width, self.height);
        RgbImage::from_vec(width, height, self.data)
            .ok_or_else(|| anyhow!("frame buffer does not match dimensions"))
    }

    pub fn from_rgb_image(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            data: image.into_raw(),
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(Frame::new(vec![0u8; 10], 4, 4).is_err());
    }

    #[test]
    fn empty_frame_is_empty() {
        assert!(Frame::empty().is_empty());
        let frame = Frame::new(vec![0u8; 4 * 4 * 3], 4, 4).unwrap();
        assert!(!frame.is_empty());
    }

    #[test]
    fn png_encoding_produces_png_magic() {
        let frame = Frame::new(vec![128u8; 8 * 8 * 3], 8, 8).unwrap();
        let png = frame.encode_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn round_trips_through_rgb_image() {
        let frame = Frame::new((0..48).collect(), 4, 4).unwrap();
        let image = frame.clone().into_rgb_image().unwrap();
        let back = Frame::from_rgb_image(image);
        assert_eq!(back.pixels(), frame.pixels());
        assert_eq!((back.width, back.height), (4, 4));
    }
}
