use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{FrameSize, Rgb8};
use crate::foundation::error::{QuoteError, QuoteResult};

/// A fully composed frame as tightly packed, row-major RGB8 pixels.
///
/// Immutable once built; encoders convert into their own scratch buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ComposedFrame {
    /// Wrap an RGB8 buffer, checking its length against the dimensions.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> QuoteResult<Self> {
        let size = FrameSize::new(width, height)?;
        if data.len() != size.pixel_count().saturating_mul(3) {
            return Err(QuoteError::render(format!(
                "rgb buffer length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame filled with one color.
    pub fn solid(size: FrameSize, color: Rgb8) -> Self {
        let data = color.to_array().repeat(size.pixel_count());
        Self {
            width: size.width,
            height: size.height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions.
    pub fn size(&self) -> FrameSize {
        FrameSize {
            width: self.width,
            height: self.height,
        }
    }

    /// RGB8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Color at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some(Rgb8::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Write the frame as BGR8 into `out`, reusing its allocation.
    pub fn write_bgr_into(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.data.len());
        for px in self.data.chunks_exact(3) {
            out.extend_from_slice(&[px[2], px[1], px[0]]);
        }
    }

    /// Save as PNG, creating parent directories.
    pub fn save_png(&self, path: &Path) -> QuoteResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
