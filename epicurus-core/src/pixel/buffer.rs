use crate::foundation::core::Rgba8;
use crate::foundation::error::{EpicurusError, EpicurusResult};
use crate::foundation::math::rgba8_len;

/// Fixed-size grid of straight-alpha RGBA8 samples.
///
/// Pixels are stored row-major and tightly packed (`width * height * 4` bytes). Width and height
/// are positive and never change for the lifetime of a buffer; operations that change size
/// (resize) produce a new buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a transparent black buffer.
    pub fn new(width: u32, height: u32) -> EpicurusResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Allocate a buffer where every sample is `px`.
    pub fn filled(width: u32, height: u32, px: Rgba8) -> EpicurusResult<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: px.repeat(len / 4),
        })
    }

    /// Wrap tightly packed RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> EpicurusResult<Self> {
        let len = checked_len(width, height)?;
        if data.len() != len {
            return Err(EpicurusError::invalid_parameter(format!(
                "expected {len} rgba8 bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert any decoded image to RGBA8, whatever its source channel layout.
    pub fn from_dynamic_image(img: &image::DynamicImage) -> EpicurusResult<Self> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Copy the pixels into an [`image::RgbaImage`].
    pub fn to_rgba_image(&self) -> EpicurusResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            EpicurusError::Other(anyhow::anyhow!(
                "rgba8 buffer does not match {}x{}",
                self.width,
                self.height
            ))
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of samples (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// Raw row-major RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Iterate samples in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.data.chunks_exact(4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Read the sample at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> EpicurusResult<Rgba8> {
        let i = self.index(x, y)?;
        let p = &self.data[i..i + 4];
        Ok([p[0], p[1], p[2], p[3]])
    }

    /// Overwrite the sample at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, px: Rgba8) -> EpicurusResult<()> {
        let i = self.index(x, y)?;
        self.data[i..i + 4].copy_from_slice(&px);
        Ok(())
    }

    /// Whether `other` has the same width and height.
    pub fn same_dimensions(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
    }

    pub(crate) fn ensure_same_dimensions(&self, other: &Self, op: &str) -> EpicurusResult<()> {
        if !self.same_dimensions(other) {
            return Err(EpicurusError::dimension_mismatch(format!(
                "{op} expects equal sizes, got {}x{} and {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        Ok(())
    }

    /// Build a sibling buffer with the same dimensions from already-sized bytes.
    pub(crate) fn with_data(&self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    pub(crate) fn row_bytes(&self) -> usize {
        self.width as usize * 4
    }

    fn index(&self, x: u32, y: u32) -> EpicurusResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(EpicurusError::out_of_range(format!(
                "pixel ({x}, {y}) outside {}x{}",
                self.width, self.height
            )));
        }
        Ok(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }
}

fn checked_len(width: u32, height: u32) -> EpicurusResult<usize> {
    if width == 0 || height == 0 {
        return Err(EpicurusError::invalid_parameter(format!(
            "buffer dimensions must be positive, got {width}x{height}"
        )));
    }
    rgba8_len(width, height)
        .ok_or_else(|| EpicurusError::invalid_parameter("buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/buffer.rs"]
mod tests;
