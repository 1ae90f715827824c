use std::path::Path;

use anyhow::Context;

use crate::foundation::error::EpicurusResult;
use crate::pixel::buffer::PixelBuffer;

/// Decode encoded image bytes (any format `image` recognizes) into an RGBA8 buffer.
pub fn decode_image(bytes: &[u8]) -> EpicurusResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    PixelBuffer::from_dynamic_image(&dyn_img)
}

/// Read and decode an image file.
pub fn load_image(path: impl AsRef<Path>) -> EpicurusResult<PixelBuffer> {
    let path = path.as_ref();
    let dyn_img = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("sniff image format of '{}'", path.display()))?
        .decode()
        .with_context(|| format!("decode image '{}'", path.display()))?;
    PixelBuffer::from_dynamic_image(&dyn_img)
}

/// Encode `buf` to `path`, picking the format from the file extension.
///
/// Formats without an alpha channel (JPEG) receive the RGB conversion. Missing parent
/// directories are created.
pub fn save_image(buf: &PixelBuffer, path: impl AsRef<Path>) -> EpicurusResult<()> {
    let path = path.as_ref();
    let format = image::ImageFormat::from_path(path)
        .with_context(|| format!("unknown image format for '{}'", path.display()))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let img = image::DynamicImage::ImageRgba8(buf.to_rgba_image()?);
    let img = if format == image::ImageFormat::Jpeg {
        image::DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };
    img.save_with_format(path, format)
        .with_context(|| format!("write image '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), ?format, "image written");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/codec.rs"]
mod tests;
