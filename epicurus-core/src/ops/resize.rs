use image::imageops::FilterType;

use crate::foundation::error::{EpicurusError, EpicurusResult};
use crate::pixel::buffer::PixelBuffer;

/// Shrink `buf` to fit inside `max_width x max_height`, keeping its aspect ratio.
///
/// Buffers that already fit are returned unchanged; this never enlarges.
pub fn thumbnail(buf: &PixelBuffer, max_width: u32, max_height: u32) -> EpicurusResult<PixelBuffer> {
    if max_width == 0 || max_height == 0 {
        return Err(EpicurusError::invalid_parameter(format!(
            "resize bounds must be positive, got {max_width}x{max_height}"
        )));
    }
    let (w, h) = buf.dimensions();
    if w <= max_width && h <= max_height {
        return Ok(buf.clone());
    }

    let (tw, th) = fit_within(w, h, max_width, max_height);
    let src = buf.to_rgba_image()?;
    let resized = image::imageops::resize(&src, tw, th, FilterType::Lanczos3);
    PixelBuffer::from_rgba8(tw, th, resized.into_raw())
}

pub(crate) fn fit_within(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let scale = (f64::from(max_w) / f64::from(w)).min(f64::from(max_h) / f64::from(h));
    let tw = (f64::from(w) * scale).round().clamp(1.0, f64::from(max_w)) as u32;
    let th = (f64::from(h) * scale).round().clamp(1.0, f64::from(max_h)) as u32;
    (tw, th)
}

#[cfg(test)]
#[path = "../../tests/unit/ops/resize.rs"]
mod tests;
