use rayon::prelude::*;

use crate::foundation::error::{EpicurusError, EpicurusResult};
use crate::foundation::math::{lerp255_u8, unit_interval, unit_to_weight255};
use crate::layers::layer::Layer;
use crate::pixel::buffer::PixelBuffer;

/// Linear interpolation `bottom * (1 - alpha) + top * alpha` on all four channels.
///
/// `alpha` is quantized to 1/255 steps, so `0.0` reproduces `bottom` and `1.0` reproduces `top`
/// exactly.
pub fn blend(bottom: &PixelBuffer, top: &PixelBuffer, alpha: f32) -> EpicurusResult<PixelBuffer> {
    let alpha = unit_interval("blend alpha", alpha)?;
    bottom.ensure_same_dimensions(top, "blend")?;
    let w = unit_to_weight255(alpha);
    if w == 0 {
        return Ok(bottom.clone());
    }
    if w == 255 {
        return Ok(top.clone());
    }

    let row = bottom.row_bytes();
    let mut out = bottom.as_bytes().to_vec();
    out.par_chunks_mut(row)
        .zip(top.as_bytes().par_chunks(row))
        .for_each(|(dst, src)| {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = lerp255_u8(*d, *s, w);
            }
        });
    Ok(bottom.with_data(out))
}

/// Fold every layer above index 0 onto index 0's buffer, in stack order, using each layer's own
/// alpha.
///
/// All dimensions are checked before anything is computed. The layers are not modified; the
/// caller decides whether to commit the returned buffer and drop the upper layers.
pub fn merge_down(layers: &[Layer]) -> EpicurusResult<PixelBuffer> {
    let Some((base, rest)) = layers.split_first() else {
        return Err(EpicurusError::invalid_parameter(
            "merge_down requires at least one layer",
        ));
    };
    for layer in rest {
        if !layer.buffer().same_dimensions(base.buffer()) {
            let (bw, bh) = base.buffer().dimensions();
            let (lw, lh) = layer.buffer().dimensions();
            return Err(EpicurusError::dimension_mismatch(format!(
                "layer '{}' is {lw}x{lh} but base '{}' is {bw}x{bh}",
                layer.name(),
                base.name()
            )));
        }
    }

    let mut acc = base.buffer().clone();
    for layer in rest {
        acc = blend(&acc, layer.buffer(), layer.alpha())?;
    }
    Ok(acc)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
