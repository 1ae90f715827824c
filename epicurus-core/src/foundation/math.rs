use crate::foundation::error::{EpicurusError, EpicurusResult};

/// Byte length of a tightly packed RGBA8 buffer, or `None` when it would overflow `usize`.
pub(crate) fn rgba8_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
}

/// Quantize a `[0, 1]` coefficient to an 8-bit weight.
pub(crate) fn unit_to_weight255(t: f32) -> u16 {
    ((t.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16
}

/// `(a * (255 - w) + b * w) / 255`, rounded to nearest.
pub(crate) fn lerp255_u8(a: u8, b: u8, w: u16) -> u8 {
    let w = u32::from(w.min(255));
    let v = u32::from(a) * (255 - w) + u32::from(b) * w;
    ((v + 127) / 255) as u8
}

/// Round a Q16 fixed-point accumulator to an 8-bit channel, saturating at 255.
pub(crate) fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

/// Round and clamp a filter result into `[0, 255]`.
pub(crate) fn clamp_round_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Accept a finite coefficient in `[0, 1]`.
pub(crate) fn unit_interval(what: &str, v: f32) -> EpicurusResult<f32> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(EpicurusError::invalid_parameter(format!(
            "{what} must be within [0, 1], got {v}"
        )));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
