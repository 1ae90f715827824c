//! Square-kernel convolution over RGB with edge replication.

use rayon::prelude::*;

use crate::effects::blur::gaussian_sigma;
use crate::foundation::core::COLOR_CHANNELS;
use crate::foundation::error::{EpicurusError, EpicurusResult};
use crate::foundation::math::clamp_round_u8;
use crate::pixel::buffer::PixelBuffer;

/// Odd-sized square weight matrix with a divisor and a bias.
///
/// Output channel = `round(sum(weight * sample) / divisor + bias)`, clamped to `[0, 255]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
    divisor: f32,
    bias: f32,
}

impl Kernel {
    /// Build a kernel from row-major weights.
    pub fn new(size: usize, weights: Vec<f32>, divisor: f32, bias: f32) -> EpicurusResult<Self> {
        if size == 0 || size.is_multiple_of(2) {
            return Err(EpicurusError::invalid_parameter(format!(
                "kernel size must be odd and positive, got {size}"
            )));
        }
        let taps = tap_count(size)?;
        if weights.len() != taps {
            return Err(EpicurusError::invalid_parameter(format!(
                "kernel of size {size} needs {taps} weights, got {}",
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite()) || !divisor.is_finite() || !bias.is_finite() {
            return Err(EpicurusError::invalid_parameter(
                "kernel weights, divisor and bias must be finite",
            ));
        }
        if divisor == 0.0 {
            return Err(EpicurusError::division_by_zero("kernel divisor is 0"));
        }
        Ok(Self {
            size,
            weights,
            divisor,
            bias,
        })
    }

    /// Build a kernel from integer weights.
    pub fn from_ints(
        size: usize,
        weights: &[i32],
        divisor: i32,
        bias: i32,
    ) -> EpicurusResult<Self> {
        Self::new(
            size,
            weights.iter().map(|&w| w as f32).collect(),
            divisor as f32,
            bias as f32,
        )
    }

    /// A kernel that copies its input.
    pub fn identity(size: usize) -> EpicurusResult<Self> {
        let taps = tap_count(size)?;
        let mut weights = vec![0.0; taps];
        if let Some(center) = weights.get_mut(taps / 2) {
            *center = 1.0;
        }
        Self::new(size, weights, 1.0, 0.0)
    }

    /// Laplacian-style 3x3 edge detector.
    pub fn edge_detect() -> Self {
        Self {
            size: 3,
            weights: vec![-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
            divisor: 1.0,
            bias: 0.0,
        }
    }

    /// Normalized 2D Gaussian of side `2 * radius + 1`.
    ///
    /// This is the direct form; [`crate::gaussian_blur`] applies the same falloff as two 1D
    /// passes.
    pub fn gaussian(radius: u32) -> EpicurusResult<Self> {
        if radius == 0 {
            return Self::identity(1);
        }
        let r = i64::from(radius);
        let side = usize::try_from(2 * r + 1).map_err(|_| {
            EpicurusError::invalid_parameter(format!("gaussian radius {radius} is too large"))
        })?;
        let sigma = f64::from(gaussian_sigma(radius));
        let denom = 2.0 * sigma * sigma;
        let mut weights = Vec::with_capacity(tap_count(side)?);
        for y in -r..=r {
            for x in -r..=r {
                let d2 = (x * x + y * y) as f64;
                weights.push((-d2 / denom).exp());
            }
        }
        let sum: f64 = weights.iter().sum();
        if sum <= 0.0 {
            return Err(EpicurusError::invalid_parameter("gaussian kernel sum is zero"));
        }
        let weights = weights.into_iter().map(|w| (w / sum) as f32).collect();
        Self::new(side, weights, 1.0, 0.0)
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Divisor applied to the weighted sum.
    pub fn divisor(&self) -> f32 {
        self.divisor
    }

    /// Offset added after division.
    pub fn bias(&self) -> f32 {
        self.bias
    }
}

/// Convolve the RGB channels of `buf` with `kernel`; alpha is copied through.
///
/// Neighbours outside the buffer take the value of the nearest edge pixel.
pub fn convolve(buf: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let (w, h) = (buf.width() as i64, buf.height() as i64);
    let radius = (kernel.size / 2) as i64;
    let src = buf.as_bytes();
    let row = buf.row_bytes();

    let mut out = vec![0u8; src.len()];
    out.par_chunks_mut(row).enumerate().for_each(|(y, dst_row)| {
        let y = y as i64;
        for x in 0..w {
            let mut acc = [0f32; COLOR_CHANNELS];
            for ky in 0..kernel.size {
                let sy = (y + ky as i64 - radius).clamp(0, h - 1);
                let weights = &kernel.weights[ky * kernel.size..(ky + 1) * kernel.size];
                for (kx, &kw) in weights.iter().enumerate() {
                    if kw == 0.0 {
                        continue;
                    }
                    let sx = (x + kx as i64 - radius).clamp(0, w - 1);
                    let idx = ((sy * w + sx) as usize) * 4;
                    for c in 0..COLOR_CHANNELS {
                        acc[c] += kw * f32::from(src[idx + c]);
                    }
                }
            }
            let o = (x as usize) * 4;
            for c in 0..COLOR_CHANNELS {
                dst_row[o + c] = clamp_round_u8(acc[c] / kernel.divisor + kernel.bias);
            }
            dst_row[o + 3] = src[(y as usize) * row + o + 3];
        }
    });
    buf.with_data(out)
}

/// Edge detection: force alpha opaque, then convolve with [`Kernel::edge_detect`].
pub fn edge_detect(buf: &PixelBuffer) -> PixelBuffer {
    let mut opaque = buf.as_bytes().to_vec();
    for px in opaque.chunks_exact_mut(4) {
        px[3] = 255;
    }
    convolve(&buf.with_data(opaque), &Kernel::edge_detect())
}

/// Number of weights in a `side x side` kernel, if such a kernel can be allocated.
fn tap_count(side: usize) -> EpicurusResult<usize> {
    side.checked_mul(side)
        .filter(|taps| {
            taps.checked_mul(size_of::<f64>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| EpicurusError::invalid_parameter(format!("kernel side {side} is too large")))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/convolve.rs"]
mod tests;
