use rayon::prelude::*;

use crate::foundation::core::COLOR_CHANNELS;
use crate::foundation::math::q16_to_u8;
use crate::pixel::buffer::PixelBuffer;

/// Blur radius used when a caller does not give one.
pub const DEFAULT_BLUR_RADIUS: u32 = 10;

/// Standard deviation used for a blur of `radius` (radius covers three sigmas).
pub fn gaussian_sigma(radius: u32) -> f32 {
    (radius as f32 / 3.0).max(0.5)
}

/// Separable Gaussian blur of the RGB channels; alpha is copied through.
///
/// Runs a horizontal then a vertical 1D pass with a Q16 kernel and edge replication. The
/// intermediate stays in fixed point, so the result is within one unit of
/// `convolve(buf, &Kernel::gaussian(radius))`.
pub fn gaussian_blur(buf: &PixelBuffer, radius: u32) -> PixelBuffer {
    if radius == 0 {
        return buf.clone();
    }
    let kernel = gaussian_kernel_q16(radius);
    let tmp = horizontal_pass(buf, &kernel);
    let out = vertical_pass(buf, &tmp, &kernel);
    buf.with_data(out)
}

fn gaussian_kernel_q16(radius: u32) -> Vec<u32> {
    let r = radius as i64;
    let sigma = f64::from(gaussian_sigma(radius));
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push the rounding residue into the centre tap so the taps sum to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    weights
}

/// Horizontal pass into Q16 accumulators, `COLOR_CHANNELS` per pixel.
fn horizontal_pass(buf: &PixelBuffer, k: &[u32]) -> Vec<u32> {
    let radius = (k.len() / 2) as i64;
    let w = buf.width() as i64;
    let src = buf.as_bytes();
    let row = buf.row_bytes();

    let mut tmp = vec![0u32; buf.pixel_count() * COLOR_CHANNELS];
    tmp.par_chunks_mut(w as usize * COLOR_CHANNELS)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let src_row = &src[y * row..(y + 1) * row];
            for x in 0..w {
                let mut acc = [0u32; COLOR_CHANNELS];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i64 - radius).clamp(0, w - 1) as usize;
                    for c in 0..COLOR_CHANNELS {
                        acc[c] += kw * u32::from(src_row[sx * 4 + c]);
                    }
                }
                let o = x as usize * COLOR_CHANNELS;
                dst_row[o..o + COLOR_CHANNELS].copy_from_slice(&acc);
            }
        });
    tmp
}

fn vertical_pass(buf: &PixelBuffer, tmp: &[u32], k: &[u32]) -> Vec<u8> {
    let radius = (k.len() / 2) as i64;
    let (w, h) = (buf.width() as usize, buf.height() as i64);
    let src = buf.as_bytes();
    let row = buf.row_bytes();
    let tmp_row = w * COLOR_CHANNELS;

    let mut out = vec![0u8; src.len()];
    out.par_chunks_mut(row).enumerate().for_each(|(y, dst_row)| {
        for x in 0..w {
            let mut acc = [0u64; COLOR_CHANNELS];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y as i64 + ki as i64 - radius).clamp(0, h - 1) as usize;
                let idx = sy * tmp_row + x * COLOR_CHANNELS;
                for c in 0..COLOR_CHANNELS {
                    acc[c] += u64::from(kw) * u64::from(tmp[idx + c]);
                }
            }
            let o = x * 4;
            for c in 0..COLOR_CHANNELS {
                // Two Q16 passes: shift one factor out, then round the second.
                dst_row[o + c] = q16_to_u8(acc[c] >> 16);
            }
            dst_row[o + 3] = src[y * row + o + 3];
        }
    });
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
