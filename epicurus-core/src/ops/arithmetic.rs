//! Direction-saturating RGB arithmetic.
//!
//! Every operation computes the raw per-channel result in `u64`, truncates it to 8 bits and then
//! checks it against the untouched source channel. An increasing op (`Add`, `Mul`) whose result
//! landed below the source saturates to 255; a decreasing op (`Sub`, `Div`) whose result landed
//! above the source saturates to 0. Anything else keeps the truncated value. Alpha is copied from
//! the left-hand buffer.

use rayon::prelude::*;

use crate::foundation::core::COLOR_CHANNELS;
use crate::foundation::error::{EpicurusError, EpicurusResult};
use crate::pixel::buffer::PixelBuffer;

/// Channel operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    /// `a + b`, saturating high on wrap.
    Add,
    /// `a - b`, saturating low on wrap.
    Sub,
    /// `a * b`, saturating high whenever the result drops below `a`.
    Mul,
    /// `a / b` (truncating), saturating low if the result ever exceeds `a`.
    Div,
}

impl ArithOp {
    /// Apply the operator to one channel.
    ///
    /// `Div` with `rhs == 0` is rejected by the buffer-level entry points before reaching here.
    pub fn apply(self, lhs: u8, rhs: u64) -> u8 {
        let a = u64::from(lhs);
        let raw = match self {
            Self::Add => a.wrapping_add(rhs),
            Self::Sub => a.wrapping_sub(rhs),
            Self::Mul => a.wrapping_mul(rhs),
            Self::Div => a.checked_div(rhs).unwrap_or(0),
        };
        let truncated = raw as u8;
        match self {
            Self::Add | Self::Mul if truncated < lhs => 255,
            Self::Sub | Self::Div if truncated > lhs => 0,
            _ => truncated,
        }
    }

    /// Short lowercase name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }
}

/// Apply `op` with a constant right-hand side to every RGB channel.
pub fn apply_scalar(buf: &PixelBuffer, op: ArithOp, scalar: u32) -> EpicurusResult<PixelBuffer> {
    if op == ArithOp::Div && scalar == 0 {
        return Err(EpicurusError::division_by_zero("div_scalar divisor is 0"));
    }
    Ok(map_rgb(buf, op, u64::from(scalar)))
}

/// `buf + scalar` per RGB channel.
pub fn add_scalar(buf: &PixelBuffer, scalar: u32) -> PixelBuffer {
    map_rgb(buf, ArithOp::Add, u64::from(scalar))
}

/// `buf - scalar` per RGB channel.
pub fn sub_scalar(buf: &PixelBuffer, scalar: u32) -> PixelBuffer {
    map_rgb(buf, ArithOp::Sub, u64::from(scalar))
}

/// `buf * scalar` per RGB channel.
pub fn mul_scalar(buf: &PixelBuffer, scalar: u32) -> PixelBuffer {
    map_rgb(buf, ArithOp::Mul, u64::from(scalar))
}

/// `buf / scalar` per RGB channel; fails with `DivisionByZero` for a zero divisor.
pub fn div_scalar(buf: &PixelBuffer, scalar: u32) -> EpicurusResult<PixelBuffer> {
    apply_scalar(buf, ArithOp::Div, scalar)
}

/// Element-wise `lhs + rhs` over RGB.
pub fn add_buffers(lhs: &PixelBuffer, rhs: &PixelBuffer) -> EpicurusResult<PixelBuffer> {
    combine(lhs, rhs, ArithOp::Add)
}

/// Element-wise `lhs * rhs` over RGB.
pub fn mul_buffers(lhs: &PixelBuffer, rhs: &PixelBuffer) -> EpicurusResult<PixelBuffer> {
    combine(lhs, rhs, ArithOp::Mul)
}

fn map_rgb(buf: &PixelBuffer, op: ArithOp, rhs: u64) -> PixelBuffer {
    let mut out = buf.as_bytes().to_vec();
    out.par_chunks_mut(buf.row_bytes()).for_each(|dst_row| {
        for px in dst_row.chunks_exact_mut(4) {
            for c in &mut px[..COLOR_CHANNELS] {
                *c = op.apply(*c, rhs);
            }
        }
    });
    buf.with_data(out)
}

fn combine(lhs: &PixelBuffer, rhs: &PixelBuffer, op: ArithOp) -> EpicurusResult<PixelBuffer> {
    lhs.ensure_same_dimensions(rhs, op.name())?;
    let row = lhs.row_bytes();
    let mut out = lhs.as_bytes().to_vec();
    out.par_chunks_mut(row)
        .zip(rhs.as_bytes().par_chunks(row))
        .for_each(|(dst_row, rhs_row)| {
            for (d, r) in dst_row.chunks_exact_mut(4).zip(rhs_row.chunks_exact(4)) {
                for c in 0..COLOR_CHANNELS {
                    d[c] = op.apply(d[c], u64::from(r[c]));
                }
            }
        });
    Ok(lhs.with_data(out))
}

#[cfg(test)]
#[path = "../../tests/unit/ops/arithmetic.rs"]
mod tests;
