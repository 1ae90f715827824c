//! Per-channel pixel arithmetic and resampling.

pub(crate) mod arithmetic;
pub(crate) mod resize;
