//! Compositing and convolution filters.

pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod convolve;
