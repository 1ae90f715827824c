//! Image decode/encode boundary, delegated to the `image` crate.

pub(crate) mod codec;
