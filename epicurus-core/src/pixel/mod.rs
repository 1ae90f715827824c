//! Owned RGBA8 pixel storage.

pub(crate) mod buffer;
