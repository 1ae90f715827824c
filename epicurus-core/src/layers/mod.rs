//! Named layers and the ordered layer stack.

pub(crate) mod layer;
pub(crate) mod store;
