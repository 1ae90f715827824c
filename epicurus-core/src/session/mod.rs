//! Editing session: owns the layer stack and exposes name-addressed operations.

pub(crate) mod editor;
pub(crate) mod opts;
