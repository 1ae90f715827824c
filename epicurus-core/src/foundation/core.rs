/// One straight-alpha RGBA8 sample, channels in `R, G, B, A` order.
pub type Rgba8 = [u8; 4];

/// Number of colour channels touched by arithmetic and filters (alpha is carried separately).
pub(crate) const COLOR_CHANNELS: usize = 3;

/// Integer placement offset of a layer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Position {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl Position {
    /// The default placement.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Build a position from its components.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
