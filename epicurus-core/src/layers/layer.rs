use crate::foundation::core::Position;
use crate::foundation::error::{EpicurusError, EpicurusResult};
use crate::foundation::math::unit_interval;
use crate::pixel::buffer::PixelBuffer;

/// A named, positioned, alpha-weighted image buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    name: String,
    buffer: PixelBuffer,
    position: Position,
    alpha: f32,
}

impl Layer {
    /// Wrap `buffer` as an opaque layer at the origin.
    pub fn new(name: impl Into<String>, buffer: PixelBuffer) -> EpicurusResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(EpicurusError::invalid_parameter("layer name must be non-empty"));
        }
        Ok(Self {
            name,
            buffer,
            position: Position::ORIGIN,
            alpha: 1.0,
        })
    }

    /// Builder form of [`Layer::set_alpha`].
    pub fn with_alpha(mut self, alpha: f32) -> EpicurusResult<Self> {
        self.set_alpha(alpha)?;
        Ok(self)
    }

    /// Builder form of [`Layer::set_position`].
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Case-sensitive identity within a store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pixels owned by this layer.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Placement offset.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Contribution when merged onto the layers beneath it.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Set the merge coefficient; must be finite and within `[0, 1]`.
    pub fn set_alpha(&mut self, alpha: f32) -> EpicurusResult<()> {
        self.alpha = unit_interval("layer alpha", alpha)?;
        Ok(())
    }

    /// Move the layer.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Swap in a new buffer, returning the old one. Name, position and alpha are kept.
    pub fn replace_buffer(&mut self, buffer: PixelBuffer) -> PixelBuffer {
        std::mem::replace(&mut self.buffer, buffer)
    }

    /// Snapshot for listings.
    pub fn info(&self) -> LayerInfo {
        LayerInfo {
            name: self.name.clone(),
            width: self.buffer.width(),
            height: self.buffer.height(),
            position: self.position,
            alpha: self.alpha,
        }
    }
}

/// Read-only summary of a layer, as produced by [`crate::LayerStore::list`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerInfo {
    /// Layer name.
    pub name: String,
    /// Buffer width in pixels.
    pub width: u32,
    /// Buffer height in pixels.
    pub height: u32,
    /// Placement offset.
    pub position: Position,
    /// Merge coefficient.
    pub alpha: f32,
}

#[cfg(test)]
#[path = "../../tests/unit/layers/layer.rs"]
mod tests;
