use crate::effects::composite::merge_down;
use crate::foundation::error::{EpicurusError, EpicurusResult};
use crate::layers::layer::{Layer, LayerInfo};
use crate::pixel::buffer::PixelBuffer;

/// Ordered stack of uniquely named layers.
///
/// Insertion order is preserved. Index 0 is the bottom of the stack and the base of
/// [`LayerStore::flatten`].
#[derive(Clone, Debug, Default)]
pub struct LayerStore {
    layers: Vec<Layer>,
}

impl LayerStore {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// All layers, bottom first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Append `layer` on top of the stack.
    pub fn insert(&mut self, layer: Layer) -> EpicurusResult<&Layer> {
        if self.position(layer.name()).is_some() {
            return Err(EpicurusError::duplicate_name(format!(
                "layer '{}' already exists",
                layer.name()
            )));
        }
        self.layers.push(layer);
        let idx = self.layers.len() - 1;
        Ok(&self.layers[idx])
    }

    /// Look up a layer by name.
    pub fn find(&self, name: &str) -> EpicurusResult<&Layer> {
        let idx = self.index_of(name)?;
        Ok(&self.layers[idx])
    }

    /// Look up a layer by name for mutation.
    pub fn find_mut(&mut self, name: &str) -> EpicurusResult<&mut Layer> {
        let idx = self.index_of(name)?;
        Ok(&mut self.layers[idx])
    }

    /// Stack index of the named layer.
    pub fn index_of(&self, name: &str) -> EpicurusResult<usize> {
        self.position(name)
            .ok_or_else(|| EpicurusError::not_found(format!("no layer named '{name}'")))
    }

    /// Remove and return the named layer. Remaining layers keep their relative order.
    pub fn remove(&mut self, name: &str) -> EpicurusResult<Layer> {
        let idx = self.index_of(name)?;
        Ok(self.layers.remove(idx))
    }

    /// Swap the named layer's buffer, returning the previous one.
    pub fn replace_buffer(
        &mut self,
        name: &str,
        buffer: PixelBuffer,
    ) -> EpicurusResult<PixelBuffer> {
        Ok(self.find_mut(name)?.replace_buffer(buffer))
    }

    /// Snapshots of every layer in stack order.
    ///
    /// The iterator is lazy and borrows the store; call `list` again to restart.
    pub fn list(&self) -> impl Iterator<Item = LayerInfo> + '_ {
        self.layers.iter().map(Layer::info)
    }

    /// Merge every layer onto index 0 and drop the merged layers.
    ///
    /// Either the whole stack collapses into its base or nothing changes.
    pub fn flatten(&mut self) -> EpicurusResult<&Layer> {
        let merged = merge_down(&self.layers)?;
        self.layers.truncate(1);
        self.layers[0].replace_buffer(merged);
        Ok(&self.layers[0])
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name() == name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/store.rs"]
mod tests;
