use std::path::Path;

use crate::assets::codec::{load_image, save_image};
use crate::effects::blur::gaussian_blur;
use crate::effects::composite::blend;
use crate::effects::convolve::{Kernel, convolve, edge_detect};
use crate::foundation::core::Position;
use crate::foundation::error::{EpicurusError, EpicurusResult};
use crate::layers::layer::{Layer, LayerInfo};
use crate::layers::store::LayerStore;
use crate::ops::arithmetic::{ArithOp, add_buffers, apply_scalar, mul_buffers};
use crate::ops::resize::thumbnail;
use crate::pixel::buffer::PixelBuffer;
use crate::session::opts::EditorOpts;

/// Largest accepted blur radius.
pub const MAX_BLUR_RADIUS: u32 = 512;

/// An editing session over one [`LayerStore`].
///
/// Every operation either commits completely or leaves the store untouched: results are computed
/// from borrowed buffers on the session's thread pool and swapped into the target layer only
/// after the computation has succeeded.
#[derive(Debug)]
pub struct Editor {
    store: LayerStore,
    pool: rayon::ThreadPool,
    opts: EditorOpts,
}

impl Editor {
    /// Start an empty session.
    pub fn new(opts: EditorOpts) -> EpicurusResult<Self> {
        opts.validate()?;
        let pool = build_thread_pool(opts.threads)?;
        Ok(Self {
            store: LayerStore::new(),
            pool,
            opts,
        })
    }

    /// Options this session was created with.
    pub fn opts(&self) -> &EditorOpts {
        &self.opts
    }

    /// The layer stack.
    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    /// Look up a layer by name.
    pub fn layer(&self, name: &str) -> EpicurusResult<&Layer> {
        self.store.find(name)
    }

    /// Snapshots of every layer, bottom first.
    pub fn list(&self) -> impl Iterator<Item = LayerInfo> + '_ {
        self.store.list()
    }

    #[tracing::instrument(skip(self, buffer))]
    /// Add an already decoded buffer as a new top layer.
    pub fn load_layer(&mut self, buffer: PixelBuffer, name: &str) -> EpicurusResult<&Layer> {
        let layer = Layer::new(name, buffer)?;
        let layer = self.store.insert(layer)?;
        tracing::debug!(
            width = layer.buffer().width(),
            height = layer.buffer().height(),
            "layer loaded"
        );
        Ok(layer)
    }

    #[tracing::instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    /// Decode an image file and add it as a new top layer.
    pub fn load_layer_from_path(
        &mut self,
        path: impl AsRef<Path>,
        name: &str,
    ) -> EpicurusResult<&Layer> {
        if self.store.find(name).is_ok() {
            return Err(EpicurusError::duplicate_name(format!(
                "layer '{name}' already exists"
            )));
        }
        let buffer = load_image(path)?;
        self.load_layer(buffer, name)
    }

    /// Copy of a layer's pixels, for handing to an encoder.
    pub fn export_buffer(&self, name: &str) -> EpicurusResult<PixelBuffer> {
        Ok(self.store.find(name)?.buffer().clone())
    }

    #[tracing::instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    /// Encode a layer to an image file.
    pub fn export_to_path(&self, name: &str, path: impl AsRef<Path>) -> EpicurusResult<()> {
        save_image(self.store.find(name)?.buffer(), path)
    }

    #[tracing::instrument(skip(self))]
    /// Remove a layer from the stack and return it.
    pub fn delete_layer(&mut self, name: &str) -> EpicurusResult<Layer> {
        self.store.remove(name)
    }

    /// `layer + value` on RGB.
    pub fn add_scalar(&mut self, name: &str, value: i64) -> EpicurusResult<()> {
        self.scalar_op(name, ArithOp::Add, value)
    }

    /// `layer - value` on RGB.
    pub fn sub_scalar(&mut self, name: &str, value: i64) -> EpicurusResult<()> {
        self.scalar_op(name, ArithOp::Sub, value)
    }

    /// `layer * value` on RGB.
    pub fn mul_scalar(&mut self, name: &str, value: i64) -> EpicurusResult<()> {
        self.scalar_op(name, ArithOp::Mul, value)
    }

    /// `layer / value` on RGB.
    pub fn div_scalar(&mut self, name: &str, value: i64) -> EpicurusResult<()> {
        self.scalar_op(name, ArithOp::Div, value)
    }

    #[tracing::instrument(skip(self))]
    /// Apply a scalar operator; `value` must fit in `0..=u32::MAX`.
    pub fn scalar_op(&mut self, name: &str, op: ArithOp, value: i64) -> EpicurusResult<()> {
        let scalar = u32::try_from(value).map_err(|_| {
            EpicurusError::invalid_parameter(format!(
                "{} operand must be within 0..={}, got {value}",
                op.name(),
                u32::MAX
            ))
        })?;
        self.transform(name, |buf| apply_scalar(buf, op, scalar))
    }

    #[tracing::instrument(skip(self))]
    /// `target += operand` per RGB channel.
    pub fn add_layer(&mut self, target: &str, operand: &str) -> EpicurusResult<()> {
        let rhs = self.store.find(operand)?.buffer();
        let lhs = self.store.find(target)?.buffer();
        let out = self.pool.install(|| add_buffers(lhs, rhs))?;
        self.commit(target, out)
    }

    #[tracing::instrument(skip(self))]
    /// `target *= operand` per RGB channel.
    pub fn mul_layer(&mut self, target: &str, operand: &str) -> EpicurusResult<()> {
        let rhs = self.store.find(operand)?.buffer();
        let lhs = self.store.find(target)?.buffer();
        let out = self.pool.install(|| mul_buffers(lhs, rhs))?;
        self.commit(target, out)
    }

    #[tracing::instrument(skip(self))]
    /// Blend `top` onto `bottom` with `alpha`; the result replaces `bottom`'s buffer.
    pub fn blend_layers(&mut self, bottom: &str, top: &str, alpha: f32) -> EpicurusResult<()> {
        let over = self.store.find(top)?.buffer();
        let under = self.store.find(bottom)?.buffer();
        let out = self.pool.install(|| blend(under, over, alpha))?;
        self.commit(bottom, out)
    }

    #[tracing::instrument(skip(self))]
    /// Gaussian blur; `None` uses the session's default radius.
    pub fn blur(&mut self, name: &str, radius: Option<i64>) -> EpicurusResult<()> {
        let radius = match radius {
            None => self.opts.default_blur_radius,
            Some(r) => u32::try_from(r)
                .ok()
                .filter(|r| *r <= MAX_BLUR_RADIUS)
                .ok_or_else(|| {
                    EpicurusError::invalid_parameter(format!(
                        "blur radius must be within 0..={MAX_BLUR_RADIUS}, got {r}"
                    ))
                })?,
        };
        self.transform(name, |buf| Ok(gaussian_blur(buf, radius)))
    }

    #[tracing::instrument(skip(self))]
    /// Edge detection (alpha becomes opaque).
    pub fn detect_edges(&mut self, name: &str) -> EpicurusResult<()> {
        self.transform(name, |buf| Ok(edge_detect(buf)))
    }

    #[tracing::instrument(skip(self, kernel), fields(size = kernel.size()))]
    /// Convolve a layer with an arbitrary kernel.
    pub fn convolve_layer(&mut self, name: &str, kernel: &Kernel) -> EpicurusResult<()> {
        self.transform(name, |buf| Ok(convolve(buf, kernel)))
    }

    #[tracing::instrument(skip(self))]
    /// Shrink a layer to fit inside `max_width x max_height`, keeping its aspect ratio.
    pub fn resize(&mut self, name: &str, max_width: u32, max_height: u32) -> EpicurusResult<()> {
        self.transform(name, |buf| thumbnail(buf, max_width, max_height))
    }

    /// Set a layer's merge coefficient.
    pub fn set_alpha(&mut self, name: &str, alpha: f32) -> EpicurusResult<()> {
        self.store.find_mut(name)?.set_alpha(alpha)
    }

    /// Move a layer.
    pub fn set_position(&mut self, name: &str, x: i32, y: i32) -> EpicurusResult<()> {
        self.store.find_mut(name)?.set_position(Position::new(x, y));
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    /// Flatten the whole stack onto its bottom layer.
    pub fn merge_down(&mut self) -> EpicurusResult<&Layer> {
        let merged = self.pool.install(|| self.store.flatten())?;
        tracing::debug!(base = merged.name(), "stack flattened");
        Ok(merged)
    }

    fn transform<F>(&mut self, name: &str, f: F) -> EpicurusResult<()>
    where
        F: FnOnce(&PixelBuffer) -> EpicurusResult<PixelBuffer> + Send,
    {
        let src = self.store.find(name)?.buffer();
        let out = self.pool.install(|| f(src))?;
        self.commit(name, out)
    }

    fn commit(&mut self, name: &str, buffer: PixelBuffer) -> EpicurusResult<()> {
        let (w, h) = buffer.dimensions();
        self.store.replace_buffer(name, buffer)?;
        tracing::debug!(layer = name, width = w, height = h, "buffer committed");
        Ok(())
    }
}

fn build_thread_pool(threads: Option<usize>) -> EpicurusResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(EpicurusError::invalid_parameter(
            "editor 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        EpicurusError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
