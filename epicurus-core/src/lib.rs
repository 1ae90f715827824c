//! Epicurus is the engine behind a REPL-driven raster image editor.
//!
//! It keeps an ordered stack of named RGBA8 layers and implements the pixel work the editor's
//! commands need directly over raw buffers:
//!
//! - **Arithmetic**: per-channel add/sub/mul/div against a scalar or another layer, with
//!   direction-based saturation (see [`ArithOp`]).
//! - **Compositing**: fixed-point alpha [`blend`] and stack [`merge_down`].
//! - **Convolution**: square [`Kernel`]s with edge replication, a separable [`gaussian_blur`] and
//!   [`edge_detect`].
//!
//! Decoding, encoding and resampling are delegated to the `image` crate.
//!
//! Most callers drive an [`Editor`], which owns a [`LayerStore`], resolves layers by name and
//! commits each result only once it has been fully computed.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod layers;
mod ops;
mod pixel;
mod session;

pub use assets::codec::{decode_image, load_image, save_image};
pub use effects::blur::{DEFAULT_BLUR_RADIUS, gaussian_blur, gaussian_sigma};
pub use effects::composite::{blend, merge_down};
pub use effects::convolve::{Kernel, convolve, edge_detect};
pub use foundation::core::{Position, Rgba8};
pub use foundation::error::{EpicurusError, EpicurusResult};
pub use layers::layer::{Layer, LayerInfo};
pub use layers::store::LayerStore;
pub use ops::arithmetic::{
    ArithOp, add_buffers, add_scalar, apply_scalar, div_scalar, mul_buffers, mul_scalar,
    sub_scalar,
};
pub use ops::resize::thumbnail;
pub use pixel::buffer::PixelBuffer;
pub use session::editor::{Editor, MAX_BLUR_RADIUS};
pub use session::opts::EditorOpts;
