use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::effects::blur::DEFAULT_BLUR_RADIUS;
use crate::foundation::error::{EpicurusError, EpicurusResult};
use crate::session::editor::MAX_BLUR_RADIUS;

/// Options controlling an [`crate::Editor`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorOpts {
    /// Override the number of rayon worker threads for pixel loops. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Radius used by `blur` when no radius is given.
    pub default_blur_radius: u32,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            threads: None,
            default_blur_radius: DEFAULT_BLUR_RADIUS,
        }
    }
}

impl EditorOpts {
    /// Parse options from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> EpicurusResult<Self> {
        let opts: Self = serde_json::from_reader(r).map_err(|e| {
            EpicurusError::invalid_parameter(format!("parse editor options JSON: {e}"))
        })?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> EpicurusResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            EpicurusError::invalid_parameter(format!(
                "open editor options '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values no session can run with.
    pub fn validate(&self) -> EpicurusResult<()> {
        if self.threads == Some(0) {
            return Err(EpicurusError::invalid_parameter("threads must be >= 1"));
        }
        if self.default_blur_radius > MAX_BLUR_RADIUS {
            return Err(EpicurusError::invalid_parameter(format!(
                "default blur radius must be within 0..={MAX_BLUR_RADIUS}, got {}",
                self.default_blur_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
