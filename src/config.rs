//! Projection policy knobs.
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// How a nullable array property declared directly on an entity is typed.
///
/// Scalar entity properties always get `| null` when nullable. Array
/// properties on entities historically did not, which is what `Unwrapped`
/// reproduces. `Wrapped` applies the scalar rule to arrays as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EntityArrayNullability {
    #[default]
    Unwrapped,
    Wrapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
    pub entity_arrays: EntityArrayNullability,
}

impl ProjectionOptions {
    pub fn with_entity_arrays(mut self, policy: EntityArrayNullability) -> Self {
        self.entity_arrays = policy;
        self
    }

    /// Load options from a JSON file; absent keys keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        crate::path_de::from_slice_with_path(&bytes)
    }
}
