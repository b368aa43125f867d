use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the standard base feature-definition set.
pub const DEFAULT_FEATURE_DEFINITIONS: &str = "BaseFeatures.fdef";

/// A chemically meaningful substructure discovered by pattern matching.
///
/// Features are produced by an external engine's feature factory; the
/// `atom_ids` index into the molecule's atom list in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureInfo {
    /// Feature family (e.g. `"Hydrophobe"`, `"Aromatic"`).
    pub family: String,
    /// Feature type within the family (e.g. `"Arom6"`).
    pub feature_type: String,
    /// Indices of the contributing atoms.
    pub atom_ids: Vec<usize>,
    /// Representative position of the feature.
    pub position: Point3<f64>,
}

/// A flat, serializable row of the feature table.
///
/// Tabular conversion itself is left to external collaborators; this row
/// is the id-to-attributes mapping they consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    /// Feature id assigned by the discovery call.
    pub id: usize,
    /// Feature family.
    pub family: String,
    /// Feature type within the family.
    pub feature_type: String,
    /// Indices of the contributing atoms.
    pub atom_ids: Vec<usize>,
    /// Representative position as `[x, y, z]`.
    pub position: [f64; 3],
}

impl FeatureRow {
    /// Flattens a discovered feature into a table row.
    pub fn new(id: usize, info: &FeatureInfo) -> Self {
        Self {
            id,
            family: info.family.clone(),
            feature_type: info.feature_type.clone(),
            atom_ids: info.atom_ids.clone(),
            position: [info.position.x, info.position.y, info.position.z],
        }
    }
}

/// Configuration for a feature-discovery call.
///
/// The definition resource is always passed explicitly; there is no
/// ambient default lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureConfig {
    /// Location of the feature-definition resource.
    pub definitions_path: PathBuf,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            definitions_path: PathBuf::from(DEFAULT_FEATURE_DEFINITIONS),
        }
    }
}

impl FeatureConfig {
    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureConfigError::Io`] if the file cannot be read and
    /// [`FeatureConfigError::Toml`] if its content is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, FeatureConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| FeatureConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| FeatureConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

/// Represents errors raised while loading a [`FeatureConfig`].
#[derive(Debug, Error)]
pub enum FeatureConfigError {
    /// The configuration file could not be read.
    #[error("File I/O error for '{path}': {source}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration file content is not valid TOML.
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        /// The path that could not be parsed.
        path: String,
        /// The underlying TOML error.
        source: toml::de::Error,
    },
}
