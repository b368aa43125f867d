use super::attributes::AtomAttributes;
use super::features::{FeatureConfig, FeatureInfo};
use nalgebra::Point3;
use std::collections::BTreeMap;
use std::fmt::Debug;
use thiserror::Error;

/// Represents errors raised by an external molecular representation.
#[derive(Debug, Error)]
pub enum SourceError {
    /// An atom index was out of range for the source.
    #[error("atom index {index} is out of range for a source with {count} atoms")]
    AtomIndex {
        /// The offending index.
        index: usize,
        /// The number of atoms the source holds.
        count: usize,
    },
    /// A conformation index was out of range for the source.
    #[error("conformation index {index} is out of range ({count} stored)")]
    ConformationIndex {
        /// The offending index.
        index: usize,
        /// The number of stored conformations.
        count: usize,
    },
    /// Feature discovery failed inside the external engine.
    #[error("feature discovery failed: {0}")]
    Discovery(String),
}

/// Defines the capability set an external chemistry engine must expose.
///
/// Implementors wrap an externally-owned molecular representation
/// (structure, bond graph, conformations, feature factory) and keep owning
/// it for as long as any molecule built from it is alive, so expensive
/// queries such as feature discovery can be re-issued without rebuilding
/// the molecule.
pub trait MoleculeSource: Debug {
    /// Identifies the representation kind (e.g. the engine name). Used as
    /// the key in a molecule's external-representation table.
    fn kind(&self) -> &'static str;

    /// Returns the number of atoms in the representation.
    fn atom_count(&self) -> usize;

    /// Returns the bond graph as pairs of atom indices.
    fn bond_pairs(&self) -> Vec<(usize, usize)>;

    /// Extracts the full attribute record for one atom.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::AtomIndex`] if `atom_index` is out of range.
    fn atom_attributes(&self, atom_index: usize) -> Result<AtomAttributes, SourceError>;

    /// Returns the number of stored conformations.
    fn conformation_count(&self) -> usize;

    /// Returns one atom's position within one conformation.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::ConformationIndex`] or
    /// [`SourceError::AtomIndex`] if either index is out of range.
    fn atom_position(
        &self,
        conformation: usize,
        atom_index: usize,
    ) -> Result<Point3<f64>, SourceError>;

    /// Runs feature discovery against the definition resource named by
    /// `config`, returning feature id → feature info.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Discovery`] if the engine's feature factory
    /// fails.
    fn discover_features(
        &self,
        config: &FeatureConfig,
    ) -> Result<BTreeMap<usize, FeatureInfo>, SourceError>;
}
