use super::atom::Atom;
use super::coords::{CoordBuffer, CoordError};
use super::selection::{IndexedSelection, SelectionError, SelectionMap};
use super::typing::{AtomTypeLibrary, TypingError};
use crate::core::source::features::{FeatureConfig, FeatureInfo, FeatureRow};
use crate::core::source::traits::{MoleculeSource, SourceError};
use crate::core::utils::geometry::{self, OVERLAP_TOLERANCE};
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Represents errors raised while constructing or querying a molecule.
#[derive(Debug, Error)]
pub enum MoleculeError {
    /// A molecule was built from an empty atom sequence.
    #[error("molecule requires at least one atom")]
    EmptyAtoms,
    /// A conversion was requested from a source with no conformations.
    #[error("source '{kind}' has no stored conformations")]
    NoConformations {
        /// The representation kind of the offending source.
        kind: String,
    },
    /// Feature discovery was requested on a molecule that keeps no
    /// external representation.
    #[error("molecule holds no external representation to run feature discovery against")]
    NoExternalRepresentation,
    /// A coordinate handle could not be built.
    #[error("coordinate error: {source}")]
    Coord {
        /// The underlying coordinate error.
        #[from]
        source: CoordError,
    },
    /// A bond, angle, or feature selection could not be built.
    #[error("selection error: {source}")]
    Selection {
        /// The underlying selection error.
        #[from]
        source: SelectionError,
    },
    /// Atom type registration failed.
    #[error("atom typing error: {source}")]
    Typing {
        /// The underlying typing error.
        #[from]
        source: TypingError,
    },
    /// The external representation reported a failure.
    #[error("external source error: {source}")]
    Source {
        /// The underlying source error.
        #[from]
        source: SourceError,
    },
}

/// The aggregate molecular structure: atoms, their groupings, and typing.
///
/// Atoms, bonds, and angles are fixed at construction. Bonds and angles
/// are [`IndexedSelection`]s over the shared atom list (two and three
/// indices respectively). Feature state starts empty and is populated by
/// [`Molecule::find_features`], which may be re-invoked at any time; each
/// invocation replaces the previous feature state wholesale.
///
/// A molecule converted from an external representation keeps a handle to
/// that representation so discovery can be re-issued without rebuilding,
/// and its atoms alias one shared coordinate buffer: a positional write
/// through any alias of a slot is observed by every view of that slot.
#[derive(Debug, Clone)]
pub struct Molecule {
    atoms: Rc<Vec<Atom>>,
    bonds: Vec<IndexedSelection<Atom>>,
    angles: Vec<IndexedSelection<Atom>>,
    molecule_type: Option<String>,
    atom_types: AtomTypeLibrary,
    external_reps: HashMap<String, Rc<dyn MoleculeSource>>,
    source_kind: Option<String>,
    features: BTreeMap<usize, FeatureInfo>,
    family_selections: SelectionMap<IndexedSelection<Atom>>,
    type_selections: SelectionMap<IndexedSelection<Atom>>,
}

impl Molecule {
    /// Builds a molecule from an explicit atom list.
    ///
    /// Bond and angle members are given as index tuples into `atoms` and
    /// are materialized as selections over the shared atom list.
    /// Construction is atomic: on any failure no aggregate state exists.
    ///
    /// # Arguments
    ///
    /// * `atoms` - The atom list; must be non-empty.
    /// * `bond_indices` - One `[i, j]` pair per bond.
    /// * `angle_indices` - One `[i, j, k]` triple per angle.
    /// * `molecule_type` - Optional molecule-type tag.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::EmptyAtoms`] for an empty atom list and
    /// [`MoleculeError::Selection`] for an out-of-range bond or angle
    /// index.
    pub fn from_atoms(
        atoms: Vec<Atom>,
        bond_indices: &[[usize; 2]],
        angle_indices: &[[usize; 3]],
        molecule_type: Option<String>,
    ) -> Result<Self, MoleculeError> {
        if atoms.is_empty() {
            return Err(MoleculeError::EmptyAtoms);
        }

        let atoms = Rc::new(atoms);
        let bonds = bond_indices
            .iter()
            .map(|pair| IndexedSelection::new(Rc::clone(&atoms), pair.to_vec()))
            .collect::<Result<Vec<_>, _>>()?;
        let angles = angle_indices
            .iter()
            .map(|triple| IndexedSelection::new(Rc::clone(&atoms), triple.to_vec()))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            num_atoms = atoms.len(),
            num_bonds = bonds.len(),
            num_angles = angles.len(),
            "Assembled molecule from explicit atoms."
        );

        Ok(Self {
            atoms,
            bonds,
            angles,
            molecule_type,
            atom_types: AtomTypeLibrary::new(),
            external_reps: HashMap::new(),
            source_kind: None,
            features: BTreeMap::new(),
            family_selections: SelectionMap::new(),
            type_selections: SelectionMap::new(),
        })
    }

    /// Materializes a molecule from an external representation at one
    /// conformation.
    ///
    /// One shared coordinate buffer is filled with the conformation's
    /// positions; every atom aliases its slot in that buffer. Atom types
    /// are extracted per atom and registered under their source labels,
    /// disambiguated with numeric suffixes where a repeated label carries
    /// genuinely new attributes. Bonds follow the source's bond graph;
    /// angles are not derived in this path and stay empty. The source
    /// handle is retained so feature discovery can be re-issued later.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::NoConformations`] if the source stores no
    /// conformations, and propagates source, typing, and selection
    /// failures.
    #[instrument(skip_all, fields(kind = source.kind(), conformation))]
    pub fn from_source(
        source: Rc<dyn MoleculeSource>,
        conformation: usize,
        molecule_type: Option<String>,
    ) -> Result<Self, MoleculeError> {
        if source.conformation_count() == 0 {
            return Err(MoleculeError::NoConformations {
                kind: source.kind().to_string(),
            });
        }

        let atom_count = source.atom_count();

        let mut buffer = CoordBuffer::new();
        for atom_index in 0..atom_count {
            buffer.push(source.atom_position(conformation, atom_index)?);
        }
        let shared = buffer.into_shared();

        let mut atom_types = AtomTypeLibrary::new();
        let mut seen_labels = HashMap::new();
        let mut atoms = Vec::with_capacity(atom_count);
        for atom_index in 0..atom_count {
            let attributes = source.atom_attributes(atom_index)?;
            let atom_type = attributes.to_atom_type();
            atom_types.register_disambiguated(
                &attributes.pdb_name,
                atom_type.clone(),
                &mut seen_labels,
            )?;
            atoms.push(Atom::aliased(Rc::clone(&shared), atom_index)?.with_type(atom_type));
        }

        let atoms = Rc::new(atoms);
        let bonds = source
            .bond_pairs()
            .into_iter()
            .map(|(first, second)| IndexedSelection::new(Rc::clone(&atoms), vec![first, second]))
            .collect::<Result<Vec<_>, _>>()?;

        let kind = source.kind().to_string();
        let mut external_reps = HashMap::new();
        external_reps.insert(kind.clone(), source);

        info!(
            num_atoms = atom_count,
            num_bonds = bonds.len(),
            "Converted external representation to molecule."
        );

        Ok(Self {
            atoms,
            bonds,
            // Angle topology is not derivable from the bond list alone.
            angles: Vec::new(),
            molecule_type,
            atom_types,
            external_reps,
            source_kind: Some(kind),
            features: BTreeMap::new(),
            family_selections: SelectionMap::new(),
            type_selections: SelectionMap::new(),
        })
    }

    /// Returns the atom list in construction order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Returns one atom by index.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Returns the number of atoms.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Returns the bond selections (two atoms each).
    pub fn bonds(&self) -> &[IndexedSelection<Atom>] {
        &self.bonds
    }

    /// Returns the angle selections (three atoms each).
    ///
    /// Empty for molecules converted from an external representation.
    pub fn angles(&self) -> &[IndexedSelection<Atom>] {
        &self.angles
    }

    /// Returns the molecule-type tag, if any.
    pub fn molecule_type(&self) -> Option<&str> {
        self.molecule_type.as_deref()
    }

    /// Returns the atom type registry.
    pub fn atom_types(&self) -> &AtomTypeLibrary {
        &self.atom_types
    }

    /// Looks up a retained external representation by kind.
    pub fn external_representation(&self, kind: &str) -> Option<&Rc<dyn MoleculeSource>> {
        self.external_reps.get(kind)
    }

    /// Builds an ad-hoc selection of this molecule's atoms.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::IndexOutOfBounds`] for any index past the
    /// atom list.
    pub fn select(&self, indices: Vec<usize>) -> Result<IndexedSelection<Atom>, SelectionError> {
        IndexedSelection::new(Rc::clone(&self.atoms), indices)
    }

    /// Finds the first pair of coincident atoms between two molecules.
    ///
    /// Pairs are enumerated over the Cartesian product with this
    /// molecule's atoms in the outer position, and a pair matches iff all
    /// three coordinate components agree within [`OVERLAP_TOLERANCE`].
    /// Atoms with non-finite (unplaced) coordinates never match. The scan
    /// is a plain O(n·m) sweep with no spatial indexing.
    ///
    /// Returns `(self_index, other_index)` of the first overlapping pair,
    /// or `None` when there is no overlap or either molecule has no atoms.
    pub fn overlaps(&self, other: &Molecule) -> Option<(usize, usize)> {
        (0..self.atoms.len())
            .cartesian_product(0..other.atoms.len())
            .find(|&(self_index, other_index)| {
                geometry::points_coincide(
                    &self.atoms[self_index].coords(),
                    &other.atoms[other_index].coords(),
                    OVERLAP_TOLERANCE,
                )
            })
    }

    /// Runs feature discovery through the retained external representation
    /// and rebuilds the feature groupings.
    ///
    /// The discovered feature table replaces any previous one, and the
    /// family and type groupings are rebuilt from scratch, so re-invoking
    /// discovery is idempotent rather than additive. Each grouping maps a
    /// family (or type) name to a selection over this molecule's atoms
    /// whose indices are the contributing atom indices of that group's
    /// features, concatenated in feature-id order.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::NoExternalRepresentation`] when the
    /// molecule was not built from an external source, and propagates
    /// discovery and selection failures. On failure the previous feature
    /// state is left untouched.
    #[instrument(skip_all)]
    pub fn find_features(&mut self, config: &FeatureConfig) -> Result<(), MoleculeError> {
        let source = self
            .source_kind
            .as_ref()
            .and_then(|kind| self.external_reps.get(kind))
            .cloned()
            .ok_or(MoleculeError::NoExternalRepresentation)?;

        let features = source.discover_features(config)?;

        let mut family_ids: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut type_ids: IndexMap<String, Vec<usize>> = IndexMap::new();
        for feature in features.values() {
            family_ids
                .entry(feature.family.clone())
                .or_default()
                .extend(feature.atom_ids.iter().copied());
            type_ids
                .entry(feature.feature_type.clone())
                .or_default()
                .extend(feature.atom_ids.iter().copied());
        }

        let mut family_selections = SelectionMap::new();
        for (family, atom_ids) in family_ids {
            let selection = IndexedSelection::new(Rc::clone(&self.atoms), atom_ids)?;
            family_selections.insert(family, selection);
        }
        let mut type_selections = SelectionMap::new();
        for (feature_type, atom_ids) in type_ids {
            let selection = IndexedSelection::new(Rc::clone(&self.atoms), atom_ids)?;
            type_selections.insert(feature_type, selection);
        }

        info!(
            num_features = features.len(),
            num_families = family_selections.len(),
            num_types = type_selections.len(),
            "Feature discovery complete."
        );

        self.features = features;
        self.family_selections = family_selections;
        self.type_selections = type_selections;
        Ok(())
    }

    /// Returns the discovered feature table (empty before discovery).
    pub fn features(&self) -> &BTreeMap<usize, FeatureInfo> {
        &self.features
    }

    /// Iterates over the discovered feature family names.
    pub fn feature_families(&self) -> impl Iterator<Item = &str> {
        self.family_selections.keys()
    }

    /// Iterates over the discovered feature type names.
    pub fn feature_types(&self) -> impl Iterator<Item = &str> {
        self.type_selections.keys()
    }

    /// Returns the per-family atom selections.
    pub fn family_selections(&self) -> &SelectionMap<IndexedSelection<Atom>> {
        &self.family_selections
    }

    /// Returns the per-type atom selections.
    pub fn type_selections(&self) -> &SelectionMap<IndexedSelection<Atom>> {
        &self.type_selections
    }

    /// Flattens the feature table into serializable rows, in id order.
    pub fn feature_rows(&self) -> Vec<FeatureRow> {
        self.features
            .iter()
            .map(|(&id, info)| FeatureRow::new(id, info))
            .collect()
    }
}
