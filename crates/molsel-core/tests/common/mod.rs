use molsel::core::source::attributes::{AtomAttributes, Hybridization};
use molsel::core::source::features::{FeatureConfig, FeatureInfo};
use molsel::core::source::traits::{MoleculeSource, SourceError};
use nalgebra::Point3;
use std::collections::BTreeMap;

/// A small in-memory chemistry engine standing in for a real binding.
///
/// Models an ethanol-like fragment (C-C-O) with two conformations and a
/// fixed feature-factory result, enough to drive conversion, aliasing, and
/// feature discovery end to end.
#[derive(Debug, Clone)]
pub struct FakeEngine {
    conformations: Vec<Vec<Point3<f64>>>,
    atoms: Vec<AtomAttributes>,
    bonds: Vec<(usize, usize)>,
    features: BTreeMap<usize, FeatureInfo>,
}

fn atom(element: &str, pdb_name: &str, atomic_number: u8, mass: f64) -> AtomAttributes {
    AtomAttributes {
        atomic_number,
        bond_degree: 1,
        total_bond_degree: 4,
        explicit_valence: 4,
        implicit_valence: 0,
        total_valence: 4,
        formal_charge: 0,
        hybridization: Hybridization::Sp3,
        is_aromatic: false,
        in_ring: false,
        isotope: 0,
        mass,
        num_radical_electrons: 0,
        element: element.to_string(),
        num_hydrogens: 0,
        pdb_name: pdb_name.to_string(),
        pdb_occupancy: 1.0,
        pdb_residue_name: "EOH".to_string(),
        pdb_temp_factor: 10.0,
    }
}

impl FakeEngine {
    pub fn ethanol_fragment() -> Self {
        let mut features = BTreeMap::new();
        features.insert(
            0,
            FeatureInfo {
                family: "Hydrophobe".to_string(),
                feature_type: "ChainEnd".to_string(),
                atom_ids: vec![0],
                position: Point3::new(0.0, 0.0, 0.0),
            },
        );
        features.insert(
            1,
            FeatureInfo {
                family: "Hydrophobe".to_string(),
                feature_type: "ChainLink".to_string(),
                atom_ids: vec![1],
                position: Point3::new(1.5, 0.0, 0.0),
            },
        );
        features.insert(
            2,
            FeatureInfo {
                family: "Acceptor".to_string(),
                feature_type: "SingleAtomAcceptor".to_string(),
                atom_ids: vec![2],
                position: Point3::new(2.9, 0.0, 0.0),
            },
        );

        Self {
            conformations: vec![
                vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.5, 0.0, 0.0),
                    Point3::new(2.9, 0.0, 0.0),
                ],
                vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.5, 0.0, 0.0),
                    Point3::new(2.2, 1.2, 0.0),
                ],
            ],
            atoms: vec![
                atom("C", "C1", 6, 12.011),
                atom("C", "C2", 6, 12.011),
                atom("O", "O1", 8, 15.999),
            ],
            bonds: vec![(0, 1), (1, 2)],
            features,
        }
    }

    pub fn without_conformations() -> Self {
        let mut engine = Self::ethanol_fragment();
        engine.conformations.clear();
        engine
    }
}

impl MoleculeSource for FakeEngine {
    fn kind(&self) -> &'static str {
        "fake-engine"
    }

    fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    fn bond_pairs(&self) -> Vec<(usize, usize)> {
        self.bonds.clone()
    }

    fn atom_attributes(&self, atom_index: usize) -> Result<AtomAttributes, SourceError> {
        self.atoms
            .get(atom_index)
            .cloned()
            .ok_or(SourceError::AtomIndex {
                index: atom_index,
                count: self.atoms.len(),
            })
    }

    fn conformation_count(&self) -> usize {
        self.conformations.len()
    }

    fn atom_position(
        &self,
        conformation: usize,
        atom_index: usize,
    ) -> Result<Point3<f64>, SourceError> {
        let positions =
            self.conformations
                .get(conformation)
                .ok_or(SourceError::ConformationIndex {
                    index: conformation,
                    count: self.conformations.len(),
                })?;
        positions
            .get(atom_index)
            .copied()
            .ok_or(SourceError::AtomIndex {
                index: atom_index,
                count: positions.len(),
            })
    }

    fn discover_features(
        &self,
        config: &FeatureConfig,
    ) -> Result<BTreeMap<usize, FeatureInfo>, SourceError> {
        if config.definitions_path.as_os_str().is_empty() {
            return Err(SourceError::Discovery(
                "empty feature-definition path".to_string(),
            ));
        }
        Ok(self.features.clone())
    }
}
