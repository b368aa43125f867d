use crate::core::models::typing::{AtomType, AttrValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Orbital hybridization state reported by an external chemistry engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Hybridization {
    /// Pure s orbital.
    S,
    /// sp hybrid.
    Sp,
    /// sp2 hybrid.
    Sp2,
    /// sp3 hybrid.
    Sp3,
    /// sp3d hybrid.
    Sp3d,
    /// sp3d2 hybrid.
    Sp3d2,
    /// No hybridization assigned.
    #[default]
    Unspecified,
}

/// Raised when a hybridization string cannot be parsed.
#[derive(Debug, Error)]
#[error("Invalid hybridization string")]
pub struct ParseHybridizationError;

impl FromStr for Hybridization {
    type Err = ParseHybridizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s" => Ok(Self::S),
            "sp" => Ok(Self::Sp),
            "sp2" => Ok(Self::Sp2),
            "sp3" => Ok(Self::Sp3),
            "sp3d" => Ok(Self::Sp3d),
            "sp3d2" => Ok(Self::Sp3d2),
            "unspecified" | "other" | "none" => Ok(Self::Unspecified),
            _ => Err(ParseHybridizationError),
        }
    }
}

impl fmt::Display for Hybridization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::S => "S",
                Self::Sp => "SP",
                Self::Sp2 => "SP2",
                Self::Sp3 => "SP3",
                Self::Sp3d => "SP3D",
                Self::Sp3d2 => "SP3D2",
                Self::Unspecified => "UNSPECIFIED",
            }
        )
    }
}

/// The full per-atom attribute record an external engine must supply.
///
/// This is the fixed-schema counterpart of the dynamic [`AtomType`]
/// attribute bag: engines fill in every field, and [`Self::to_atom_type`]
/// flattens the record into the bag used for equality, deduplication, and
/// registry bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomAttributes {
    /// Atomic number of the element.
    pub atomic_number: u8,
    /// Number of directly bonded heavy-atom neighbors.
    pub bond_degree: u8,
    /// Number of bonded neighbors including hydrogens.
    pub total_bond_degree: u8,
    /// Explicit valence.
    pub explicit_valence: u8,
    /// Implicit valence.
    pub implicit_valence: u8,
    /// Total valence.
    pub total_valence: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Orbital hybridization.
    pub hybridization: Hybridization,
    /// Whether the atom belongs to an aromatic system.
    pub is_aromatic: bool,
    /// Whether the atom is a ring member.
    pub in_ring: bool,
    /// Isotope number, `0` for the natural mixture.
    pub isotope: u16,
    /// Atomic mass in daltons.
    pub mass: f64,
    /// Number of radical electrons.
    pub num_radical_electrons: u8,
    /// Element symbol (e.g. `"C"`).
    pub element: String,
    /// Total number of attached hydrogens.
    pub num_hydrogens: u8,
    /// Atom name from the source's positional/residue metadata (e.g. `"CA"`).
    pub pdb_name: String,
    /// Crystallographic occupancy.
    pub pdb_occupancy: f64,
    /// Parent residue name (e.g. `"ALA"`).
    pub pdb_residue_name: String,
    /// Crystallographic temperature factor.
    pub pdb_temp_factor: f64,
}

impl AtomAttributes {
    /// Flattens the record into a dynamic attribute bag.
    pub fn to_atom_type(&self) -> AtomType {
        AtomType::from_entries([
            ("atomic_number", AttrValue::Int(i64::from(self.atomic_number))),
            ("bond_degree", AttrValue::Int(i64::from(self.bond_degree))),
            (
                "total_bond_degree",
                AttrValue::Int(i64::from(self.total_bond_degree)),
            ),
            (
                "explicit_valence",
                AttrValue::Int(i64::from(self.explicit_valence)),
            ),
            (
                "implicit_valence",
                AttrValue::Int(i64::from(self.implicit_valence)),
            ),
            ("total_valence", AttrValue::Int(i64::from(self.total_valence))),
            ("formal_charge", AttrValue::Int(i64::from(self.formal_charge))),
            (
                "hybridization",
                AttrValue::Text(self.hybridization.to_string()),
            ),
            ("is_aromatic", AttrValue::Bool(self.is_aromatic)),
            ("in_ring", AttrValue::Bool(self.in_ring)),
            ("isotope", AttrValue::Int(i64::from(self.isotope))),
            ("mass", AttrValue::Float(self.mass)),
            (
                "num_radical_electrons",
                AttrValue::Int(i64::from(self.num_radical_electrons)),
            ),
            ("element", AttrValue::Text(self.element.clone())),
            ("num_hydrogens", AttrValue::Int(i64::from(self.num_hydrogens))),
            ("pdb_name", AttrValue::Text(self.pdb_name.clone())),
            ("pdb_occupancy", AttrValue::Float(self.pdb_occupancy)),
            (
                "pdb_residue_name",
                AttrValue::Text(self.pdb_residue_name.clone()),
            ),
            ("pdb_temp_factor", AttrValue::Float(self.pdb_temp_factor)),
        ])
    }
}
