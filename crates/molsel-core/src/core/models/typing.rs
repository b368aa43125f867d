use crate::core::utils::elements;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Represents errors raised by the atom type registry.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TypingError {
    /// A name was re-registered with structurally different attributes.
    #[error("atom type name '{name}' is already registered with different attributes")]
    DuplicateTypeName {
        /// The colliding registry key.
        name: String,
    },
}

/// A single attribute value carried by an [`AtomType`].
///
/// Equality is exact; no numeric tolerance is applied to floats.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Integer-valued attribute (counts, charges, atomic numbers).
    Int(i64),
    /// Floating-point attribute (masses, occupancies).
    Float(f64),
    /// Boolean attribute (aromaticity, ring membership).
    Bool(bool),
    /// Textual or categorical attribute (element symbol, PDB name).
    Text(String),
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// A physicochemical classification of an atom as a bag of named attributes.
///
/// Two types are equal iff every attribute key and value matches exactly.
/// The ordering relation compares attribute-key sets only: a type is "less"
/// than another iff its key set is a strict subset of the other's. This is
/// a partial, non-total order used purely for registry bookkeeping; types
/// with incomparable key sets are neither less nor greater.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtomType {
    attrs: BTreeMap<String, AttrValue>,
}

impl AtomType {
    /// Creates a type from an attribute map.
    pub fn new(attrs: BTreeMap<String, AttrValue>) -> Self {
        Self { attrs }
    }

    /// Creates a type from key/value entries.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            attrs: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Creates a minimal type for a bare element: symbol, atomic number,
    /// and standard mass.
    ///
    /// Returns `None` for symbols missing from the element tables.
    pub fn of_element(symbol: &str) -> Option<Self> {
        let number = elements::atomic_number(symbol)?;
        let mass = elements::atomic_mass(symbol)?;
        Some(Self::from_entries([
            ("element", AttrValue::Text(symbol.trim().to_string())),
            ("atomic_number", AttrValue::Int(i64::from(number))),
            ("mass", AttrValue::Float(mass)),
        ]))
    }

    /// Looks up a single attribute by key.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Returns the full attribute map.
    pub fn attrs(&self) -> &BTreeMap<String, AttrValue> {
        &self.attrs
    }

    /// Iterates over the attribute keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns `true` if the type carries no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    fn key_set_is_strict_subset_of(&self, other: &Self) -> bool {
        self.attrs.len() < other.attrs.len()
            && self.attrs.keys().all(|key| other.attrs.contains_key(key))
    }
}

impl PartialOrd for AtomType {
    /// Key-set inclusion only; attribute values are ignored except for the
    /// `Equal` case.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.key_set_is_strict_subset_of(other) {
            Some(Ordering::Less)
        } else if other.key_set_is_strict_subset_of(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

/// A name-keyed registry of [`AtomType`]s with conflict detection.
///
/// Registration is idempotent for equal types and fatal for redefinitions:
/// a name can never be silently rebound to different attributes.
#[derive(Debug, Clone, Default)]
pub struct AtomTypeLibrary {
    types: HashMap<String, AtomType>,
}

impl AtomTypeLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `atom_type` under `name`.
    ///
    /// Re-registering an equal type under the same name is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TypingError::DuplicateTypeName`] if `name` is already
    /// bound to a structurally different type.
    pub fn register(&mut self, name: &str, atom_type: AtomType) -> Result<(), TypingError> {
        match self.types.get(name) {
            None => {
                self.types.insert(name.to_string(), atom_type);
                Ok(())
            }
            Some(existing) if *existing == atom_type => Ok(()),
            Some(_) => Err(TypingError::DuplicateTypeName {
                name: name.to_string(),
            }),
        }
    }

    /// Looks up a type by its registry key.
    pub fn get(&self, name: &str) -> Option<&AtomType> {
        self.types.get(name)
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over `(name, type)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AtomType)> {
        self.types.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    /// Tests whether any candidate is structurally equal to any stored type.
    ///
    /// The comparison walks the Cartesian product of stored types and
    /// candidates, pairwise.
    pub fn attributes_match(&self, candidates: &[AtomType]) -> bool {
        self.types
            .values()
            .any(|stored| candidates.iter().any(|candidate| candidate == stored))
    }

    /// Registers `atom_type` under `base_name`, disambiguating repeats.
    ///
    /// External sources repeat human-readable atom labels freely (residue
    /// after residue reuses "CA"); repeated labels with genuinely new
    /// attributes get an incrementing numeric suffix so the registry key
    /// stays unique, while labels whose attributes match something already
    /// stored reuse their current suffix. `seen` carries the per-label
    /// counter across calls and must be reused for the whole atom list.
    ///
    /// Returns the final registry key.
    ///
    /// # Errors
    ///
    /// Returns [`TypingError::DuplicateTypeName`] if the resolved key is
    /// already bound to different attributes.
    pub fn register_disambiguated(
        &mut self,
        base_name: &str,
        atom_type: AtomType,
        seen: &mut HashMap<String, usize>,
    ) -> Result<String, TypingError> {
        if seen.contains_key(base_name) {
            if !self.attributes_match(std::slice::from_ref(&atom_type)) {
                *seen.get_mut(base_name).unwrap() += 1;
            }
        } else {
            seen.insert(base_name.to_string(), 0);
        }

        let suffix = seen[base_name];
        let key = if suffix > 0 {
            format!("{base_name}{suffix}")
        } else {
            base_name.to_string()
        };
        self.register(&key, atom_type)?;
        Ok(key)
    }
}
