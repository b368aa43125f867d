use indexmap::IndexMap;
use std::rc::Rc;
use thiserror::Error;

/// Represents errors raised while constructing selections.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SelectionError {
    /// A selection index fell outside its parent's bounds.
    #[error("selection index {index} is out of bounds for a parent of length {len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The parent length at construction time.
        len: usize,
    },
}

/// An ordered, index-defined view over a shared parent collection.
///
/// The selection stores a handle to the parent, not a copy of its elements,
/// so it sees the parent's elements as they are at read time. Iteration
/// follows the caller's index order, which need not be the parent's order,
/// and an index may appear more than once. Every index is validated against
/// the parent when the selection is built.
#[derive(Debug, Clone)]
pub struct IndexedSelection<T> {
    parent: Rc<Vec<T>>,
    indices: Vec<usize>,
}

impl<T> IndexedSelection<T> {
    /// Creates a selection of `indices` into `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::IndexOutOfBounds`] if any index is out of
    /// range for the parent.
    pub fn new(parent: Rc<Vec<T>>, indices: Vec<usize>) -> Result<Self, SelectionError> {
        let len = parent.len();
        if let Some(&index) = indices.iter().find(|&&index| index >= len) {
            return Err(SelectionError::IndexOutOfBounds { index, len });
        }
        Ok(Self { parent, indices })
    }

    /// Returns the number of selected positions (repeats included).
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the selected parent indices in selection order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the shared parent collection.
    pub fn parent(&self) -> &Rc<Vec<T>> {
        &self.parent
    }

    /// Returns the element at selection position `position`.
    pub fn get(&self, position: usize) -> Option<&T> {
        self.indices.get(position).map(|&index| &self.parent[index])
    }

    /// Iterates over the selected elements in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.indices.iter().map(|&index| &self.parent[index])
    }

    /// Builds a selection of this selection.
    ///
    /// `indices` address positions of this selection; they resolve through
    /// its order back to the shared parent, so the result is another
    /// selection over the same parent.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::IndexOutOfBounds`] if any position is out
    /// of range for this selection.
    pub fn subselect(&self, indices: Vec<usize>) -> Result<Self, SelectionError> {
        let len = self.indices.len();
        let mut resolved = Vec::with_capacity(indices.len());
        for index in indices {
            if index >= len {
                return Err(SelectionError::IndexOutOfBounds { index, len });
            }
            resolved.push(self.indices[index]);
        }
        Ok(Self {
            parent: Rc::clone(&self.parent),
            indices: resolved,
        })
    }
}

/// An insertion-ordered, name-keyed container of selections or other values.
#[derive(Debug, Clone)]
pub struct SelectionMap<V> {
    entries: IndexMap<String, V>,
}

/// An ordered, unkeyed container of selections or other values.
pub type SelectionList<V> = Vec<V>;

impl<V> Default for SelectionMap<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V> SelectionMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, returning any previous value.
    ///
    /// A fresh key is appended at the end; re-inserting an existing key
    /// keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
