use super::coords::{CoordError, Point, SharedCoords};
use super::typing::AtomType;
use nalgebra::Point3;

/// Represents an atom: a positioned point plus an optional classification.
///
/// The classification is fixed at construction and read-only thereafter.
/// Position behaves exactly like the underlying [`Point`]: an atom built
/// over a buffer alias observes writes made through any other holder of
/// the same slot.
#[derive(Debug, Clone)]
pub struct Atom {
    point: Point,
    atom_type: Option<AtomType>,
}

impl Atom {
    /// Creates an atom from a point and an optional type.
    pub fn new(point: Point, atom_type: Option<AtomType>) -> Self {
        Self { point, atom_type }
    }

    /// Creates an untyped atom owning `position`.
    pub fn at(position: Point3<f64>) -> Self {
        Self::new(Point::new(position), None)
    }

    /// Creates an untyped atom aliasing `index` within `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::InvalidAlias`] if `index` is out of range.
    pub fn aliased(buffer: SharedCoords, index: usize) -> Result<Self, CoordError> {
        Ok(Self::new(Point::aliased(buffer, index)?, None))
    }

    /// Creates an atom with no position yet (all-NaN owned coordinates).
    pub fn unplaced(atom_type: Option<AtomType>) -> Self {
        Self::new(Point::unplaced(), atom_type)
    }

    /// Attaches a type, consuming the atom.
    pub fn with_type(mut self, atom_type: AtomType) -> Self {
        self.atom_type = Some(atom_type);
        self
    }

    /// Returns the underlying coordinate handle.
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Returns the current position (live buffer lookup when aliased).
    pub fn coords(&self) -> Point3<f64> {
        self.point.coords()
    }

    /// Sets the position, writing through the buffer alias when present.
    pub fn set_coords(&mut self, position: Point3<f64>) {
        self.point.set_coords(position);
    }

    /// Returns the atom's classification, if any.
    pub fn atom_type(&self) -> Option<&AtomType> {
        self.atom_type.as_ref()
    }

    /// Returns `true` if every coordinate component is finite.
    pub fn is_placed(&self) -> bool {
        self.point.is_placed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::coords::CoordBuffer;
    use std::rc::Rc;

    #[test]
    fn owned_atom_reports_its_position() {
        let atom = Atom::at(Point3::new(5.0, 5.0, 5.0));
        assert_eq!(atom.coords(), Point3::new(5.0, 5.0, 5.0));
        assert!(atom.atom_type().is_none());
        assert!(atom.is_placed());
    }

    #[test]
    fn unplaced_atom_has_nan_coordinates() {
        let atom = Atom::unplaced(None);
        assert!(atom.coords().iter().all(|c| c.is_nan()));
        assert!(!atom.is_placed());
    }

    #[test]
    fn with_type_attaches_a_classification() {
        let ty = AtomType::from_entries([("element", "C")]);
        let atom = Atom::at(Point3::origin()).with_type(ty.clone());
        assert_eq!(atom.atom_type(), Some(&ty));
    }

    #[test]
    fn aliased_atom_observes_buffer_writes() {
        let buffer = CoordBuffer::from_points(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)])
            .into_shared();
        let atom = Atom::aliased(Rc::clone(&buffer), 0).unwrap();

        buffer.borrow_mut().set(0, Point3::new(9.0, 9.0, 9.0)).unwrap();

        assert_eq!(atom.coords(), Point3::new(9.0, 9.0, 9.0));
    }

    #[test]
    fn aliased_atom_write_reaches_sibling_atoms() {
        let buffer = CoordBuffer::from_points(vec![Point3::origin()]).into_shared();
        let mut writer = Atom::aliased(Rc::clone(&buffer), 0).unwrap();
        let reader = Atom::aliased(Rc::clone(&buffer), 0).unwrap();

        writer.set_coords(Point3::new(2.0, 4.0, 6.0));

        assert_eq!(reader.coords(), Point3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn aliased_atom_rejects_out_of_range_index() {
        let buffer = CoordBuffer::new().into_shared();
        let result = Atom::aliased(buffer, 0);
        assert_eq!(
            result.unwrap_err(),
            CoordError::InvalidAlias { index: 0, len: 0 }
        );
    }
}
