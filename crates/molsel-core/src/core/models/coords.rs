use nalgebra::Point3;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Number of spatial components in every stored coordinate.
pub const SPATIAL_DIMS: usize = 3;

/// Represents errors raised while constructing coordinate storage or handles.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoordError {
    /// A coordinate value did not have exactly three components.
    #[error("coordinate has {got} components, expected {SPATIAL_DIMS}")]
    Dimension {
        /// The number of components actually supplied.
        got: usize,
    },
    /// A coordinate handle referenced an index outside its buffer.
    #[error("alias index {index} is out of range for a buffer of length {len}")]
    InvalidAlias {
        /// The offending index.
        index: usize,
        /// The buffer length at construction time.
        len: usize,
    },
}

/// Growable storage for 3-D positions shared by reference between many views.
///
/// This buffer is the single source of truth for the positions of every
/// entity that aliases it: a write at index `i` is observed by every handle
/// holding `i`, with no synchronization call. Insertion order equals index
/// order, and the buffer never shrinks, so an index validated at handle
/// construction stays valid for the handle's lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordBuffer {
    coords: Vec<Point3<f64>>,
}

/// Shared-ownership handle to a [`CoordBuffer`].
///
/// The design is single-threaded by contract; interior mutability gives
/// every holder read/write access, and the buffer is dropped only when the
/// last holder goes away.
pub type SharedCoords = Rc<RefCell<CoordBuffer>>;

impl CoordBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a buffer from dynamically-sized coordinate rows.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::Dimension`] if any row does not have exactly
    /// three components.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, CoordError> {
        let mut coords = Vec::with_capacity(rows.len());
        for row in rows {
            let row = row.as_ref();
            if row.len() != SPATIAL_DIMS {
                return Err(CoordError::Dimension { got: row.len() });
            }
            coords.push(Point3::new(row[0], row[1], row[2]));
        }
        Ok(Self { coords })
    }

    /// Builds a buffer from already-typed points.
    pub fn from_points(points: Vec<Point3<f64>>) -> Self {
        Self { coords: points }
    }

    /// Returns the number of stored positions.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Returns `true` if no positions are stored.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Reads the position at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<Point3<f64>> {
        self.coords.get(index).copied()
    }

    /// Overwrites the position at `index`.
    ///
    /// Returns `Some(())` on success, `None` if the index is out of range.
    /// The write is observed by every handle aliasing `index`.
    pub fn set(&mut self, index: usize, position: Point3<f64>) -> Option<()> {
        let slot = self.coords.get_mut(index)?;
        *slot = position;
        Some(())
    }

    /// Appends a position and returns its index.
    pub fn push(&mut self, position: Point3<f64>) -> usize {
        self.coords.push(position);
        self.coords.len() - 1
    }

    /// Wraps the buffer in a [`SharedCoords`] handle for aliasing.
    pub fn into_shared(self) -> SharedCoords {
        Rc::new(RefCell::new(self))
    }
}

/// A 3-D position handle in one of two mutually exclusive modes.
///
/// A point either owns its coordinate triple directly, or aliases a slot in
/// a shared [`CoordBuffer`]; the two modes cannot be combined. Aliased
/// points read and write through the buffer, so a mutation made through any
/// holder of the same slot is visible here without any refresh step.
///
/// The mode is private so that every aliased point has gone through the
/// range check in [`Point::aliased`].
#[derive(Debug, Clone)]
pub struct Point {
    mode: Mode,
}

#[derive(Debug, Clone)]
enum Mode {
    Owned(Point3<f64>),
    Aliased { buffer: SharedCoords, index: usize },
}

impl Point {
    /// Creates an owned point at `position`.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            mode: Mode::Owned(position),
        }
    }

    /// Creates an owned point with an all-NaN triple, signalling
    /// "not yet positioned".
    pub fn unplaced() -> Self {
        Self::new(Point3::new(f64::NAN, f64::NAN, f64::NAN))
    }

    /// Creates an owned point from a dynamically-sized coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::Dimension`] if `coords` does not have exactly
    /// three components.
    pub fn from_slice(coords: &[f64]) -> Result<Self, CoordError> {
        if coords.len() != SPATIAL_DIMS {
            return Err(CoordError::Dimension { got: coords.len() });
        }
        Ok(Self::new(Point3::new(coords[0], coords[1], coords[2])))
    }

    /// Creates a point aliasing `index` within `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::InvalidAlias`] if `index` is out of range for
    /// the buffer at construction time.
    pub fn aliased(buffer: SharedCoords, index: usize) -> Result<Self, CoordError> {
        let len = buffer.borrow().len();
        if index >= len {
            return Err(CoordError::InvalidAlias { index, len });
        }
        Ok(Self {
            mode: Mode::Aliased { buffer, index },
        })
    }

    /// Returns the current 3-D value regardless of mode.
    ///
    /// For an aliased point this is a live buffer lookup, so it reflects
    /// any write made through other handles since the last call.
    pub fn coords(&self) -> Point3<f64> {
        match &self.mode {
            Mode::Owned(position) => *position,
            // Buffers never shrink, so a validated alias index stays valid.
            Mode::Aliased { buffer, index } => buffer.borrow().coords[*index],
        }
    }

    /// Sets the position, writing through the alias when present.
    ///
    /// An aliased write mutates the shared buffer in place and is visible
    /// to every other point aliasing the same index.
    pub fn set_coords(&mut self, position: Point3<f64>) {
        match &mut self.mode {
            Mode::Owned(slot) => *slot = position,
            Mode::Aliased { buffer, index } => {
                buffer.borrow_mut().coords[*index] = position;
            }
        }
    }

    /// Returns the shared buffer handle and index when aliased.
    pub fn alias(&self) -> Option<(SharedCoords, usize)> {
        match &self.mode {
            Mode::Owned(_) => None,
            Mode::Aliased { buffer, index } => Some((Rc::clone(buffer), *index)),
        }
    }

    /// Returns `true` if the point aliases a shared buffer.
    pub fn is_aliased(&self) -> bool {
        matches!(self.mode, Mode::Aliased { .. })
    }

    /// Returns `true` if every coordinate component is finite.
    pub fn is_placed(&self) -> bool {
        self.coords().iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_buffer() -> SharedCoords {
        CoordBuffer::from_rows(&[
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 0.0, 0.0],
        ])
        .unwrap()
        .into_shared()
    }

    mod buffer {
        use super::*;

        #[test]
        fn from_rows_accepts_three_component_rows() {
            let buffer = CoordBuffer::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
            let buffer = buffer.unwrap();
            assert_eq!(buffer.len(), 2);
            assert_eq!(buffer.get(1), Some(Point3::new(4.0, 5.0, 6.0)));
        }

        #[test]
        fn from_rows_rejects_short_rows() {
            let result = CoordBuffer::from_rows(&[vec![1.0, 2.0]]);
            assert_eq!(result.unwrap_err(), CoordError::Dimension { got: 2 });
        }

        #[test]
        fn from_rows_rejects_long_rows() {
            let result = CoordBuffer::from_rows(&[vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0, 4.0]]);
            assert_eq!(result.unwrap_err(), CoordError::Dimension { got: 4 });
        }

        #[test]
        fn insertion_order_equals_index_order() {
            let mut buffer = CoordBuffer::new();
            assert_eq!(buffer.push(Point3::new(1.0, 0.0, 0.0)), 0);
            assert_eq!(buffer.push(Point3::new(2.0, 0.0, 0.0)), 1);
            assert_eq!(buffer.get(0), Some(Point3::new(1.0, 0.0, 0.0)));
            assert_eq!(buffer.get(1), Some(Point3::new(2.0, 0.0, 0.0)));
        }

        #[test]
        fn set_rejects_out_of_range_index() {
            let mut buffer = CoordBuffer::from_points(vec![Point3::origin()]);
            assert_eq!(buffer.set(0, Point3::new(1.0, 1.0, 1.0)), Some(()));
            assert_eq!(buffer.set(1, Point3::origin()), None);
        }

        #[test]
        fn get_returns_none_past_the_end() {
            let buffer = CoordBuffer::new();
            assert!(buffer.is_empty());
            assert_eq!(buffer.get(0), None);
        }
    }

    mod point {
        use super::*;

        #[test]
        fn owned_point_returns_its_coords() {
            let point = Point::new(Point3::new(5.0, 5.0, 5.0));
            assert_eq!(point.coords(), Point3::new(5.0, 5.0, 5.0));
            assert!(!point.is_aliased());
            assert!(point.alias().is_none());
        }

        #[test]
        fn unplaced_point_is_all_nan() {
            let point = Point::unplaced();
            assert!(point.coords().iter().all(|c| c.is_nan()));
            assert!(!point.is_placed());
        }

        #[test]
        fn from_slice_validates_dimension() {
            assert!(Point::from_slice(&[1.0, 2.0, 3.0]).is_ok());
            assert_eq!(
                Point::from_slice(&[1.0]).unwrap_err(),
                CoordError::Dimension { got: 1 }
            );
            assert_eq!(
                Point::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap_err(),
                CoordError::Dimension { got: 4 }
            );
        }

        #[test]
        fn aliased_point_rejects_out_of_range_index() {
            let buffer = shared_buffer();
            let result = Point::aliased(Rc::clone(&buffer), 3);
            assert_eq!(
                result.unwrap_err(),
                CoordError::InvalidAlias { index: 3, len: 3 }
            );
        }

        #[test]
        fn aliased_point_reads_through_the_buffer() {
            let buffer = shared_buffer();
            let point = Point::aliased(Rc::clone(&buffer), 1).unwrap();
            assert!(point.is_aliased());
            assert_eq!(point.coords(), Point3::new(0.0, 0.0, 1.0));
        }

        #[test]
        fn buffer_mutation_is_visible_through_the_alias() {
            let buffer = shared_buffer();
            let point = Point::aliased(Rc::clone(&buffer), 0).unwrap();

            buffer.borrow_mut().set(0, Point3::new(9.0, 9.0, 9.0)).unwrap();

            assert_eq!(point.coords(), Point3::new(9.0, 9.0, 9.0));
        }

        #[test]
        fn buffer_mutation_affects_only_the_mutated_index() {
            let buffer = shared_buffer();
            let first = Point::aliased(Rc::clone(&buffer), 0).unwrap();
            let second = Point::aliased(Rc::clone(&buffer), 1).unwrap();

            buffer.borrow_mut().set(0, Point3::new(9.0, 9.0, 9.0)).unwrap();

            assert_eq!(first.coords(), Point3::new(9.0, 9.0, 9.0));
            assert_eq!(second.coords(), Point3::new(0.0, 0.0, 1.0));
        }

        #[test]
        fn aliased_write_is_visible_to_every_sibling() {
            let buffer = shared_buffer();
            let mut writer = Point::aliased(Rc::clone(&buffer), 2).unwrap();
            let reader = Point::aliased(Rc::clone(&buffer), 2).unwrap();

            writer.set_coords(Point3::new(-1.0, -2.0, -3.0));

            assert_eq!(reader.coords(), Point3::new(-1.0, -2.0, -3.0));
            assert_eq!(buffer.borrow().get(2), Some(Point3::new(-1.0, -2.0, -3.0)));
        }

        #[test]
        fn owned_write_stays_private() {
            let mut point = Point::new(Point3::origin());
            point.set_coords(Point3::new(1.0, 2.0, 3.0));
            assert_eq!(point.coords(), Point3::new(1.0, 2.0, 3.0));
        }

        #[test]
        fn alias_returns_the_shared_handle() {
            let buffer = shared_buffer();
            let point = Point::aliased(Rc::clone(&buffer), 1).unwrap();
            let (handle, index) = point.alias().unwrap();
            assert_eq!(index, 1);
            assert!(Rc::ptr_eq(&handle, &buffer));
        }
    }
}
