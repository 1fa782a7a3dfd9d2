//! Straight-line intersection results.

use std::cmp::Ordering;
use std::fmt;

use crate::algebra::Position;

/// Result of intersecting a trajectory with a surface.
///
/// `path_length` is signed along the query direction: negative values lie
/// behind the start point. `valid` is false when the line misses the surface
/// (parallel, or outside the bounds under the requested boundary check).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Global intersection point.
    pub position: Position,
    /// Signed path length from the start point.
    pub path_length: f64,
    /// Whether the intersection is accepted by the surface.
    pub valid: bool,
}

impl Intersection {
    /// Create an intersection.
    pub fn new(position: Position, path_length: f64, valid: bool) -> Self {
        Self {
            position,
            path_length,
            valid,
        }
    }

    /// An intersection that never happened (parallel or degenerate line).
    pub fn invalid() -> Self {
        Self {
            position: Position::origin(),
            path_length: f64::INFINITY,
            valid: false,
        }
    }

    /// Copy with the validity flag cleared.
    #[must_use]
    pub fn invalidated(self) -> Self {
        Self {
            valid: false,
            ..self
        }
    }

    /// Valid and not behind the start point.
    pub fn is_forward(&self) -> bool {
        self.valid && self.path_length >= 0.0
    }

    /// Ascending path-length order. Total over NaN.
    pub fn forward_order(a: &Self, b: &Self) -> Ordering {
        a.path_length.total_cmp(&b.path_length)
    }
}

/// An [`Intersection`] together with the object that was intersected.
///
/// `T` is usually `dyn Surface`; the object is borrowed from the layer (or
/// its sub-structure) that produced the intersection.
pub struct ObjectIntersection<'a, T: ?Sized> {
    /// The geometric intersection.
    pub intersection: Intersection,
    /// The intersected object.
    pub object: &'a T,
}

impl<'a, T: ?Sized> ObjectIntersection<'a, T> {
    /// Pair an intersection with its object.
    pub fn new(intersection: Intersection, object: &'a T) -> Self {
        Self {
            intersection,
            object,
        }
    }

    /// Path length of the intersection.
    pub fn path_length(&self) -> f64 {
        self.intersection.path_length
    }

    /// Whether the intersection is valid.
    pub fn is_valid(&self) -> bool {
        self.intersection.valid
    }
}

impl<T: ?Sized> Clone for ObjectIntersection<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ObjectIntersection<'_, T> {}

impl<T: ?Sized + fmt::Debug> fmt::Debug for ObjectIntersection<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectIntersection")
            .field("intersection", &self.intersection)
            .field("object", &self.object)
            .finish()
    }
}
