//! The core `Surface` trait and `dyn Surface` downcast support.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use strata_core::{
    BoundaryCheck, Direction, ElementId, Intersection, ObjectIntersection, Position,
    SurfaceInstanceId, Transform, ON_SURFACE_TOLERANCE,
};

use crate::material::SurfaceMaterial;

/// An [`Intersection`] paired with the surface it was computed on.
pub type SurfaceIntersection<'a> = ObjectIntersection<'a, dyn Surface>;

/// Geometric surface: the building block of every layer.
///
/// A surface exposes straight-line intersection, boundary membership and its
/// placement transform. Layers never depend on a concrete surface type; they
/// hold `dyn Surface` and compare surfaces by [`instance_id`](Self::instance_id).
///
/// # Thread Safety
///
/// `Send + Sync` is required because closed layers are queried concurrently
/// from independent propagation tasks.
pub trait Surface: Any + Debug + Send + Sync + 'static {
    /// Unique identity of this surface object.
    fn instance_id(&self) -> SurfaceInstanceId;

    /// Placement of the local frame in the global frame.
    fn transform(&self) -> &Transform;

    /// Short type name, for diagnostics.
    fn kind(&self) -> &'static str;

    /// Surface normal at (or nearest to) a global position.
    fn normal(&self, position: &Position) -> Direction;

    /// Signed distance of a global position from the surface along the normal.
    fn distance(&self, position: &Position) -> f64;

    /// Whether the projection of a global position onto the surface lies
    /// inside the bounds under `check`.
    fn is_within_bounds(&self, position: &Position, check: BoundaryCheck) -> bool;

    /// Intersect the straight line `position + s * direction` with the surface.
    ///
    /// Never fails: a parallel line yields [`Intersection::invalid`], a hit
    /// outside the bounds is returned with `valid == false`. The path length
    /// is signed; callers decide whether hits behind the start are usable.
    fn intersect(
        &self,
        position: &Position,
        direction: &Direction,
        check: BoundaryCheck,
    ) -> Intersection;

    /// Material carried by the surface, if any.
    fn material(&self) -> Option<&SurfaceMaterial>;

    /// Detector element read out through this surface, if any.
    fn associated_element(&self) -> Option<ElementId> {
        None
    }

    /// A copy placed under an additional rigid `shift` (`shift * transform`).
    ///
    /// The copy is a new surface object with a fresh instance identity.
    fn clone_with_shift(&self, shift: &Transform) -> Arc<dyn Surface>;

    /// Global centre of the surface (origin of its local frame).
    fn center(&self) -> Position {
        Position::from(self.transform().translation.vector)
    }

    /// Whether a global position lies on the surface under `check`.
    fn is_on_surface(&self, position: &Position, check: BoundaryCheck) -> bool {
        self.distance(position).abs() <= ON_SURFACE_TOLERANCE
            && self.is_within_bounds(position, check)
    }
}

impl dyn Surface {
    /// Attempt to downcast a trait object to a concrete surface type.
    pub fn downcast_ref<T: Surface>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Whether two trait objects are the same surface instance.
    pub fn same_as(&self, other: &dyn Surface) -> bool {
        self.instance_id() == other.instance_id()
    }
}
