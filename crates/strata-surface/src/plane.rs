//! Planar surface with optional finite bounds.

use std::sync::Arc;

use nalgebra::{Point2, Vector3};
use strata_core::{
    BoundaryCheck, Direction, ElementId, Intersection, Position, SurfaceInstanceId, Transform,
};

use crate::bounds::PlanarBounds;
use crate::material::SurfaceMaterial;
use crate::surface::Surface;

/// Cosine below which a line counts as parallel to the plane.
const PARALLEL_TOLERANCE: f64 = 1e-12;

/// A plane: the local `z = 0` plane of its transform.
///
/// The normal is the local z axis. Without bounds the plane is infinite and
/// every boundary check passes.
///
/// # Examples
///
/// ```
/// use nalgebra::{Point3, Vector3};
/// use strata_core::{BoundaryCheck, Transform};
/// use strata_surface::{PlanarBounds, PlaneSurface, Surface};
///
/// let plane = PlaneSurface::new(
///     Transform::translation(0.0, 0.0, 10.0),
///     PlanarBounds::rectangle(5.0, 5.0).unwrap(),
/// );
/// let hit = plane.intersect(&Point3::origin(), &Vector3::z_axis(), BoundaryCheck::Bounded);
/// assert!(hit.valid);
/// assert!((hit.path_length - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct PlaneSurface {
    transform: Transform,
    bounds: Option<PlanarBounds>,
    material: Option<SurfaceMaterial>,
    element: Option<ElementId>,
    instance_id: SurfaceInstanceId,
}

impl PlaneSurface {
    /// A bounded plane.
    pub fn new(transform: Transform, bounds: PlanarBounds) -> Self {
        Self::with_optional_bounds(transform, Some(bounds))
    }

    /// An infinite plane.
    pub fn infinite(transform: Transform) -> Self {
        Self::with_optional_bounds(transform, None)
    }

    fn with_optional_bounds(transform: Transform, bounds: Option<PlanarBounds>) -> Self {
        Self {
            transform,
            bounds,
            material: None,
            element: None,
            instance_id: SurfaceInstanceId::next(),
        }
    }

    /// Attach material.
    #[must_use]
    pub fn with_material(mut self, material: SurfaceMaterial) -> Self {
        self.material = Some(material);
        self
    }

    /// Associate a detector element, marking the plane as a readout surface.
    #[must_use]
    pub fn with_element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    /// The bounds, `None` for an infinite plane.
    pub fn bounds(&self) -> Option<&PlanarBounds> {
        self.bounds.as_ref()
    }

    /// Global position expressed in the local frame.
    pub fn to_local(&self, position: &Position) -> Position {
        self.transform.inverse_transform_point(position)
    }

    /// Local `(x, y)` position on the plane for a global position.
    pub fn local_position(&self, position: &Position) -> Point2<f64> {
        self.to_local(position).xy()
    }

    fn unit_normal(&self) -> Direction {
        self.transform.rotation * Vector3::z_axis()
    }
}

impl Surface for PlaneSurface {
    fn instance_id(&self) -> SurfaceInstanceId {
        self.instance_id
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn kind(&self) -> &'static str {
        "PlaneSurface"
    }

    fn normal(&self, _position: &Position) -> Direction {
        self.unit_normal()
    }

    fn distance(&self, position: &Position) -> f64 {
        self.to_local(position).z
    }

    fn is_within_bounds(&self, position: &Position, check: BoundaryCheck) -> bool {
        match &self.bounds {
            Some(bounds) => bounds.inside(&self.local_position(position), check),
            None => true,
        }
    }

    fn intersect(
        &self,
        position: &Position,
        direction: &Direction,
        check: BoundaryCheck,
    ) -> Intersection {
        let normal = self.unit_normal();
        let cos_angle = normal.dot(direction);
        if cos_angle.abs() < PARALLEL_TOLERANCE {
            return Intersection::invalid();
        }
        let path_length = normal.dot(&(self.center() - position)) / cos_angle;
        let point = position + direction.into_inner() * path_length;
        let valid = self.is_within_bounds(&point, check);
        Intersection::new(point, path_length, valid)
    }

    fn material(&self) -> Option<&SurfaceMaterial> {
        self.material.as_ref()
    }

    fn associated_element(&self) -> Option<ElementId> {
        self.element
    }

    fn clone_with_shift(&self, shift: &Transform) -> Arc<dyn Surface> {
        Arc::new(Self {
            transform: shift * self.transform,
            bounds: self.bounds,
            material: self.material,
            element: self.element,
            instance_id: SurfaceInstanceId::next(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use approx::assert_relative_eq;
    use nalgebra::{Translation3, UnitQuaternion};
    use std::f64::consts::FRAC_PI_2;

    fn square(z: f64, half: f64) -> PlaneSurface {
        PlaneSurface::new(
            Transform::translation(0.0, 0.0, z),
            PlanarBounds::rectangle(half, half).unwrap(),
        )
    }

    #[test]
    fn intersect_head_on() {
        let s = square(5.0, 10.0);
        let hit = s.intersect(&Position::origin(), &Vector3::z_axis(), BoundaryCheck::Bounded);
        assert!(hit.valid);
        assert_relative_eq!(hit.path_length, 5.0);
        assert_relative_eq!(hit.position, Position::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn intersect_behind_has_negative_path() {
        let s = square(-3.0, 10.0);
        let hit = s.intersect(&Position::origin(), &Vector3::z_axis(), BoundaryCheck::Bounded);
        assert!(hit.valid);
        assert_relative_eq!(hit.path_length, -3.0);
        assert!(!hit.is_forward());
    }

    #[test]
    fn intersect_parallel_is_invalid() {
        let s = square(5.0, 10.0);
        let hit = s.intersect(&Position::origin(), &Vector3::x_axis(), BoundaryCheck::Unbounded);
        assert!(!hit.valid);
        assert!(hit.path_length.is_infinite());
    }

    #[test]
    fn out_of_bounds_hit_depends_on_check() {
        let s = square(5.0, 1.0);
        let start = Position::new(3.0, 0.0, 0.0);
        let bounded = s.intersect(&start, &Vector3::z_axis(), BoundaryCheck::Bounded);
        assert!(!bounded.valid);
        assert_relative_eq!(bounded.path_length, 5.0);
        let unbounded = s.intersect(&start, &Vector3::z_axis(), BoundaryCheck::Unbounded);
        assert!(unbounded.valid);
    }

    #[test]
    fn oblique_path_length() {
        let s = square(4.0, 100.0);
        let dir = Direction::new_normalize(Vector3::new(3.0, 0.0, 4.0));
        let hit = s.intersect(&Position::origin(), &dir, BoundaryCheck::Bounded);
        assert!(hit.valid);
        assert_relative_eq!(hit.path_length, 5.0, epsilon = 1e-12);
        assert_relative_eq!(hit.position, Position::new(3.0, 0.0, 4.0), epsilon = 1e-12);
    }

    #[test]
    fn rotated_plane_normal() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let s = PlaneSurface::infinite(Transform::from_parts(
            Translation3::new(7.0, 0.0, 0.0),
            rotation,
        ));
        assert_relative_eq!(
            s.normal(&Position::origin()).into_inner(),
            Vector3::x(),
            epsilon = 1e-12
        );
        let hit = s.intersect(&Position::origin(), &Vector3::x_axis(), BoundaryCheck::Bounded);
        assert!(hit.valid);
        assert_relative_eq!(hit.path_length, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn distance_is_signed() {
        let s = square(2.0, 1.0);
        assert_relative_eq!(s.distance(&Position::new(0.0, 0.0, 5.0)), 3.0);
        assert_relative_eq!(s.distance(&Position::new(0.0, 0.0, 0.0)), -2.0);
    }

    #[test]
    fn shift_composes_on_the_left() {
        let s = square(1.0, 1.0).with_element(ElementId(4));
        let shift = Transform::translation(0.0, 2.0, 0.0);
        let shifted = s.clone_with_shift(&shift);
        assert_relative_eq!(shifted.center(), Position::new(0.0, 2.0, 1.0));
        assert_ne!(shifted.instance_id(), s.instance_id());
        assert_eq!(shifted.associated_element(), Some(ElementId(4)));
    }

    #[test]
    fn downcast_to_plane() {
        let s: Arc<dyn Surface> = Arc::new(square(0.0, 1.0));
        assert!(s.downcast_ref::<PlaneSurface>().is_some());
        assert_eq!(s.kind(), "PlaneSurface");
    }

    // ── Compliance suites ───────────────────────────────────────

    #[test]
    fn compliance_bounded_square() {
        compliance::run_full_compliance(&square(3.0, 2.0));
    }

    #[test]
    fn compliance_tilted_ellipse() {
        let rotation = UnitQuaternion::from_euler_angles(0.3, -0.2, 0.1);
        let s = PlaneSurface::new(
            Transform::from_parts(Translation3::new(1.0, -2.0, 6.0), rotation),
            PlanarBounds::ellipse(4.0, 2.0).unwrap(),
        );
        compliance::run_full_compliance(&s);
    }

    #[test]
    fn compliance_infinite() {
        compliance::run_full_compliance(&PlaneSurface::infinite(Transform::identity()));
    }
}
