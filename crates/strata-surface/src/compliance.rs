//! Surface trait compliance test helpers.
//!
//! These functions verify that a Surface implementation satisfies the
//! invariants layers rely on. Reused across backend test modules.

use indexmap::IndexSet;
use nalgebra::Point3;
use strata_core::{BoundaryCheck, Direction, Position, Transform};

use crate::surface::Surface;

/// Local points aimed at by the sight lines, in the surface's local frame.
fn sight_targets(surface: &dyn Surface) -> Vec<Position> {
    let offsets = [-3.0, -1.0, 0.0, 1.0, 3.0];
    let mut targets = Vec::with_capacity(offsets.len() * offsets.len());
    for &x in &offsets {
        for &y in &offsets {
            targets.push(surface.transform() * Point3::new(x, y, 0.0));
        }
    }
    targets
}

/// Start point five units in front of the surface centre.
fn sight_start(surface: &dyn Surface) -> Position {
    let center = surface.center();
    center + surface.normal(&center).into_inner() * 5.0
}

/// Assert that every sight line hits its target, with the hit on the surface.
pub fn assert_hits_lie_on_surface(surface: &dyn Surface) {
    let start = sight_start(surface);
    for target in sight_targets(surface) {
        let direction = Direction::new_normalize(target - start);
        let hit = surface.intersect(&start, &direction, BoundaryCheck::Unbounded);
        assert!(hit.valid, "unbounded ray towards {target:?} missed");
        assert!(
            (hit.position - target).norm() < 1e-9,
            "hit {:?} != target {target:?}",
            hit.position
        );
        assert!(
            surface.is_on_surface(&hit.position, BoundaryCheck::Unbounded),
            "hit {:?} not on surface",
            hit.position
        );
    }
}

/// Assert that `|path_length|` equals the distance from start to hit.
pub fn assert_path_length_is_distance(surface: &dyn Surface) {
    let start = sight_start(surface);
    for target in sight_targets(surface) {
        let direction = Direction::new_normalize(target - start);
        let hit = surface.intersect(&start, &direction, BoundaryCheck::Unbounded);
        let d = (hit.position - start).norm();
        assert!(
            (hit.path_length.abs() - d).abs() < 1e-9,
            "path length {} != distance {d}",
            hit.path_length
        );
        assert!(hit.path_length > 0.0, "ray aimed forward but hit behind");
    }
}

/// Assert that the bounded validity flag agrees with `is_within_bounds`.
pub fn assert_bounded_validity_matches_bounds(surface: &dyn Surface) {
    let start = sight_start(surface);
    for target in sight_targets(surface) {
        let direction = Direction::new_normalize(target - start);
        let hit = surface.intersect(&start, &direction, BoundaryCheck::Bounded);
        assert_eq!(
            hit.valid,
            surface.is_within_bounds(&target, BoundaryCheck::Bounded),
            "validity mismatch at {target:?}"
        );
    }
}

/// Assert that shifting by the identity keeps geometry and renews identity.
pub fn assert_identity_shift_preserves_geometry(surface: &dyn Surface) {
    let copy = surface.clone_with_shift(&Transform::identity());
    assert_ne!(copy.instance_id(), surface.instance_id());
    for target in sight_targets(surface) {
        assert!(
            (copy.distance(&target) - surface.distance(&target)).abs() < 1e-12,
            "identity shift moved the surface"
        );
    }
}

/// Assert that repeated shifted copies all get distinct instance ids.
pub fn assert_instance_ids_unique(surface: &dyn Surface) {
    let shift = Transform::translation(1.0, 0.0, 0.0);
    let mut seen = IndexSet::new();
    seen.insert(surface.instance_id());
    for _ in 0..8 {
        let copy = surface.clone_with_shift(&shift);
        assert!(seen.insert(copy.instance_id()), "duplicate instance id");
    }
}

/// Run all compliance checks on a surface.
pub fn run_full_compliance(surface: &dyn Surface) {
    assert_hits_lie_on_surface(surface);
    assert_path_length_is_distance(surface);
    assert_bounded_validity_matches_bounds(surface);
    assert_identity_shift_preserves_geometry(surface);
    assert_instance_ids_unique(surface);
}
