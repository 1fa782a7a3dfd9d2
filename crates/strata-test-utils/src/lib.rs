//! Test utilities and mock types for Strata development.
//!
//! Provides standard layer fixtures ([`fixtures`]), trajectory shorthands
//! and a [`MockSurface`] whose intersection is scripted instead of computed,
//! for tests that need exact control over path lengths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::Arc;

use strata_core::{
    BoundaryCheck, ChargedParameters, Direction, Intersection, NeutralParameters, Position,
    SurfaceInstanceId, Transform,
};
use strata_surface::{Surface, SurfaceMaterial};

/// Neutral ray from `start` pointing at `target`.
pub fn toward(start: Position, target: Position) -> NeutralParameters {
    NeutralParameters::ray(start, Direction::new_normalize(target - start))
}

/// Unit-charge track from `start` pointing at `target` with momentum `p`.
pub fn charged_toward(start: Position, target: Position, p: f64) -> ChargedParameters {
    ChargedParameters::new(start, Direction::new_normalize(target - start), p, 1.0)
}

/// Neutral ray from `(x, y, z)` along +z.
pub fn along_z(x: f64, y: f64, z: f64) -> NeutralParameters {
    NeutralParameters::ray(Position::new(x, y, z), nalgebra::Vector3::z_axis())
}

/// Surface whose intersection is scripted: every line meets it at
/// `path_length` along the query direction, with the scripted validity.
///
/// Geometric queries other than `intersect` treat it as the local `z = 0`
/// plane of its transform.
#[derive(Debug)]
pub struct MockSurface {
    pub transform: Transform,
    pub path_length: f64,
    pub valid: bool,
    pub material: Option<SurfaceMaterial>,
    id: SurfaceInstanceId,
}

impl MockSurface {
    pub fn new(path_length: f64) -> Self {
        Self {
            transform: Transform::identity(),
            path_length,
            valid: true,
            material: None,
            id: SurfaceInstanceId::next(),
        }
    }

    pub fn invalid() -> Self {
        Self {
            valid: false,
            ..Self::new(1.0)
        }
    }

    pub fn with_material(mut self, material: SurfaceMaterial) -> Self {
        self.material = Some(material);
        self
    }

    pub fn shared(self) -> Arc<dyn Surface> {
        Arc::new(self)
    }
}

impl Surface for MockSurface {
    fn instance_id(&self) -> SurfaceInstanceId {
        self.id
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn kind(&self) -> &'static str {
        "MockSurface"
    }

    fn normal(&self, _position: &Position) -> Direction {
        self.transform.rotation * nalgebra::Vector3::z_axis()
    }

    fn distance(&self, position: &Position) -> f64 {
        self.transform.inverse_transform_point(position).z
    }

    fn is_within_bounds(&self, _position: &Position, _check: BoundaryCheck) -> bool {
        true
    }

    fn intersect(
        &self,
        position: &Position,
        direction: &Direction,
        _check: BoundaryCheck,
    ) -> Intersection {
        Intersection::new(
            position + direction.into_inner() * self.path_length,
            self.path_length,
            self.valid,
        )
    }

    fn material(&self) -> Option<&SurfaceMaterial> {
        self.material.as_ref()
    }

    fn clone_with_shift(&self, shift: &Transform) -> Arc<dyn Surface> {
        Arc::new(Self {
            transform: shift * self.transform,
            path_length: self.path_length,
            valid: self.valid,
            material: self.material,
            id: SurfaceInstanceId::next(),
        })
    }
}
