//! Approach descriptors: the surfaces through which a trajectory enters a layer.

use std::fmt::Debug;
use std::sync::Arc;

use strata_core::{Direction, NavigationOptions, Position, Transform};
use strata_surface::{Surface, SurfaceIntersection};
use tracing::trace;

use crate::corrector::Corrector;

/// Source of the approach surface of a layer.
///
/// Given a trajectory state, a descriptor picks exactly one approach
/// intersection, deterministically, or `None` when no approach surface is
/// reachable forward. The descriptor is owned by its layer; the surfaces it
/// hands out live as long as the descriptor.
pub trait ApproachDescriptor: Debug + Send + Sync {
    /// The approach intersection for a track at `position` moving along
    /// `direction`, if one is reachable.
    ///
    /// `direction` is the track direction; the travel direction of
    /// `options` is applied on top of it. Honours the boundary check, path
    /// limit and start/end exclusions of `options`; `corrector` refines or
    /// rejects each trial intersection.
    fn approach_surface(
        &self,
        position: &Position,
        direction: &Direction,
        options: &NavigationOptions,
        corrector: &dyn Corrector,
    ) -> Option<SurfaceIntersection<'_>>;

    /// Every surface the descriptor may return, in a fixed order.
    fn contained_surfaces(&self) -> &[Arc<dyn Surface>];

    /// A copy with every surface placed under `shift`.
    fn clone_with_shift(&self, shift: &Transform) -> Box<dyn ApproachDescriptor>;
}

/// Approach descriptor over a plain list of surfaces.
///
/// Returns the valid forward intersection with the smallest path length.
/// Equal path lengths resolve to the surface listed first.
#[derive(Debug)]
pub struct GenericApproachDescriptor {
    surfaces: Vec<Arc<dyn Surface>>,
}

impl GenericApproachDescriptor {
    /// Create a descriptor over `surfaces`.
    pub fn new(surfaces: Vec<Arc<dyn Surface>>) -> Self {
        Self { surfaces }
    }
}

impl ApproachDescriptor for GenericApproachDescriptor {
    fn approach_surface(
        &self,
        position: &Position,
        direction: &Direction,
        options: &NavigationOptions,
        corrector: &dyn Corrector,
    ) -> Option<SurfaceIntersection<'_>> {
        let direction = options.direction.apply(direction);
        let mut best: Option<SurfaceIntersection<'_>> = None;
        for surface in &self.surfaces {
            if options.is_excluded(surface.instance_id()) {
                continue;
            }
            let trial = surface.intersect(position, &direction, options.boundary_check);
            let Some(hit) = corrector.correct(surface.as_ref(), trial) else {
                continue;
            };
            if !hit.is_forward() || !options.within_path_limit(hit.path_length) {
                continue;
            }
            if best.is_none_or(|b| hit.path_length < b.path_length()) {
                best = Some(SurfaceIntersection::new(hit, surface.as_ref()));
            }
        }
        trace!(
            candidates = self.surfaces.len(),
            found = best.is_some(),
            "approach surface search"
        );
        best
    }

    fn contained_surfaces(&self) -> &[Arc<dyn Surface>] {
        &self.surfaces
    }

    fn clone_with_shift(&self, shift: &Transform) -> Box<dyn ApproachDescriptor> {
        Box::new(Self::new(
            self.surfaces
                .iter()
                .map(|s| s.clone_with_shift(shift))
                .collect(),
        ))
    }
}
