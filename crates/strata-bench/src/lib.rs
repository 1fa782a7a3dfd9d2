//! Benchmark profiles and utilities for Strata layer navigation.
//!
//! Provides pre-built closed layers and deterministic track sets:
//!
//! - [`reference_profile`]: 20x20 modules (400 sensitive surfaces) on one layer
//! - [`stress_profile`]: 100x100 modules (10K sensitive surfaces)
//! - [`track_starts`]: deterministic start positions via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use strata_core::{ElementId, Position, Transform};
use strata_layer::{DetachedTrackingVolume, Layer, LayerError, PlaneLayer};
use strata_surface::{PlanarBounds, PlaneSurface, Surface, SurfaceArray, SurfaceGrid};

/// Height of the profile layers along z.
pub const LAYER_Z: f64 = 100.0;

/// A closed profile layer together with the volume keeping it enclosed.
#[derive(Debug)]
pub struct Profile {
    /// The enclosing volume; dropping it clears the layer back-reference.
    pub volume: Arc<DetachedTrackingVolume>,
    /// The closed layer.
    pub layer: Arc<Layer>,
}

/// Build a reference benchmark profile: 20x20 unit modules.
pub fn reference_profile() -> Result<Profile, LayerError> {
    module_layer(20)
}

/// Build a stress benchmark profile: 100x100 unit modules.
///
/// Same layout as [`reference_profile`] at 25x the module count.
pub fn stress_profile() -> Result<Profile, LayerError> {
    module_layer(100)
}

/// A closed layer at [`LAYER_Z`] tiled by `n x n` unit modules, one per bin.
pub fn module_layer(n: usize) -> Result<Profile, LayerError> {
    let half = n as f64 / 2.0;
    let mut modules: Vec<Arc<dyn Surface>> = Vec::with_capacity(n * n);
    for iy in 0..n {
        for ix in 0..n {
            let placement =
                Transform::translation(ix as f64 + 0.5 - half, iy as f64 + 0.5 - half, LAYER_Z);
            let plane = PlaneSurface::new(placement, PlanarBounds::rectangle(0.5, 0.5)?)
                .with_element(ElementId((iy * n + ix) as u64));
            modules.push(Arc::new(plane));
        }
    }
    let centre = Transform::translation(0.0, 0.0, LAYER_Z);
    let grid = SurfaceGrid::new(centre, (-half, half), (-half, half), n, n)?;
    let layer = PlaneLayer::builder(centre, PlanarBounds::rectangle(half, half)?)
        .thickness(2.0)
        .surface_array(SurfaceArray::new(grid, modules)?)
        .build()?;

    let layer = Arc::new(layer);
    let volume = DetachedTrackingVolume::new("bench", vec![Arc::clone(&layer)]);
    volume.close_geometry(1)?;
    Ok(Profile { volume, layer })
}

/// Generate deterministic track start positions below the profile layers.
///
/// Starts are spread over `[-extent, extent]^2` at `z = 0` using a linear
/// congruential sequence seeded by `seed`.
pub fn track_starts(count: usize, extent: f64, seed: u64) -> Vec<Position> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // Top 53 bits as a unit float.
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..count)
        .map(|_| {
            let x = (2.0 * next() - 1.0) * extent;
            let y = (2.0 * next() - 1.0) * extent;
            Position::new(x, y, 0.0)
        })
        .collect()
}
