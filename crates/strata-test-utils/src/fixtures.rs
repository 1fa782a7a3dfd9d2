//! Reusable layer fixtures.
//!
//! - [`standard_layer`]: 10x10 plane at a given z, thickness 1, nothing else.
//! - [`module_array`]: a square grid of sensitive modules with element ids.
//! - [`close_detached`]: close layers through a detached volume.

use std::sync::Arc;

use strata_core::{ElementId, Transform};
use strata_layer::{DetachedTrackingVolume, Layer, LayerType, PlaneLayer, PlaneLayerBuilder};
use strata_surface::{PlanarBounds, PlaneSurface, Surface, SurfaceArray, SurfaceGrid};

/// Half length of the standard layer.
pub const STANDARD_HALF: f64 = 5.0;

/// Thickness of the standard layer.
pub const STANDARD_THICKNESS: f64 = 1.0;

/// Builder for the standard 10x10 layer centred at `(0, 0, z)`.
pub fn standard_builder(z: f64) -> PlaneLayerBuilder {
    PlaneLayer::builder(
        Transform::translation(0.0, 0.0, z),
        PlanarBounds::rectangle(STANDARD_HALF, STANDARD_HALF).unwrap(),
    )
    .thickness(STANDARD_THICKNESS)
}

/// The standard 10x10 active layer centred at `(0, 0, z)`, thickness 1, with
/// no surface array and no approach descriptor.
pub fn standard_layer(z: f64) -> Layer {
    standard_builder(z).build().unwrap()
}

/// The standard layer with a given type.
pub fn standard_layer_of(z: f64, layer_type: LayerType) -> Layer {
    standard_builder(z).layer_type(layer_type).build().unwrap()
}

/// A square sensitive module of half size `half` centred at `(x, y, z)`.
pub fn module(x: f64, y: f64, z: f64, half: f64, element: u64) -> Arc<dyn Surface> {
    Arc::new(
        PlaneSurface::new(
            Transform::translation(x, y, z),
            PlanarBounds::rectangle(half, half).unwrap(),
        )
        .with_element(ElementId(element)),
    )
}

/// `n x n` unit modules tiling `[-n/2, n/2]^2` at height `z`, binned one
/// module per bin. Element ids run from 1 in row-major order.
pub fn module_array(n: usize, z: f64) -> SurfaceArray {
    let half_extent = n as f64 / 2.0;
    let mut surfaces = Vec::with_capacity(n * n);
    for iy in 0..n {
        for ix in 0..n {
            let x = ix as f64 + 0.5 - half_extent;
            let y = iy as f64 + 0.5 - half_extent;
            surfaces.push(module(x, y, z, 0.5, (iy * n + ix + 1) as u64));
        }
    }
    let grid = SurfaceGrid::new(
        Transform::translation(0.0, 0.0, z),
        (-half_extent, half_extent),
        (-half_extent, half_extent),
        n,
        n,
    )
    .unwrap();
    SurfaceArray::new(grid, surfaces).unwrap()
}

/// Close `layers` inside a detached volume with index `volume_index`.
///
/// Returns the volume (keep it alive to keep the back-references) and the
/// shared layers in input order.
pub fn close_detached(
    volume_index: u64,
    layers: Vec<Layer>,
) -> (Arc<DetachedTrackingVolume>, Vec<Arc<Layer>>) {
    let shared: Vec<Arc<Layer>> = layers.into_iter().map(Arc::new).collect();
    let volume = DetachedTrackingVolume::new("fixture", shared.clone());
    volume.close_geometry(volume_index).unwrap();
    (volume, shared)
}

/// Close a single layer and return it shared.
pub fn closed(layer: Layer) -> Arc<Layer> {
    let (_volume, mut layers) = close_detached(1, vec![layer]);
    layers.remove(0)
}
