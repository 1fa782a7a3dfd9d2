//! Volumes that own, close and enclose layers.
//!
//! Volumes are the only collaborators allowed to drive the layer lifecycle:
//! [`TrackingVolume::close_geometry`] and
//! [`DetachedTrackingVolume::close_geometry`] assign identifiers, close each
//! layer and set its back-reference. [`AbstractVolume`] is a plain box whose
//! boundary can stand in for a layer's approach surfaces.

use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use indexmap::IndexSet;
use nalgebra::{Translation3, UnitQuaternion, Vector3};
use strata_core::{GeometryField, GeometryId, Position, Transform};
use strata_surface::{PlanarBounds, PlaneSurface, Surface};
use tracing::debug;

use crate::error::LayerError;
use crate::layer::{checked_id, Closure, Layer};
use crate::layer_array::LayerArray;

/// A cuboid volume: `[-half_x, half_x] x [-half_y, half_y] x [-half_z, half_z]`
/// in the local frame of its transform.
#[derive(Clone, Debug, PartialEq)]
pub struct AbstractVolume {
    transform: Transform,
    half_lengths: Vector3<f64>,
}

impl AbstractVolume {
    /// Create a cuboid. Half lengths must be finite and positive.
    pub fn new(
        transform: Transform,
        half_x: f64,
        half_y: f64,
        half_z: f64,
    ) -> Result<Self, LayerError> {
        for (name, value) in [("half_x", half_x), ("half_y", half_y), ("half_z", half_z)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayerError::InvalidVolume {
                    reason: format!("{name} must be finite and positive, got {value}"),
                });
            }
        }
        Ok(Self {
            transform,
            half_lengths: Vector3::new(half_x, half_y, half_z),
        })
    }

    /// Placement of the volume.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Half lengths along local x, y and z.
    pub fn half_lengths(&self) -> &Vector3<f64> {
        &self.half_lengths
    }

    /// Whether a global position lies inside (or on) the volume.
    pub fn contains(&self, position: &Position) -> bool {
        let local = self.transform.inverse_transform_point(position);
        local
            .coords
            .iter()
            .zip(self.half_lengths.iter())
            .all(|(c, h)| c.abs() <= *h)
    }

    /// The six faces, in the order -z, +z, -x, +x, -y, +y.
    ///
    /// Every face is a fresh plane whose normal lies along its axis.
    pub fn boundary_surfaces(&self) -> Vec<Arc<dyn Surface>> {
        let h = self.half_lengths;
        let along_x = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let along_y = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2);
        let faces = [
            (Translation3::new(0.0, 0.0, -h.z), UnitQuaternion::identity(), h.x, h.y),
            (Translation3::new(0.0, 0.0, h.z), UnitQuaternion::identity(), h.x, h.y),
            (Translation3::new(-h.x, 0.0, 0.0), along_x, h.z, h.y),
            (Translation3::new(h.x, 0.0, 0.0), along_x, h.z, h.y),
            (Translation3::new(0.0, -h.y, 0.0), along_y, h.x, h.z),
            (Translation3::new(0.0, h.y, 0.0), along_y, h.x, h.z),
        ];
        faces
            .into_iter()
            .filter_map(|(translation, rotation, half_x, half_y)| {
                let placement = self.transform * Transform::from_parts(translation, rotation);
                let bounds = PlanarBounds::rectangle(half_x, half_y).ok()?;
                Some(Arc::new(PlaneSurface::new(placement, bounds)) as Arc<dyn Surface>)
            })
            .collect()
    }
}

/// A volume holding an ordered [`LayerArray`].
///
/// Closing the volume closes every layer, links each layer to its
/// neighbours along the array axis and encloses it.
#[derive(Debug)]
pub struct TrackingVolume {
    name: String,
    layers: LayerArray,
}

impl TrackingVolume {
    /// Create a volume around `layers`.
    pub fn new(name: impl Into<String>, layers: LayerArray) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            layers,
        })
    }

    /// Name of the volume.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The contained layers.
    pub fn layers(&self) -> &LayerArray {
        &self.layers
    }

    /// The layer whose bin contains `position`.
    pub fn layer_at(&self, position: &Position) -> Option<&Arc<Layer>> {
        self.layers.layer_at(position)
    }

    /// Close and enclose every layer.
    ///
    /// Layer `i` (in axis order) gets layer index `i + 1` under
    /// `volume_index`. Every layer is checked before any is changed: if one
    /// is already closed, appears twice, or an index overflows its
    /// identifier field, the error is returned and no layer is touched.
    pub fn close_geometry(self: &Arc<Self>, volume_index: u64) -> Result<(), LayerError> {
        let layers = self.layers.layers();
        let (volume_id, closures) = prepare_layers(volume_index, layers)?;
        for (layer, closure) in layers.iter().zip(closures) {
            layer.commit_closure(closure)?;
        }
        for (index, layer) in layers.iter().enumerate() {
            let previous = index.checked_sub(1).and_then(|p| layers.get(p));
            layer.set_next_layers(previous, layers.get(index + 1), self.layers.axis())?;
            layer.enclose_tracking_volume(Arc::downgrade(self))?;
        }
        debug!(
            volume = %self.name,
            id = %volume_id,
            layers = layers.len(),
            "closed tracking volume"
        );
        Ok(())
    }
}

/// A volume with free-standing layers and no neighbour ordering.
#[derive(Debug)]
pub struct DetachedTrackingVolume {
    name: String,
    layers: Vec<Arc<Layer>>,
}

impl DetachedTrackingVolume {
    /// Create a detached volume around `layers`.
    pub fn new(name: impl Into<String>, layers: Vec<Arc<Layer>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            layers,
        })
    }

    /// Name of the volume.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The contained layers, in insertion order.
    pub fn layers(&self) -> &[Arc<Layer>] {
        &self.layers
    }

    /// Close and enclose every layer; layer `i` gets layer index `i + 1`.
    ///
    /// Like [`TrackingVolume::close_geometry`], all layers are checked
    /// before any is changed.
    pub fn close_geometry(self: &Arc<Self>, volume_index: u64) -> Result<(), LayerError> {
        let (volume_id, closures) = prepare_layers(volume_index, &self.layers)?;
        for (layer, closure) in self.layers.iter().zip(closures) {
            layer.commit_closure(closure)?;
            layer.enclose_detached_tracking_volume(Arc::downgrade(self))?;
        }
        debug!(
            volume = %self.name,
            id = %volume_id,
            layers = self.layers.len(),
            "closed detached volume"
        );
        Ok(())
    }
}

/// Closure state for every layer of a volume, computed without changing
/// any of them.
fn prepare_layers(
    volume_index: u64,
    layers: &[Arc<Layer>],
) -> Result<(GeometryId, Vec<Closure>), LayerError> {
    let volume_id = checked_id(GeometryId::new(), GeometryField::Volume, volume_index)?;
    let mut seen = IndexSet::with_capacity(layers.len());
    let mut closures = Vec::with_capacity(layers.len());
    for (index, layer) in layers.iter().enumerate() {
        if !seen.insert(Arc::as_ptr(layer)) {
            return Err(LayerError::DuplicateLayer { index });
        }
        let layer_id = checked_id(volume_id, GeometryField::Layer, index as u64 + 1)?;
        closures.push(layer.prepare_closure(layer_id)?);
    }
    Ok((volume_id, closures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerType;
    use crate::layer_array::BinningAxis;
    use crate::plane_layer::PlaneLayer;
    use approx::assert_relative_eq;
    use strata_core::BoundaryCheck;

    fn layer_at_z(z: f64) -> Arc<Layer> {
        Arc::new(
            PlaneLayer::builder(
                Transform::translation(0.0, 0.0, z),
                PlanarBounds::rectangle(5.0, 5.0).unwrap(),
            )
            .thickness(1.0)
            .layer_type(LayerType::Passive)
            .build()
            .unwrap(),
        )
    }

    #[test]
    fn volume_rejects_bad_half_lengths() {
        let id = Transform::identity();
        assert!(AbstractVolume::new(id, 1.0, 0.0, 1.0).is_err());
        assert!(AbstractVolume::new(id, 1.0, 1.0, f64::NAN).is_err());
        assert!(AbstractVolume::new(id, 1.0, 2.0, 3.0).is_ok());
    }

    #[test]
    fn boundary_faces_sit_on_the_box() {
        let volume = AbstractVolume::new(Transform::translation(1.0, 2.0, 3.0), 1.0, 2.0, 3.0)
            .unwrap();
        let faces = volume.boundary_surfaces();
        assert_eq!(faces.len(), 6);
        let corners = [
            Position::new(0.0, 0.0, 0.0),
            Position::new(2.0, 4.0, 6.0),
        ];
        for face in &faces {
            assert!(volume.contains(&face.center()));
            let on_face = corners
                .iter()
                .filter(|c| face.is_on_surface(c, BoundaryCheck::Tolerance { tolerance: 1e-9 }))
                .count();
            assert_eq!(on_face, 1, "face {:?} touches one of two opposite corners", face.center());
        }
        assert_relative_eq!(faces[1].center(), Position::new(1.0, 2.0, 6.0));
        assert_relative_eq!(faces[3].center(), Position::new(2.0, 2.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(faces[5].center(), Position::new(1.0, 4.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn contains_checks_all_axes() {
        let volume = AbstractVolume::new(Transform::identity(), 1.0, 2.0, 3.0).unwrap();
        assert!(volume.contains(&Position::new(1.0, -2.0, 3.0)));
        assert!(!volume.contains(&Position::new(0.0, 2.1, 0.0)));
    }

    #[test]
    fn tracking_volume_closes_encloses_and_links() {
        let array = LayerArray::new(
            BinningAxis::Z,
            vec![layer_at_z(20.0), layer_at_z(10.0), layer_at_z(30.0)],
        );
        let volume = TrackingVolume::new("barrel", array);
        volume.close_geometry(4).unwrap();

        for (index, layer) in volume.layers().iter().enumerate() {
            let id = layer.geometry_id().unwrap();
            assert_eq!(id.volume(), 4);
            assert_eq!(id.layer(), index as u64 + 1);
            let enclosing = layer.tracking_volume().unwrap();
            assert!(Arc::ptr_eq(&enclosing, &volume));
            assert!(layer.enclosing_detached_volume().is_none());
        }

        let middle = &volume.layers().layers()[1];
        let up = middle
            .next_layer(&Position::new(0.0, 0.0, 20.0), &Vector3::z_axis())
            .unwrap()
            .unwrap();
        assert_relative_eq!(up.surface_representation().center().z, 30.0);
        let down = middle
            .next_layer(&Position::new(0.0, 0.0, 20.0), &-Vector3::z_axis())
            .unwrap()
            .unwrap();
        assert_relative_eq!(down.surface_representation().center().z, 10.0);

        let first = &volume.layers().layers()[0];
        assert!(first
            .next_layer(&Position::new(0.0, 0.0, 10.0), &-Vector3::z_axis())
            .unwrap()
            .is_none());
    }

    #[test]
    fn second_volume_cannot_reclose_shared_layer() {
        let shared = layer_at_z(0.0);
        let a = DetachedTrackingVolume::new("a", vec![Arc::clone(&shared)]);
        let b = DetachedTrackingVolume::new("b", vec![Arc::clone(&shared)]);
        a.close_geometry(1).unwrap();
        let err = b.close_geometry(2).unwrap_err();
        assert!(matches!(err, LayerError::AlreadyClosed { existing } if existing.volume() == 1));
        assert!(Arc::ptr_eq(&shared.enclosing_detached_volume().unwrap(), &a));
    }

    #[test]
    fn failed_closure_leaves_other_layers_untouched() {
        let fresh = layer_at_z(-10.0);
        let taken = layer_at_z(10.0);
        let a = DetachedTrackingVolume::new("a", vec![Arc::clone(&taken)]);
        a.close_geometry(1).unwrap();

        let b = TrackingVolume::new(
            "b",
            LayerArray::new(BinningAxis::Z, vec![Arc::clone(&fresh), Arc::clone(&taken)]),
        );
        assert!(matches!(
            b.close_geometry(2),
            Err(LayerError::AlreadyClosed { .. })
        ));
        assert!(!fresh.is_closed());
        assert!(fresh.tracking_volume().is_none());

        let c = DetachedTrackingVolume::new("c", vec![Arc::clone(&fresh)]);
        c.close_geometry(3).unwrap();
        assert_eq!(fresh.geometry_id().map(GeometryId::volume), Some(3));
        assert!(Arc::ptr_eq(&fresh.enclosing_detached_volume().unwrap(), &c));
    }

    #[test]
    fn repeated_layer_is_rejected() {
        let layer = layer_at_z(0.0);
        let volume = DetachedTrackingVolume::new("twice", vec![Arc::clone(&layer), Arc::clone(&layer)]);
        assert_eq!(
            volume.close_geometry(1).unwrap_err(),
            LayerError::DuplicateLayer { index: 1 }
        );
        assert!(!layer.is_closed());
    }

    #[test]
    fn volume_index_must_fit_identifier() {
        let layer = layer_at_z(0.0);
        let volume = DetachedTrackingVolume::new("wide", vec![Arc::clone(&layer)]);
        assert_eq!(
            volume.close_geometry(256).unwrap_err(),
            LayerError::IdentifierOverflow {
                field: GeometryField::Volume,
                value: 256,
            }
        );
        assert!(matches!(
            volume.close_geometry(257),
            Err(LayerError::IdentifierOverflow { value: 257, .. })
        ));
        assert!(!layer.is_closed());
        volume.close_geometry(255).unwrap();
        assert_eq!(layer.geometry_id().map(GeometryId::volume), Some(255));
    }

    #[test]
    fn layer_count_must_fit_identifier() {
        let layers: Vec<Arc<Layer>> = (0..=GeometryField::Layer.max())
            .map(|i| layer_at_z(i as f64))
            .collect();
        let volume = DetachedTrackingVolume::new("crowded", layers.clone());
        assert_eq!(
            volume.close_geometry(1).unwrap_err(),
            LayerError::IdentifierOverflow {
                field: GeometryField::Layer,
                value: 4096,
            }
        );
        assert!(layers.iter().all(|layer| !layer.is_closed()));
    }

    #[test]
    fn approach_count_must_fit_identifier() {
        let surfaces: Vec<Arc<dyn Surface>> = (0..=GeometryField::Approach.max())
            .map(|i| {
                Arc::new(PlaneSurface::infinite(Transform::translation(0.0, 0.0, i as f64)))
                    as Arc<dyn Surface>
            })
            .collect();
        let layer = Arc::new(
            PlaneLayer::builder(Transform::identity(), PlanarBounds::rectangle(1.0, 1.0).unwrap())
                .approach_descriptor(Box::new(crate::approach::GenericApproachDescriptor::new(
                    surfaces,
                )))
                .build()
                .unwrap(),
        );
        let volume = DetachedTrackingVolume::new("approaches", vec![Arc::clone(&layer)]);
        assert_eq!(
            volume.close_geometry(1).unwrap_err(),
            LayerError::IdentifierOverflow {
                field: GeometryField::Approach,
                value: 256,
            }
        );
        assert!(!layer.is_closed());
    }

    #[test]
    fn dropped_volume_leaves_no_dangling_link() {
        let layer = layer_at_z(0.0);
        {
            let volume = DetachedTrackingVolume::new("transient", vec![Arc::clone(&layer)]);
            volume.close_geometry(1).unwrap();
            assert!(layer.enclosing_detached_volume().is_some());
        }
        assert!(layer.enclosing_detached_volume().is_none());
        assert!(layer.is_closed());
    }
}
