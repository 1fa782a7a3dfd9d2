//! Planar layers.

use std::sync::Arc;

use nalgebra::{Translation3, Vector3};
use strata_core::{Position, Transform};
use strata_surface::{
    PlanarBounds, PlaneSurface, Surface, SurfaceArray, SurfaceError, SurfaceGrid, SurfaceMaterial,
};
use tracing::debug;

use crate::approach::{ApproachDescriptor, GenericApproachDescriptor};
use crate::error::LayerError;
use crate::layer::{Layer, LayerType};
use crate::representation::LayerRepresentation;

/// Representation of a flat layer: a bounded plane.
///
/// The default approach surfaces are two copies of the plane, without
/// material, offset by half the thickness along the normal.
#[derive(Debug)]
pub struct PlaneLayer {
    surface: PlaneSurface,
}

impl PlaneLayer {
    /// Start building a planar layer placed at `transform` with `bounds`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_core::Transform;
    /// use strata_layer::{LayerType, PlaneLayer};
    /// use strata_surface::PlanarBounds;
    ///
    /// let layer = PlaneLayer::builder(
    ///     Transform::translation(0.0, 0.0, 50.0),
    ///     PlanarBounds::rectangle(5.0, 5.0).unwrap(),
    /// )
    /// .thickness(1.0)
    /// .layer_type(LayerType::Passive)
    /// .build()
    /// .unwrap();
    /// assert_eq!(layer.thickness(), 1.0);
    /// assert!(!layer.is_closed());
    /// ```
    pub fn builder(transform: Transform, bounds: PlanarBounds) -> PlaneLayerBuilder {
        PlaneLayerBuilder {
            transform,
            bounds,
            surface_array: None,
            thickness: 0.0,
            approach_descriptor: None,
            layer_type: LayerType::default(),
            material: None,
        }
    }

    /// Build an active planar layer around module `surfaces`.
    ///
    /// The layer is centred on the global extent of the modules, with its
    /// normal along global z. Bounded planar modules contribute the corners
    /// of their bounding box; any other surface contributes its centre. The
    /// rectangle covers the extent in x and y widened by `envelope_xy` on
    /// every side, and the thickness covers the extent in z plus
    /// `envelope_z` on each face. Modules are binned `bins_x * bins_y` over
    /// the rectangle.
    ///
    /// Fails with [`LayerError::InvalidEnvelope`] for a negative or
    /// non-finite envelope, and with [`LayerError::Surface`] for an empty
    /// module list, a zero bin count or an extent with no area.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use strata_core::Transform;
    /// use strata_layer::PlaneLayer;
    /// use strata_surface::{PlanarBounds, PlaneSurface, Surface};
    ///
    /// let modules: Vec<Arc<dyn Surface>> = [-1.0, 1.0]
    ///     .into_iter()
    ///     .map(|x| {
    ///         Arc::new(PlaneSurface::new(
    ///             Transform::translation(x, 0.0, 20.0),
    ///             PlanarBounds::rectangle(1.0, 1.0).unwrap(),
    ///         )) as Arc<dyn Surface>
    ///     })
    ///     .collect();
    /// let layer = PlaneLayer::from_surfaces(modules, 0.5, 0.25, 2, 1).unwrap();
    /// assert_eq!(layer.thickness(), 0.5);
    /// assert_eq!(layer.surface_array().unwrap().len(), 2);
    /// ```
    pub fn from_surfaces(
        surfaces: Vec<Arc<dyn Surface>>,
        envelope_xy: f64,
        envelope_z: f64,
        bins_x: usize,
        bins_y: usize,
    ) -> Result<Layer, LayerError> {
        for value in [envelope_xy, envelope_z] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LayerError::InvalidEnvelope { value });
            }
        }
        if surfaces.is_empty() {
            return Err(SurfaceError::EmptyArray.into());
        }

        let mut lower = Vector3::repeat(f64::INFINITY);
        let mut upper = Vector3::repeat(f64::NEG_INFINITY);
        for corner in surfaces.iter().flat_map(|surface| module_corners(surface.as_ref())) {
            lower = lower.inf(&corner.coords);
            upper = upper.sup(&corner.coords);
        }
        let center = 0.5 * (lower + upper);
        let half = 0.5 * (upper - lower);
        let half_x = half.x + envelope_xy;
        let half_y = half.y + envelope_xy;
        let thickness = 2.0 * (half.z + envelope_z);

        let transform = Transform::translation(center.x, center.y, center.z);
        let grid = SurfaceGrid::new(
            transform,
            (-half_x, half_x),
            (-half_y, half_y),
            bins_x,
            bins_y,
        )?;
        let bounds = PlanarBounds::rectangle(half_x, half_y)?;
        debug!(
            modules = surfaces.len(),
            half_x, half_y, thickness, "plane layer sized from modules"
        );
        Self::builder(transform, bounds)
            .surface_array(SurfaceArray::new(grid, surfaces)?)
            .thickness(thickness)
            .build()
    }

    /// The representing plane.
    pub fn plane(&self) -> &PlaneSurface {
        &self.surface
    }

    fn offset_plane(&self, offset: f64) -> Arc<dyn Surface> {
        let transform = self.surface.transform() * Translation3::new(0.0, 0.0, offset);
        match self.surface.bounds() {
            Some(bounds) => Arc::new(PlaneSurface::new(transform, *bounds)),
            None => Arc::new(PlaneSurface::infinite(transform)),
        }
    }
}

/// Points spanning the global extent of a module.
fn module_corners(surface: &dyn Surface) -> Vec<Position> {
    let bounded = surface
        .downcast_ref::<PlaneSurface>()
        .and_then(|plane| Some((plane.transform(), plane.bounds()?)));
    match bounded {
        Some((transform, bounds)) => {
            let (hx, hy) = bounds.half_extents();
            [(-hx, -hy), (hx, -hy), (hx, hy), (-hx, hy)]
                .into_iter()
                .map(|(x, y)| transform * Position::new(x, y, 0.0))
                .collect()
        }
        None => vec![surface.center()],
    }
}

impl LayerRepresentation for PlaneLayer {
    fn surface(&self) -> &dyn Surface {
        &self.surface
    }

    fn build_approach_descriptor(&self, thickness: f64) -> Option<Box<dyn ApproachDescriptor>> {
        let half = 0.5 * thickness;
        Some(Box::new(GenericApproachDescriptor::new(vec![
            self.offset_plane(-half),
            self.offset_plane(half),
        ])))
    }

    fn clone_with_shift(&self, shift: &Transform) -> Box<dyn LayerRepresentation> {
        let transform = shift * self.surface.transform();
        let mut surface = match self.surface.bounds() {
            Some(bounds) => PlaneSurface::new(transform, *bounds),
            None => PlaneSurface::infinite(transform),
        };
        if let Some(material) = self.surface.material() {
            surface = surface.with_material(*material);
        }
        Box::new(Self { surface })
    }
}

/// Builder for planar [`Layer`]s.
///
/// Defaults: no surface array, thickness `0`, no approach descriptor (one
/// is built at closure), [`LayerType::Active`], no material.
#[derive(Debug)]
#[must_use]
pub struct PlaneLayerBuilder {
    transform: Transform,
    bounds: PlanarBounds,
    surface_array: Option<SurfaceArray>,
    thickness: f64,
    approach_descriptor: Option<Box<dyn ApproachDescriptor>>,
    layer_type: LayerType,
    material: Option<SurfaceMaterial>,
}

impl PlaneLayerBuilder {
    /// Sensitive surfaces of the layer.
    pub fn surface_array(mut self, array: SurfaceArray) -> Self {
        self.surface_array = Some(array);
        self
    }

    /// Extent along the plane normal.
    pub fn thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Pre-built approach surfaces, replacing the default.
    pub fn approach_descriptor(mut self, descriptor: Box<dyn ApproachDescriptor>) -> Self {
        self.approach_descriptor = Some(descriptor);
        self
    }

    /// Role of the layer.
    pub fn layer_type(mut self, layer_type: LayerType) -> Self {
        self.layer_type = layer_type;
        self
    }

    /// Material on the representing plane.
    pub fn material(mut self, material: SurfaceMaterial) -> Self {
        self.material = Some(material);
        self
    }

    /// Build the layer.
    ///
    /// Fails with [`LayerError::InvalidThickness`] for a negative or
    /// non-finite thickness.
    pub fn build(self) -> Result<Layer, LayerError> {
        let mut surface = PlaneSurface::new(self.transform, self.bounds);
        if let Some(material) = self.material {
            surface = surface.with_material(material);
        }
        Layer::new(
            Box::new(PlaneLayer { surface }),
            self.surface_array,
            self.thickness,
            self.approach_descriptor,
            self.layer_type,
        )
    }
}
