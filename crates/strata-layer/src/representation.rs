//! Geometric representation capability of a layer.

use std::fmt::Debug;

use strata_core::Transform;
use strata_surface::Surface;

use crate::approach::ApproachDescriptor;

/// The geometry a concrete layer kind contributes to [`Layer`](crate::Layer).
///
/// A representation owns the single surface standing for the whole layer
/// and knows how to build the default approach surfaces for its shape.
/// Everything else (search, lifecycle, volume linkage) is generic layer
/// behaviour.
pub trait LayerRepresentation: Debug + Send + Sync {
    /// The surface standing for the whole layer.
    fn surface(&self) -> &dyn Surface;

    /// Default approach surfaces for a layer of the given thickness.
    ///
    /// Returns `None` when the shape has no sensible default; the layer
    /// then approaches through the representing surface itself.
    fn build_approach_descriptor(&self, thickness: f64) -> Option<Box<dyn ApproachDescriptor>>;

    /// A copy placed under an additional rigid `shift`.
    fn clone_with_shift(&self, shift: &Transform) -> Box<dyn LayerRepresentation>;
}
