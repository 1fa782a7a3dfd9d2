//! Navigable detector layers for Strata.
//!
//! A [`Layer`] is a thin slab of detector described by three kinds of
//! sub-structure: a representing surface standing for the whole layer, an
//! optional [`SurfaceArray`](strata_surface::SurfaceArray) of sensitive
//! surfaces and optional approach surfaces. For a trajectory state it
//! answers which of those surfaces the track may cross, in forward order
//! ([`Layer::compatible_surfaces`]), and through which surface it enters
//! the layer ([`Layer::surface_on_approach`]).
//!
//! # Lifecycle
//!
//! Layers are built once (for planar layers through
//! [`PlaneLayer::builder`]), then closed and enclosed by a volume:
//! [`TrackingVolume::close_geometry`] or
//! [`DetachedTrackingVolume::close_geometry`]. Navigation queries require a
//! closed layer; closed layers are immutable and safe to share across
//! threads.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use nalgebra::Vector3;
//! use strata_core::{NavigationOptions, NeutralParameters, Position, Transform};
//! use strata_layer::{DetachedTrackingVolume, PlaneLayer};
//! use strata_surface::PlanarBounds;
//!
//! let layer = Arc::new(
//!     PlaneLayer::builder(
//!         Transform::translation(0.0, 0.0, 5.0),
//!         PlanarBounds::rectangle(5.0, 5.0).unwrap(),
//!     )
//!     .thickness(1.0)
//!     .build()
//!     .unwrap(),
//! );
//! let volume = DetachedTrackingVolume::new("demo", vec![Arc::clone(&layer)]);
//! volume.close_geometry(1).unwrap();
//!
//! let track = NeutralParameters::ray(Position::origin(), Vector3::z_axis());
//! let options = NavigationOptions::new().with_resolve(false, false, true);
//! let hits = layer.compatible_surfaces(&track, &options).unwrap();
//!
//! // The default approach planes carry no material, so only the
//! // representing plane is crossed.
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].path_length(), 5.0);
//! assert!(hits[0].object.same_as(layer.surface_representation()));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod approach;
pub mod corrector;
pub mod error;
pub mod layer;
pub mod layer_array;
pub mod plane_layer;
pub mod representation;
pub mod substructure;
pub mod volume;

pub use approach::{ApproachDescriptor, GenericApproachDescriptor};
pub use corrector::{Corrector, VoidCorrector};
pub use error::LayerError;
pub use layer::{DetectorElements, Layer, LayerType};
pub use layer_array::{BinningAxis, LayerArray};
pub use plane_layer::{PlaneLayer, PlaneLayerBuilder};
pub use representation::LayerRepresentation;
pub use substructure::{SubStructure, SubStructureCodes};
pub use volume::{AbstractVolume, DetachedTrackingVolume, TrackingVolume};
