//! Strata: navigable detector layers for particle trajectory reconstruction.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Strata sub-crates. For most users, adding `strata` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use strata::prelude::*;
//!
//! // A 10x10 layer at z = 5 with a single sensitive module at its centre.
//! let module: Arc<dyn Surface> = Arc::new(
//!     PlaneSurface::new(
//!         Transform::translation(0.0, 0.0, 5.0),
//!         PlanarBounds::rectangle(1.0, 1.0).unwrap(),
//!     )
//!     .with_element(ElementId(17)),
//! );
//! let layer = Arc::new(
//!     PlaneLayer::builder(
//!         Transform::translation(0.0, 0.0, 5.0),
//!         PlanarBounds::rectangle(5.0, 5.0).unwrap(),
//!     )
//!     .thickness(1.0)
//!     .surface_array(SurfaceArray::single(vec![module]).unwrap())
//!     .build()
//!     .unwrap(),
//! );
//! let volume = DetachedTrackingVolume::new("quick start", vec![Arc::clone(&layer)]);
//! volume.close_geometry(1).unwrap();
//!
//! let track = NeutralParameters::ray(Position::origin(), strata::Vector3::z_axis());
//! let options = NavigationOptions::new().with_resolve(true, false, false);
//! let hits = layer.compatible_surfaces(&track, &options).unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].object.associated_element(), Some(ElementId(17)));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | IDs, track parameters, intersections, navigation options |
//! | [`surface`] | `strata-surface` | Surface trait, planes, bounds, material, surface arrays |
//! | [`layer`] | `strata-layer` | Layers, approach descriptors, correctors, volumes |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`strata-core`).
///
/// Contains geometry identifiers, [`types::TrackParameters`],
/// [`types::Intersection`] and the [`types::NavigationOptions`] bundle.
pub use strata_core as types;

/// Surfaces and surface arrays (`strata-surface`).
///
/// Provides the [`surface::Surface`] trait, [`surface::PlaneSurface`] and the
/// binned [`surface::SurfaceArray`].
pub use strata_surface as surface;

/// Layers and volumes (`strata-layer`).
///
/// [`layer::Layer`] answers navigation queries once a
/// [`layer::TrackingVolume`] or [`layer::DetachedTrackingVolume`] has closed
/// it.
pub use strata_layer as layer;

/// Linear algebra vector type used for directions.
pub use nalgebra::Vector3;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
///
/// This imports the most frequently used types: geometry primitives, track
/// parameters, navigation options, surfaces, layers and volumes.
pub mod prelude {
    // Core types
    pub use strata_core::{
        BoundaryCheck, ChargedParameters, Direction, ElementId, GeometryId, Intersection,
        NavigationDirection, NavigationOptions, NeutralParameters, Position, SearchDepth,
        TrackParameters, Transform,
    };

    // Errors
    pub use strata_core::OptionsError;
    pub use strata_layer::LayerError;
    pub use strata_surface::SurfaceError;

    // Surfaces
    pub use strata_surface::{
        PlanarBounds, PlaneSurface, Surface, SurfaceArray, SurfaceGrid, SurfaceIntersection,
        SurfaceMaterial,
    };

    // Layers
    pub use strata_layer::{
        ApproachDescriptor, Corrector, GenericApproachDescriptor, Layer, LayerType, PlaneLayer,
    };

    // Volumes
    pub use strata_layer::{BinningAxis, DetachedTrackingVolume, LayerArray, TrackingVolume};
}
