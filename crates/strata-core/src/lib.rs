//! Core types for the Strata layer navigation workspace.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared by surfaces and layers: geometry identifiers, track
//! parameters, intersections, and the navigation options bundle that
//! steers every layer query.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod algebra;
pub mod error;
pub mod id;
pub mod intersection;
pub mod options;
pub mod track;

pub use algebra::{Direction, Position, Transform, ON_SURFACE_TOLERANCE};
pub use error::OptionsError;
pub use id::{ElementId, GeometryField, GeometryId, SurfaceInstanceId};
pub use intersection::{Intersection, ObjectIntersection};
pub use options::{BoundaryCheck, NavigationDirection, NavigationOptions, SearchDepth};
pub use track::{ChargedParameters, NeutralParameters, TrackParameters};
