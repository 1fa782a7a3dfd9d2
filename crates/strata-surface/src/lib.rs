//! Surfaces and sensitive-surface collections for Strata layers.
//!
//! This crate defines the [`Surface`] trait, the geometric contract every
//! layer sub-structure is built from, together with one concrete backend
//! and the spatially binned [`SurfaceArray`].
//!
//! # Backends
//!
//! - [`PlaneSurface`]: a plane with optional [`PlanarBounds`] (rectangle or ellipse)
//!
//! # Sensitive surfaces
//!
//! A [`SurfaceArray`] owns the sensitive surfaces of a layer and answers
//! neighbourhood queries through its [`SurfaceGrid`] without scanning the
//! whole collection.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod bounds;
pub mod error;
pub mod material;
pub mod plane;
pub mod surface;

#[cfg(test)]
pub(crate) mod compliance;

pub use array::{SurfaceArray, SurfaceGrid};
pub use bounds::PlanarBounds;
pub use error::SurfaceError;
pub use material::SurfaceMaterial;
pub use plane::PlaneSurface;
pub use surface::{Surface, SurfaceIntersection};
