//! Algebra aliases over `nalgebra` used across the workspace.

use nalgebra::{Isometry3, Point3, Unit, Vector3};

/// A global position in millimetres.
pub type Position = Point3<f64>;

/// A unit-length direction vector.
pub type Direction = Unit<Vector3<f64>>;

/// A rigid transform placing a local frame in the global frame.
pub type Transform = Isometry3<f64>;

/// Distance below which a point counts as lying on a surface.
pub const ON_SURFACE_TOLERANCE: f64 = 1e-4;
