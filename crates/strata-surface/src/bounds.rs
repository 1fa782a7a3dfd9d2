//! Finite extents of planar surfaces.

use nalgebra::Point2;
use strata_core::BoundaryCheck;

use crate::error::SurfaceError;

/// Extent of a planar surface in its local `(x, y)` frame, centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlanarBounds {
    /// Axis-aligned rectangle `[-half_x, half_x] x [-half_y, half_y]`.
    Rectangle {
        /// Half length along local x.
        half_x: f64,
        /// Half length along local y.
        half_y: f64,
    },
    /// Axis-aligned ellipse with semi-axes `radius_x`, `radius_y`.
    Ellipse {
        /// Semi-axis along local x.
        radius_x: f64,
        /// Semi-axis along local y.
        radius_y: f64,
    },
}

impl PlanarBounds {
    /// Rectangle bounds from half lengths.
    ///
    /// Both half lengths must be finite and strictly positive.
    pub fn rectangle(half_x: f64, half_y: f64) -> Result<Self, SurfaceError> {
        check_extent("half_x", half_x)?;
        check_extent("half_y", half_y)?;
        Ok(Self::Rectangle { half_x, half_y })
    }

    /// Ellipse bounds from semi-axes.
    ///
    /// Both semi-axes must be finite and strictly positive.
    pub fn ellipse(radius_x: f64, radius_y: f64) -> Result<Self, SurfaceError> {
        check_extent("radius_x", radius_x)?;
        check_extent("radius_y", radius_y)?;
        Ok(Self::Ellipse { radius_x, radius_y })
    }

    /// Whether a local point lies inside the bounds under `check`.
    ///
    /// [`BoundaryCheck::Unbounded`] accepts every point. A tolerance grows
    /// the bounds by that amount along each local axis.
    pub fn inside(&self, local: &Point2<f64>, check: BoundaryCheck) -> bool {
        let Some(tolerance) = check.tolerance() else {
            return true;
        };
        match *self {
            Self::Rectangle { half_x, half_y } => {
                local.x.abs() <= half_x + tolerance && local.y.abs() <= half_y + tolerance
            }
            Self::Ellipse { radius_x, radius_y } => {
                let rx = radius_x + tolerance;
                let ry = radius_y + tolerance;
                (local.x / rx).powi(2) + (local.y / ry).powi(2) <= 1.0
            }
        }
    }

    /// Half extents of the axis-aligned bounding box.
    pub fn half_extents(&self) -> (f64, f64) {
        match *self {
            Self::Rectangle { half_x, half_y } => (half_x, half_y),
            Self::Ellipse { radius_x, radius_y } => (radius_x, radius_y),
        }
    }

    /// Radius of the smallest origin-centred circle containing the bounds.
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            Self::Rectangle { half_x, half_y } => half_x.hypot(half_y),
            Self::Ellipse { radius_x, radius_y } => radius_x.max(radius_y),
        }
    }
}

fn check_extent(name: &str, value: f64) -> Result<(), SurfaceError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SurfaceError::InvalidBounds {
            reason: format!("{name} must be finite and positive, got {value}"),
        })
    }
}
