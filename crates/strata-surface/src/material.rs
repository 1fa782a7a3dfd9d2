//! Material attached to a surface.

use crate::error::SurfaceError;

/// Homogeneous material slab projected onto a surface.
///
/// Layers only ask whether a surface carries material; the slab values are
/// for the consumers of the navigation result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMaterial {
    thickness: f64,
    radiation_length: f64,
}

impl SurfaceMaterial {
    /// Create a slab of `thickness` with radiation length `radiation_length`.
    ///
    /// Both values must be finite and strictly positive.
    pub fn new(thickness: f64, radiation_length: f64) -> Result<Self, SurfaceError> {
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(SurfaceError::InvalidMaterial {
                reason: format!("thickness must be finite and positive, got {thickness}"),
            });
        }
        if !(radiation_length.is_finite() && radiation_length > 0.0) {
            return Err(SurfaceError::InvalidMaterial {
                reason: format!(
                    "radiation length must be finite and positive, got {radiation_length}"
                ),
            });
        }
        Ok(Self {
            thickness,
            radiation_length,
        })
    }

    /// Slab thickness.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Radiation length X0.
    pub fn radiation_length(&self) -> f64 {
        self.radiation_length
    }

    /// Thickness in units of X0.
    pub fn thickness_in_x0(&self) -> f64 {
        self.thickness / self.radiation_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thickness_in_x0() {
        let m = SurfaceMaterial::new(0.3, 93.7).unwrap();
        assert!((m.thickness_in_x0() - 0.3 / 93.7).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(SurfaceMaterial::new(0.0, 1.0).is_err());
        assert!(SurfaceMaterial::new(1.0, -1.0).is_err());
        assert!(SurfaceMaterial::new(f64::NAN, 1.0).is_err());
    }
}
