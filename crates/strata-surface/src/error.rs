//! Error types for surface construction.

/// Errors arising from surface, bounds or surface-array construction.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    /// Bounds parameters are not finite and positive.
    #[error("invalid bounds: {reason}")]
    InvalidBounds {
        /// What went wrong.
        reason: String,
    },
    /// Material parameters are not finite and positive.
    #[error("invalid material: {reason}")]
    InvalidMaterial {
        /// What went wrong.
        reason: String,
    },
    /// Grid ranges or bin counts are unusable.
    #[error("invalid surface grid: {reason}")]
    InvalidGrid {
        /// What went wrong.
        reason: String,
    },
    /// Attempted to build a surface array without surfaces.
    #[error("surface array must contain at least one surface")]
    EmptyArray,
}
