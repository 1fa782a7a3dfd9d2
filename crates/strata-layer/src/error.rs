//! Error types for layer construction and the layer lifecycle.

use strata_core::{GeometryField, GeometryId, OptionsError};
use strata_surface::SurfaceError;

/// Errors arising from layer construction, closure, enclosure or queries.
///
/// Geometric misses are never errors: a query that finds nothing returns an
/// empty result. These variants report broken preconditions and invalid
/// construction input.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayerError {
    /// A query or enclosure was attempted before the layer was closed.
    #[error("layer geometry is not closed")]
    NotClosed,
    /// The layer was already closed with the given identifier.
    #[error("layer geometry already closed as {existing}")]
    AlreadyClosed {
        /// Identifier assigned by the first closure.
        existing: GeometryId,
    },
    /// The layer already has an enclosing volume.
    #[error("layer is already enclosed by a volume")]
    AlreadyEnclosed,
    /// Neighbouring layers were recorded before.
    #[error("layer neighbours are already set")]
    NeighboursAlreadySet,
    /// A representing volume was registered before.
    #[error("layer already has a representing volume")]
    RepresentingVolumeAlreadyRegistered,
    /// An index does not fit its geometry identifier field.
    #[error("{field} index {value} exceeds the identifier maximum {}", .field.max())]
    IdentifierOverflow {
        /// The overflowing field.
        field: GeometryField,
        /// The rejected index.
        value: u64,
    },
    /// The same layer appears twice in one volume.
    #[error("layer at position {index} appears earlier in the same volume")]
    DuplicateLayer {
        /// Position of the repeated entry.
        index: usize,
    },
    /// Envelope is negative or not finite.
    #[error("layer envelope must be finite and non-negative, got {value}")]
    InvalidEnvelope {
        /// The rejected envelope.
        value: f64,
    },
    /// Thickness is negative or not finite.
    #[error("layer thickness must be finite and non-negative, got {value}")]
    InvalidThickness {
        /// The rejected thickness.
        value: f64,
    },
    /// Volume parameters are unusable.
    #[error("invalid volume: {reason}")]
    InvalidVolume {
        /// What went wrong.
        reason: String,
    },
    /// Surface construction failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    /// Navigation options failed validation.
    #[error(transparent)]
    Options(#[from] OptionsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_closed_reports_identifier() {
        let err = LayerError::AlreadyClosed {
            existing: GeometryId::new().with_volume(1).with_layer(2),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("layer geometry already closed as "));
        assert!(msg.contains("vol=1"));
    }

    #[test]
    fn identifier_overflow_names_field_and_limit() {
        let err = LayerError::IdentifierOverflow {
            field: GeometryField::Volume,
            value: 256,
        };
        assert_eq!(
            err.to_string(),
            "volume index 256 exceeds the identifier maximum 255"
        );
    }

    #[test]
    fn options_error_converts() {
        let err: LayerError = OptionsError::InvalidPathLimit { value: -1.0 }.into();
        assert!(matches!(err, LayerError::Options(_)));
    }
}
