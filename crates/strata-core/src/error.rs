//! Error types for navigation configuration.

/// Errors detected by [`NavigationOptions::validate`](crate::NavigationOptions::validate).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OptionsError {
    /// The path limit is NaN or negative.
    #[error("path limit must be a non-negative number, got {value}")]
    InvalidPathLimit {
        /// The rejected limit.
        value: f64,
    },
    /// A boundary-check tolerance is NaN, infinite or negative.
    #[error("boundary tolerance must be finite and non-negative, got {value}")]
    InvalidTolerance {
        /// The rejected tolerance.
        value: f64,
    },
}
