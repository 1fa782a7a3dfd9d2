//! Navigation options: the configuration bundle for every layer query.
//!
//! [`NavigationOptions`] selects which surface categories a query resolves
//! (sensitive, material, passive), how boundaries are checked, how deep the
//! sensitive-surface search goes, which surfaces are excluded and how far
//! the search may reach. [`validate()`](NavigationOptions::validate) checks
//! the numeric settings before a query runs.

use nalgebra::Unit;

use crate::algebra::Direction;
use crate::error::OptionsError;
use crate::id::SurfaceInstanceId;

/// How an intersection treats the finite extent of a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BoundaryCheck {
    /// Treat the surface as infinite.
    Unbounded,
    /// Require the intersection to lie inside the bounds.
    #[default]
    Bounded,
    /// Inside the bounds grown by `tolerance` in every local direction.
    Tolerance {
        /// Absolute tolerance added to the bounds.
        tolerance: f64,
    },
}

impl BoundaryCheck {
    /// Whether the check looks at the bounds at all.
    pub fn is_bounded(&self) -> bool {
        !matches!(self, Self::Unbounded)
    }

    /// Absolute tolerance added to the bounds, `None` for [`Unbounded`](Self::Unbounded).
    pub fn tolerance(&self) -> Option<f64> {
        match self {
            Self::Unbounded => None,
            Self::Bounded => Some(0.0),
            Self::Tolerance { tolerance } => Some(*tolerance),
        }
    }
}

impl From<bool> for BoundaryCheck {
    fn from(bounded: bool) -> Self {
        if bounded {
            Self::Bounded
        } else {
            Self::Unbounded
        }
    }
}

/// Propagation direction relative to the track momentum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavigationDirection {
    /// Along the momentum.
    #[default]
    Forward,
    /// Against the momentum.
    Backward,
}

impl NavigationDirection {
    /// `+1.0` forward, `-1.0` backward.
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// The effective direction of travel for a track direction.
    pub fn apply(self, direction: &Direction) -> Direction {
        match self {
            Self::Forward => *direction,
            Self::Backward => Unit::new_unchecked(-direction.into_inner()),
        }
    }
}

/// Depth of the sensitive-surface search on a layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchDepth {
    /// Query the surface array around the projected impact point.
    #[default]
    Neighbourhood,
    /// Test every surface in the array.
    Exhaustive,
}

/// Configuration bundle steering a layer navigation query.
///
/// The default resolves nothing: all three resolve flags are off, so a
/// query with default options returns no candidates until the caller
/// opts into sensitive, material or passive surfaces.
///
/// # Examples
///
/// ```
/// use strata_core::{BoundaryCheck, NavigationOptions};
///
/// let options = NavigationOptions::new()
///     .with_resolve(true, false, false)
///     .with_boundary_check(BoundaryCheck::Unbounded)
///     .with_path_limit(250.0);
/// assert!(options.validate().is_ok());
/// assert!(options.within_path_limit(100.0));
/// assert!(!options.within_path_limit(300.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationOptions {
    /// Collect sensitive surfaces.
    pub resolve_sensitive: bool,
    /// Collect surfaces that carry material.
    pub resolve_material: bool,
    /// Collect every surface, sensitive or not.
    pub resolve_passive: bool,
    /// Boundary treatment for every candidate.
    pub boundary_check: BoundaryCheck,
    /// Sensitive-surface search depth.
    pub search_depth: SearchDepth,
    /// Surface the search starts from; never returned.
    pub start_surface: Option<SurfaceInstanceId>,
    /// Surface the search ends on; never returned.
    pub end_surface: Option<SurfaceInstanceId>,
    /// Maximum path length of a returned intersection. `None` = unlimited.
    pub path_limit: Option<f64>,
    /// Direction of travel relative to the track momentum.
    pub direction: NavigationDirection,
}

impl NavigationOptions {
    /// Options that resolve nothing, with bounded checks and forward travel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the three resolve flags.
    #[must_use]
    pub fn with_resolve(mut self, sensitive: bool, material: bool, passive: bool) -> Self {
        self.resolve_sensitive = sensitive;
        self.resolve_material = material;
        self.resolve_passive = passive;
        self
    }

    /// Set the boundary check.
    #[must_use]
    pub fn with_boundary_check(mut self, check: BoundaryCheck) -> Self {
        self.boundary_check = check;
        self
    }

    /// Set the sensitive search depth.
    #[must_use]
    pub fn with_search_depth(mut self, depth: SearchDepth) -> Self {
        self.search_depth = depth;
        self
    }

    /// Exclude the surface the search starts from.
    #[must_use]
    pub fn with_start_surface(mut self, surface: SurfaceInstanceId) -> Self {
        self.start_surface = Some(surface);
        self
    }

    /// Exclude the surface the search ends on.
    #[must_use]
    pub fn with_end_surface(mut self, surface: SurfaceInstanceId) -> Self {
        self.end_surface = Some(surface);
        self
    }

    /// Limit the path length of returned intersections.
    #[must_use]
    pub fn with_path_limit(mut self, limit: f64) -> Self {
        self.path_limit = Some(limit);
        self
    }

    /// Set the direction of travel.
    #[must_use]
    pub fn with_direction(mut self, direction: NavigationDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Check the numeric settings.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if let Some(limit) = self.path_limit {
            if limit.is_nan() || limit < 0.0 {
                return Err(OptionsError::InvalidPathLimit { value: limit });
            }
        }
        if let BoundaryCheck::Tolerance { tolerance } = self.boundary_check {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(OptionsError::InvalidTolerance { value: tolerance });
            }
        }
        Ok(())
    }

    /// Whether any of the three resolve flags is set.
    pub fn resolves_anything(&self) -> bool {
        self.resolve_sensitive || self.resolve_material || self.resolve_passive
    }

    /// Whether `surface` is the excluded start or end surface.
    pub fn is_excluded(&self, surface: SurfaceInstanceId) -> bool {
        self.start_surface == Some(surface) || self.end_surface == Some(surface)
    }

    /// Whether a path length satisfies the configured limit.
    pub fn within_path_limit(&self, path_length: f64) -> bool {
        self.path_limit.map_or(true, |limit| path_length <= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn default_resolves_nothing() {
        let o = NavigationOptions::default();
        assert!(!o.resolves_anything());
        assert_eq!(o.boundary_check, BoundaryCheck::Bounded);
        assert_eq!(o.search_depth, SearchDepth::Neighbourhood);
        assert_eq!(o.direction, NavigationDirection::Forward);
        assert!(o.path_limit.is_none());
        assert!(o.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_path_limit() {
        let o = NavigationOptions::new().with_path_limit(-1.0);
        assert!(matches!(
            o.validate(),
            Err(OptionsError::InvalidPathLimit { .. })
        ));
    }

    #[test]
    fn validate_rejects_nan_path_limit() {
        let o = NavigationOptions::new().with_path_limit(f64::NAN);
        assert!(o.validate().is_err());
    }

    #[test]
    fn validate_accepts_infinite_path_limit() {
        let o = NavigationOptions::new().with_path_limit(f64::INFINITY);
        assert!(o.validate().is_ok());
        assert!(o.within_path_limit(1e12));
    }

    #[test]
    fn validate_rejects_negative_tolerance() {
        let o = NavigationOptions::new()
            .with_boundary_check(BoundaryCheck::Tolerance { tolerance: -0.1 });
        assert!(matches!(
            o.validate(),
            Err(OptionsError::InvalidTolerance { .. })
        ));
    }

    #[test]
    fn exclusions_match_start_and_end() {
        let start = SurfaceInstanceId::next();
        let end = SurfaceInstanceId::next();
        let other = SurfaceInstanceId::next();
        let o = NavigationOptions::new()
            .with_start_surface(start)
            .with_end_surface(end);
        assert!(o.is_excluded(start));
        assert!(o.is_excluded(end));
        assert!(!o.is_excluded(other));
    }

    #[test]
    fn path_limit_is_inclusive() {
        let o = NavigationOptions::new().with_path_limit(5.0);
        assert!(o.within_path_limit(5.0));
        assert!(!o.within_path_limit(5.000_001));
    }

    #[test]
    fn backward_flips_direction() {
        let d = Vector3::z_axis();
        let back = NavigationDirection::Backward.apply(&d);
        assert_eq!(back.into_inner(), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(NavigationDirection::Forward.apply(&d), d);
    }

    #[test]
    fn boundary_check_from_bool() {
        assert_eq!(BoundaryCheck::from(true), BoundaryCheck::Bounded);
        assert_eq!(BoundaryCheck::from(false), BoundaryCheck::Unbounded);
        assert_eq!(BoundaryCheck::Unbounded.tolerance(), None);
        assert_eq!(
            BoundaryCheck::Tolerance { tolerance: 0.5 }.tolerance(),
            Some(0.5)
        );
    }
}
