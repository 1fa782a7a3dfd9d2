//! Intersection correctors.
//!
//! Layer queries intersect straight lines. A [`Corrector`] lets a caller
//! refine each trial intersection (for example with a curvature estimate)
//! or reject it before it is accepted.

use strata_core::Intersection;
use strata_surface::Surface;

/// Pure adjustment of a trial intersection.
///
/// Returning `None` rejects the candidate. Implementations must not depend
/// on call order: layers may invoke them in any order and from several
/// threads at once.
///
/// Closures with the matching signature implement the trait:
///
/// ```
/// use strata_core::Intersection;
/// use strata_layer::Corrector;
/// use strata_surface::Surface;
///
/// let nudge = |_: &dyn Surface, trial: Intersection| {
///     Some(Intersection { path_length: trial.path_length * 1.01, ..trial })
/// };
/// fn takes(_: &dyn Corrector) {}
/// takes(&nudge);
/// ```
pub trait Corrector: Send + Sync {
    /// Adjust or reject `trial`, the straight-line intersection with `surface`.
    fn correct(&self, surface: &dyn Surface, trial: Intersection) -> Option<Intersection>;
}

/// Corrector that accepts every intersection unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoidCorrector;

impl Corrector for VoidCorrector {
    fn correct(&self, _surface: &dyn Surface, trial: Intersection) -> Option<Intersection> {
        Some(trial)
    }
}

impl<F> Corrector for F
where
    F: Fn(&dyn Surface, Intersection) -> Option<Intersection> + Send + Sync,
{
    fn correct(&self, surface: &dyn Surface, trial: Intersection) -> Option<Intersection> {
        self(surface, trial)
    }
}
