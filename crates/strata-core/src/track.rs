//! Trajectory states consumed by layer queries.
//!
//! Charged and neutral parameters are two shapes of the same
//! [`TrackParameters`] contract. Layer navigation only reads position and
//! direction, so both shapes are handled by one generic code path.

use nalgebra::{Unit, Vector3};

use crate::algebra::{Direction, Position};

/// Read access to a trajectory state.
///
/// Object safe, so approach descriptors can take `&dyn TrackParameters`.
pub trait TrackParameters {
    /// Global position of the state.
    fn position(&self) -> &Position;

    /// Unit direction of motion.
    fn direction(&self) -> &Direction;

    /// Absolute momentum.
    fn absolute_momentum(&self) -> f64;

    /// Electric charge in units of `e`. Zero for neutral states.
    fn charge(&self) -> f64;

    /// Momentum vector, `direction * |p|`.
    fn momentum(&self) -> Vector3<f64> {
        self.direction().into_inner() * self.absolute_momentum()
    }
}

/// Parameters of a charged track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChargedParameters {
    position: Position,
    direction: Direction,
    momentum: f64,
    charge: f64,
}

impl ChargedParameters {
    /// Create charged parameters from position, direction, absolute
    /// momentum and charge.
    pub fn new(position: Position, direction: Direction, momentum: f64, charge: f64) -> Self {
        Self {
            position,
            direction,
            momentum: momentum.abs(),
            charge,
        }
    }

    /// Create charged parameters from a momentum vector.
    ///
    /// Returns `None` if the momentum vector has zero length.
    pub fn from_momentum(position: Position, momentum: Vector3<f64>, charge: f64) -> Option<Self> {
        let norm = momentum.norm();
        let direction = Unit::try_new(momentum, f64::EPSILON)?;
        Some(Self::new(position, direction, norm, charge))
    }
}

impl TrackParameters for ChargedParameters {
    fn position(&self) -> &Position {
        &self.position
    }

    fn direction(&self) -> &Direction {
        &self.direction
    }

    fn absolute_momentum(&self) -> f64 {
        self.momentum
    }

    fn charge(&self) -> f64 {
        self.charge
    }
}

/// Parameters of a neutral track (straight-line propagation).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeutralParameters {
    position: Position,
    direction: Direction,
    momentum: f64,
}

impl NeutralParameters {
    /// Create neutral parameters from position, direction and absolute momentum.
    pub fn new(position: Position, direction: Direction, momentum: f64) -> Self {
        Self {
            position,
            direction,
            momentum: momentum.abs(),
        }
    }

    /// Neutral parameters with unit momentum, for pure geometry queries.
    pub fn ray(position: Position, direction: Direction) -> Self {
        Self::new(position, direction, 1.0)
    }
}

impl TrackParameters for NeutralParameters {
    fn position(&self) -> &Position {
        &self.position
    }

    fn direction(&self) -> &Direction {
        &self.direction
    }

    fn absolute_momentum(&self) -> f64 {
        self.momentum
    }

    fn charge(&self) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn charged_from_momentum_normalizes_direction() {
        let p = ChargedParameters::from_momentum(Position::origin(), Vector3::new(0.0, 3.0, 4.0), -1.0)
            .unwrap();
        assert_relative_eq!(p.absolute_momentum(), 5.0);
        assert_relative_eq!(p.direction().into_inner(), Vector3::new(0.0, 0.6, 0.8));
        assert_relative_eq!(p.momentum(), Vector3::new(0.0, 3.0, 4.0));
        assert_eq!(p.charge(), -1.0);
    }

    #[test]
    fn charged_from_zero_momentum_is_rejected() {
        assert!(ChargedParameters::from_momentum(Position::origin(), Vector3::zeros(), 1.0).is_none());
    }

    #[test]
    fn neutral_parameters_carry_no_charge() {
        let p = NeutralParameters::ray(Position::new(1.0, 2.0, 3.0), Vector3::z_axis());
        assert_eq!(p.charge(), 0.0);
        assert_eq!(p.absolute_momentum(), 1.0);
        assert_eq!(*p.position(), Position::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn negative_momentum_is_stored_as_magnitude() {
        let p = NeutralParameters::new(Position::origin(), Vector3::x_axis(), -2.5);
        assert_eq!(p.absolute_momentum(), 2.5);
    }
}
