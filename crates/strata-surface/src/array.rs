//! Spatially binned collection of sensitive surfaces.
//!
//! A [`SurfaceArray`] owns the sensitive surfaces of one layer. Surfaces are
//! binned once, at construction, by the projection of their centre into the
//! local frame of a [`SurfaceGrid`]. Queries then touch only the bins around
//! a position instead of the whole collection.

use std::sync::Arc;

use smallvec::SmallVec;
use strata_core::{Position, SurfaceInstanceId, Transform};

use crate::error::SurfaceError;
use crate::surface::Surface;

/// Regular 2D binning in the local `(x, y)` plane of a frame.
///
/// Positions outside the ranges clamp to the nearest edge bin.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceGrid {
    transform: Transform,
    x_range: (f64, f64),
    y_range: (f64, f64),
    bins_x: usize,
    bins_y: usize,
}

impl SurfaceGrid {
    /// Create a grid of `bins_x * bins_y` bins over the given local ranges.
    ///
    /// Ranges must be finite and increasing; bin counts must be non-zero.
    pub fn new(
        transform: Transform,
        x_range: (f64, f64),
        y_range: (f64, f64),
        bins_x: usize,
        bins_y: usize,
    ) -> Result<Self, SurfaceError> {
        check_range("x", x_range)?;
        check_range("y", y_range)?;
        if bins_x == 0 || bins_y == 0 {
            return Err(SurfaceError::InvalidGrid {
                reason: format!("bin counts must be non-zero, got {bins_x}x{bins_y}"),
            });
        }
        Ok(Self {
            transform,
            x_range,
            y_range,
            bins_x,
            bins_y,
        })
    }

    /// A grid with a single bin: every position maps to it.
    pub fn single() -> Self {
        Self {
            transform: Transform::identity(),
            x_range: (-1.0, 1.0),
            y_range: (-1.0, 1.0),
            bins_x: 1,
            bins_y: 1,
        }
    }

    /// Frame of the grid.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Total number of bins.
    pub fn bin_count(&self) -> usize {
        self.bins_x * self.bins_y
    }

    /// Bin indices `(ix, iy)` of a global position.
    pub fn bin_of(&self, position: &Position) -> (usize, usize) {
        let local = self.transform.inverse_transform_point(position);
        (
            axis_bin(local.x, self.x_range, self.bins_x),
            axis_bin(local.y, self.y_range, self.bins_y),
        )
    }

    /// Flat index of bin `(ix, iy)`.
    fn flat(&self, ix: usize, iy: usize) -> usize {
        iy * self.bins_x + ix
    }

    /// Flat indices of the bin containing `position` and its adjacent ring.
    fn neighbourhood(&self, position: &Position) -> SmallVec<[usize; 9]> {
        let (ix, iy) = self.bin_of(position);
        let mut out = SmallVec::new();
        for y in iy.saturating_sub(1)..=(iy + 1).min(self.bins_y - 1) {
            for x in ix.saturating_sub(1)..=(ix + 1).min(self.bins_x - 1) {
                out.push(self.flat(x, y));
            }
        }
        out
    }

    fn shifted(&self, shift: &Transform) -> Self {
        Self {
            transform: shift * self.transform,
            ..self.clone()
        }
    }
}

fn check_range(axis: &str, (lo, hi): (f64, f64)) -> Result<(), SurfaceError> {
    if lo.is_finite() && hi.is_finite() && lo < hi {
        Ok(())
    } else {
        Err(SurfaceError::InvalidGrid {
            reason: format!("{axis} range must be finite and increasing, got [{lo}, {hi}]"),
        })
    }
}

fn axis_bin(value: f64, (lo, hi): (f64, f64), bins: usize) -> usize {
    let fraction = (value - lo) / (hi - lo);
    let bin = (fraction * bins as f64).floor();
    if bin.is_nan() || bin < 0.0 {
        0
    } else {
        (bin as usize).min(bins - 1)
    }
}

/// Exclusively owned, read-only collection of sensitive surfaces.
///
/// Returned references live as long as the array. Every query result is in
/// insertion order and free of duplicates.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use strata_core::{Position, Transform};
/// use strata_surface::{PlanarBounds, PlaneSurface, Surface, SurfaceArray, SurfaceGrid};
///
/// let module = |x: f64| -> Arc<dyn Surface> {
///     Arc::new(PlaneSurface::new(
///         Transform::translation(x, 0.0, 0.0),
///         PlanarBounds::rectangle(1.0, 1.0).unwrap(),
///     ))
/// };
/// let grid = SurfaceGrid::new(Transform::identity(), (-10.0, 10.0), (-1.0, 1.0), 10, 1).unwrap();
/// let array = SurfaceArray::new(grid, vec![module(-9.0), module(0.5), module(9.0)]).unwrap();
///
/// // Only the module near the origin is in the neighbourhood.
/// let near = array.neighbours(&Position::new(0.0, 0.0, 0.0));
/// assert_eq!(near.len(), 1);
/// assert_eq!(array.len(), 3);
/// ```
#[derive(Debug)]
pub struct SurfaceArray {
    grid: SurfaceGrid,
    surfaces: Vec<Arc<dyn Surface>>,
    bins: Vec<SmallVec<[usize; 4]>>,
}

impl SurfaceArray {
    /// Bin `surfaces` into `grid`.
    ///
    /// Returns `Err(SurfaceError::EmptyArray)` if `surfaces` is empty.
    pub fn new(grid: SurfaceGrid, surfaces: Vec<Arc<dyn Surface>>) -> Result<Self, SurfaceError> {
        if surfaces.is_empty() {
            return Err(SurfaceError::EmptyArray);
        }
        let mut bins = vec![SmallVec::new(); grid.bin_count()];
        for (index, surface) in surfaces.iter().enumerate() {
            let (ix, iy) = grid.bin_of(&surface.center());
            bins[grid.flat(ix, iy)].push(index);
        }
        Ok(Self {
            grid,
            surfaces,
            bins,
        })
    }

    /// An array with a single bin: every query returns every surface.
    pub fn single(surfaces: Vec<Arc<dyn Surface>>) -> Result<Self, SurfaceError> {
        Self::new(SurfaceGrid::single(), surfaces)
    }

    /// The binning grid.
    pub fn grid(&self) -> &SurfaceGrid {
        &self.grid
    }

    /// Number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Always returns `false`: construction rejects empty arrays.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Surface at insertion index `index`.
    pub fn get(&self, index: usize) -> Option<&dyn Surface> {
        self.surfaces.get(index).map(|s| s.as_ref())
    }

    /// Insertion index of a surface instance.
    pub fn index_of(&self, id: SurfaceInstanceId) -> Option<usize> {
        self.surfaces.iter().position(|s| s.instance_id() == id)
    }

    /// All surfaces, in insertion order.
    pub fn surfaces(&self) -> impl ExactSizeIterator<Item = &dyn Surface> + '_ {
        self.surfaces.iter().map(|s| s.as_ref())
    }

    /// Surfaces binned exactly at `position`.
    pub fn at(&self, position: &Position) -> SmallVec<[&dyn Surface; 4]> {
        let (ix, iy) = self.grid.bin_of(position);
        self.bins[self.grid.flat(ix, iy)]
            .iter()
            .map(|&i| self.surfaces[i].as_ref())
            .collect()
    }

    /// Surfaces in the bin at `position` and the ring of adjacent bins.
    ///
    /// Bounded by the bin occupancy around the position, never a full scan.
    pub fn neighbours(&self, position: &Position) -> SmallVec<[&dyn Surface; 8]> {
        let mut indices: SmallVec<[usize; 16]> = self
            .grid
            .neighbourhood(position)
            .into_iter()
            .flat_map(|bin| self.bins[bin].iter().copied())
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
            .into_iter()
            .map(|i| self.surfaces[i].as_ref())
            .collect()
    }

    /// A copy with grid and every surface placed under `shift`.
    ///
    /// Relative placement is unchanged, so the binning carries over.
    pub fn clone_with_shift(&self, shift: &Transform) -> Self {
        Self {
            grid: self.grid.shifted(shift),
            surfaces: self
                .surfaces
                .iter()
                .map(|s| s.clone_with_shift(shift))
                .collect(),
            bins: self.bins.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::PlanarBounds;
    use crate::plane::PlaneSurface;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn module(x: f64, y: f64) -> Arc<dyn Surface> {
        Arc::new(PlaneSurface::new(
            Transform::translation(x, y, 0.0),
            PlanarBounds::rectangle(0.5, 0.5).unwrap(),
        ))
    }

    /// 10x10 grid of unit bins over [-5, 5]^2 with one module per bin centre.
    fn full_array() -> SurfaceArray {
        let grid =
            SurfaceGrid::new(Transform::identity(), (-5.0, 5.0), (-5.0, 5.0), 10, 10).unwrap();
        let mut surfaces = Vec::new();
        for iy in 0..10 {
            for ix in 0..10 {
                surfaces.push(module(ix as f64 - 4.5, iy as f64 - 4.5));
            }
        }
        SurfaceArray::new(grid, surfaces).unwrap()
    }

    #[test]
    fn grid_rejects_bad_parameters() {
        let id = Transform::identity();
        assert!(SurfaceGrid::new(id, (1.0, 1.0), (0.0, 1.0), 1, 1).is_err());
        assert!(SurfaceGrid::new(id, (0.0, f64::INFINITY), (0.0, 1.0), 1, 1).is_err());
        assert!(SurfaceGrid::new(id, (0.0, 1.0), (0.0, 1.0), 0, 1).is_err());
    }

    #[test]
    fn bin_of_clamps_outside_positions() {
        let grid =
            SurfaceGrid::new(Transform::identity(), (0.0, 10.0), (0.0, 10.0), 5, 5).unwrap();
        assert_eq!(grid.bin_of(&Position::new(-100.0, 3.0, 0.0)), (0, 1));
        assert_eq!(grid.bin_of(&Position::new(100.0, 100.0, 0.0)), (4, 4));
        // NaN in any coordinate lands in bin 0 on both axes.
        assert_eq!(grid.bin_of(&Position::new(f64::NAN, 9.99, 0.0)), (0, 0));
    }

    #[test]
    fn empty_array_is_rejected() {
        assert!(matches!(
            SurfaceArray::single(Vec::new()),
            Err(SurfaceError::EmptyArray)
        ));
    }

    #[test]
    fn neighbours_interior_returns_three_by_three() {
        let a = full_array();
        let n = a.neighbours(&Position::new(0.2, 0.2, 0.0));
        assert_eq!(n.len(), 9);
    }

    #[test]
    fn neighbours_corner_returns_two_by_two() {
        let a = full_array();
        let n = a.neighbours(&Position::new(-4.9, -4.9, 0.0));
        assert_eq!(n.len(), 4);
    }

    #[test]
    fn neighbours_are_in_insertion_order() {
        let a = full_array();
        let ids: Vec<_> = a
            .neighbours(&Position::new(0.2, 0.2, 0.0))
            .iter()
            .map(|s| a.index_of(s.instance_id()).unwrap())
            .collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn at_returns_single_bin() {
        let a = full_array();
        let here = a.at(&Position::new(0.2, 0.2, 0.0));
        assert_eq!(here.len(), 1);
        assert_relative_eq!(here[0].center(), Position::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn single_array_returns_everything() {
        let a = SurfaceArray::single(vec![module(-100.0, 0.0), module(100.0, 0.0)]).unwrap();
        assert_eq!(a.neighbours(&Position::origin()).len(), 2);
        assert_eq!(a.surfaces().len(), 2);
    }

    #[test]
    fn far_surfaces_are_not_neighbours() {
        let grid =
            SurfaceGrid::new(Transform::identity(), (-50.0, 50.0), (-5.0, 5.0), 100, 10).unwrap();
        let a = SurfaceArray::new(grid, vec![module(40.0, 0.0), module(-40.0, 0.0)]).unwrap();
        assert!(a.neighbours(&Position::origin()).is_empty());
    }

    #[test]
    fn shifted_copy_keeps_binning_relative_to_frame() {
        let a = full_array();
        let shift = Transform::translation(100.0, 0.0, 0.0);
        let b = a.clone_with_shift(&shift);
        assert_eq!(b.len(), a.len());
        let near = b.neighbours(&Position::new(100.2, 0.2, 0.0));
        assert_eq!(near.len(), 9);
        for s in near {
            assert!((s.center().x - 100.0).abs() <= 1.5);
            assert!(a.index_of(s.instance_id()).is_none());
        }
    }

    proptest! {
        #[test]
        fn neighbours_subset_of_all_and_contains_at(
            x in -8.0f64..8.0,
            y in -8.0f64..8.0,
        ) {
            let a = full_array();
            let p = Position::new(x, y, 0.0);
            let near = a.neighbours(&p);
            prop_assert!(near.len() <= 9);
            for s in a.at(&p) {
                prop_assert!(near.iter().any(|n| n.instance_id() == s.instance_id()));
            }
        }
    }
}
