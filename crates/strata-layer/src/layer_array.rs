//! Ordered, one-dimensionally binned collections of shared layers.

use std::sync::Arc;

use strata_core::Position;

use crate::layer::Layer;

/// Coordinate a [`LayerArray`] orders and bins its layers by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BinningAxis {
    /// Global x.
    X,
    /// Global y.
    Y,
    /// Global z.
    #[default]
    Z,
    /// Transverse radius `sqrt(x^2 + y^2)`.
    R,
}

impl BinningAxis {
    /// Value of a global position along this axis.
    pub fn value(self, position: &Position) -> f64 {
        match self {
            Self::X => position.x,
            Self::Y => position.y,
            Self::Z => position.z,
            Self::R => position.x.hypot(position.y),
        }
    }
}

/// Layers ordered by the centre of their representing surface along an axis.
///
/// Layers are shared: the same [`Layer`] may sit in several arrays. Bin
/// boundaries are the midpoints between consecutive layer centres, so
/// every position maps to the nearest layer along the axis.
#[derive(Clone, Debug)]
pub struct LayerArray {
    axis: BinningAxis,
    layers: Vec<Arc<Layer>>,
    boundaries: Vec<f64>,
}

impl LayerArray {
    /// Order `layers` along `axis`. Layers with equal centres keep their
    /// given order.
    pub fn new(axis: BinningAxis, mut layers: Vec<Arc<Layer>>) -> Self {
        layers.sort_by(|a, b| center_value(axis, a).total_cmp(&center_value(axis, b)));
        let boundaries = layers
            .windows(2)
            .map(|pair| 0.5 * (center_value(axis, &pair[0]) + center_value(axis, &pair[1])))
            .collect();
        Self {
            axis,
            layers,
            boundaries,
        }
    }

    /// The binning axis.
    pub fn axis(&self) -> BinningAxis {
        self.axis
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the array holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer at position `index` in axis order.
    pub fn get(&self, index: usize) -> Option<&Arc<Layer>> {
        self.layers.get(index)
    }

    /// Layers in axis order.
    pub fn layers(&self) -> &[Arc<Layer>] {
        &self.layers
    }

    /// Layers in axis order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Layer>> {
        self.layers.iter()
    }

    /// The layer whose bin contains `position`.
    pub fn layer_at(&self, position: &Position) -> Option<&Arc<Layer>> {
        let value = self.axis.value(position);
        let bin = self.boundaries.partition_point(|&b| b <= value);
        self.layers.get(bin)
    }
}

impl<'a> IntoIterator for &'a LayerArray {
    type Item = &'a Arc<Layer>;
    type IntoIter = std::slice::Iter<'a, Arc<Layer>>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

fn center_value(axis: BinningAxis, layer: &Layer) -> f64 {
    axis.value(&layer.surface_representation().center())
}
