//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hierarchical geometry identifier, packed into a single `u64`.
///
/// The fields are, from the most significant bits down:
///
/// | Field     | Bits  | Width |
/// |-----------|-------|-------|
/// | volume    | 56–63 | 8     |
/// | layer     | 44–55 | 12    |
/// | approach  | 36–43 | 8     |
/// | sensitive | 16–35 | 20    |
///
/// A zero field means "not set". The `with_*` setters truncate values wider
/// than a field; [`checked_with`](Self::checked_with) refuses them instead.
///
/// # Examples
///
/// ```
/// use strata_core::GeometryId;
///
/// let id = GeometryId::new().with_volume(2).with_layer(7).with_sensitive(130);
/// assert_eq!(id.volume(), 2);
/// assert_eq!(id.layer(), 7);
/// assert_eq!(id.approach(), 0);
/// assert_eq!(id.sensitive(), 130);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(u64);

impl GeometryId {
    const VOLUME_MASK: u64 = 0xff00_0000_0000_0000;
    const LAYER_MASK: u64 = 0x00ff_f000_0000_0000;
    const APPROACH_MASK: u64 = 0x0000_0ff0_0000_0000;
    const SENSITIVE_MASK: u64 = 0x0000_000f_ffff_0000;

    /// An identifier with every field unset.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Wrap a raw packed value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw packed value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Volume index.
    pub const fn volume(self) -> u64 {
        Self::get(self.0, Self::VOLUME_MASK)
    }

    /// Layer index within the volume.
    pub const fn layer(self) -> u64 {
        Self::get(self.0, Self::LAYER_MASK)
    }

    /// Approach-surface index within the layer.
    pub const fn approach(self) -> u64 {
        Self::get(self.0, Self::APPROACH_MASK)
    }

    /// Sensitive-surface index within the layer.
    pub const fn sensitive(self) -> u64 {
        Self::get(self.0, Self::SENSITIVE_MASK)
    }

    /// Copy with the volume field replaced.
    #[must_use]
    pub const fn with_volume(self, volume: u64) -> Self {
        Self(Self::set(self.0, Self::VOLUME_MASK, volume))
    }

    /// Copy with the layer field replaced.
    #[must_use]
    pub const fn with_layer(self, layer: u64) -> Self {
        Self(Self::set(self.0, Self::LAYER_MASK, layer))
    }

    /// Copy with the approach field replaced.
    #[must_use]
    pub const fn with_approach(self, approach: u64) -> Self {
        Self(Self::set(self.0, Self::APPROACH_MASK, approach))
    }

    /// Copy with the sensitive field replaced.
    #[must_use]
    pub const fn with_sensitive(self, sensitive: u64) -> Self {
        Self(Self::set(self.0, Self::SENSITIVE_MASK, sensitive))
    }

    /// Copy with `field` replaced, or `None` if `value` does not fit the
    /// field width.
    ///
    /// ```
    /// use strata_core::{GeometryField, GeometryId};
    ///
    /// assert!(GeometryId::new().checked_with(GeometryField::Volume, 255).is_some());
    /// assert!(GeometryId::new().checked_with(GeometryField::Volume, 256).is_none());
    /// ```
    pub const fn checked_with(self, field: GeometryField, value: u64) -> Option<Self> {
        if value > field.max() {
            return None;
        }
        Some(Self(Self::set(self.0, field.mask(), value)))
    }

    const fn get(raw: u64, mask: u64) -> u64 {
        (raw & mask) >> mask.trailing_zeros()
    }

    const fn set(raw: u64, mask: u64, value: u64) -> u64 {
        (raw & !mask) | ((value << mask.trailing_zeros()) & mask)
    }
}

/// One field of a [`GeometryId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryField {
    /// Volume index.
    Volume,
    /// Layer index within the volume.
    Layer,
    /// Approach-surface index within the layer.
    Approach,
    /// Sensitive-surface index within the layer.
    Sensitive,
}

impl GeometryField {
    /// Largest value the field can hold.
    pub const fn max(self) -> u64 {
        let mask = self.mask();
        mask >> mask.trailing_zeros()
    }

    const fn mask(self) -> u64 {
        match self {
            Self::Volume => GeometryId::VOLUME_MASK,
            Self::Layer => GeometryId::LAYER_MASK,
            Self::Approach => GeometryId::APPROACH_MASK,
            Self::Sensitive => GeometryId::SENSITIVE_MASK,
        }
    }
}

impl fmt::Display for GeometryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Volume => "volume",
            Self::Layer => "layer",
            Self::Approach => "approach",
            Self::Sensitive => "sensitive",
        })
    }
}

impl fmt::Display for GeometryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vol={}|lay={}|apr={}|sen={}",
            self.volume(),
            self.layer(),
            self.approach(),
            self.sensitive()
        )
    }
}

/// Identifies a detector element (a readout module behind a sensitive surface).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Counter for unique [`SurfaceInstanceId`] allocation.
static SURFACE_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identity of a surface object.
///
/// Allocated from a monotonic atomic counter via [`SurfaceInstanceId::next`].
/// Layers use it for duplicate removal and for start/end surface exclusion
/// in navigation queries, so two geometrically identical surfaces remain
/// distinguishable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceInstanceId(u64);

impl SurfaceInstanceId {
    /// Allocate a fresh, unique instance ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(SURFACE_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SurfaceInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
