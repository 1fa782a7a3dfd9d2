//! Sub-structure richness codes.

use strata_surface::Surface;

/// How rich one kind of layer sub-structure is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubStructure {
    /// The sub-structure does not exist.
    #[default]
    Absent,
    /// Present without material.
    Present,
    /// Present, and at least one of its surfaces carries material.
    WithMaterial,
}

impl SubStructure {
    /// Classify a set of surfaces: absent if empty, material if any has it.
    pub fn of<'a>(surfaces: impl IntoIterator<Item = &'a dyn Surface>) -> Self {
        let mut code = Self::Absent;
        for surface in surfaces {
            if surface.material().is_some() {
                return Self::WithMaterial;
            }
            code = Self::Present;
        }
        code
    }

    /// Whether the sub-structure exists.
    pub fn is_present(self) -> bool {
        self != Self::Absent
    }
}

/// The three sub-structure codes of a layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SubStructureCodes {
    /// The representing surface.
    pub representing: SubStructure,
    /// The sensitive surfaces of the surface array.
    pub sensitive: SubStructure,
    /// The approach surfaces.
    pub approach: SubStructure,
}

impl SubStructureCodes {
    /// Whether any sub-structure carries material.
    pub fn carries_material(&self) -> bool {
        [self.representing, self.sensitive, self.approach].contains(&SubStructure::WithMaterial)
    }
}
