//! The navigable layer.
//!
//! A [`Layer`] bundles a representing surface, an optional sensitive-surface
//! array and optional approach surfaces, and answers which of them a
//! trajectory may cross, in forward order. Layers go through a one-way
//! lifecycle driven by their enclosing volume:
//!
//! 1. **Constructed**: sub-structure supplied, nothing assigned.
//! 2. **Closed**: geometry identifier assigned, missing approach surfaces
//!    built, detector elements registered. Sub-structure is frozen.
//! 3. **Enclosed**: the back-reference to the enclosing volume is set.
//!
//! Every query requires a closed layer; only the accessors work before.
//! All write-once state lives in [`OnceLock`]s, so a closed layer is
//! `Send + Sync` and can be queried from any number of threads.

use std::sync::{Arc, OnceLock, Weak};

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use strata_core::{
    BoundaryCheck, Direction, ElementId, GeometryField, GeometryId, Intersection,
    NavigationOptions, Position, SearchDepth, SurfaceInstanceId, TrackParameters, Transform,
    ON_SURFACE_TOLERANCE,
};
use strata_surface::{Surface, SurfaceArray, SurfaceIntersection};
use tracing::{debug, trace, warn};

use crate::approach::{ApproachDescriptor, GenericApproachDescriptor};
use crate::corrector::{Corrector, VoidCorrector};
use crate::error::LayerError;
use crate::layer_array::BinningAxis;
use crate::representation::LayerRepresentation;
use crate::substructure::{SubStructure, SubStructureCodes};
use crate::volume::{AbstractVolume, DetachedTrackingVolume, TrackingVolume};

/// Role of a layer in navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayerType {
    /// Pure navigation aid: no sensitive surfaces, no material.
    Navigation,
    /// Carries material but no readout.
    Passive,
    /// Carries sensitive surfaces.
    #[default]
    Active,
}

/// State fixed at closure.
#[derive(Debug)]
pub(crate) struct Closure {
    geometry_id: GeometryId,
    built_approach: Option<Box<dyn ApproachDescriptor>>,
    approach_origin: &'static str,
    approach_code: SubStructure,
    /// Element id to insertion index in the surface array.
    detector_elements: IndexMap<ElementId, usize>,
    surface_ids: IndexMap<SurfaceInstanceId, GeometryId>,
}

#[derive(Debug)]
enum Enclosure {
    Tracking(Weak<TrackingVolume>),
    Detached(Weak<DetachedTrackingVolume>),
}

#[derive(Debug)]
struct NextLayers {
    previous: Option<Weak<Layer>>,
    next: Option<Weak<Layer>>,
    axis: BinningAxis,
}

/// Candidate surface of a compatible-surface search.
struct Candidate<'a> {
    surface: &'a dyn Surface,
    sensitive: bool,
}

/// Ordered, duplicate-free candidate collection for one search.
struct CandidateSet<'a, 'o> {
    options: &'o NavigationOptions,
    seen: IndexSet<SurfaceInstanceId>,
    candidates: SmallVec<[Candidate<'a>; 16]>,
}

impl<'a, 'o> CandidateSet<'a, 'o> {
    fn new(options: &'o NavigationOptions) -> Self {
        Self {
            options,
            seen: IndexSet::new(),
            candidates: SmallVec::new(),
        }
    }

    /// Add `surface` if the resolve flags accept it, it is not excluded and
    /// it was not added before.
    fn push(&mut self, surface: &'a dyn Surface, sensitive: bool) {
        let options = self.options;
        let accepted = (sensitive && options.resolve_sensitive)
            || (options.resolve_material && surface.material().is_some())
            || options.resolve_passive;
        if accepted
            && !options.is_excluded(surface.instance_id())
            && self.seen.insert(surface.instance_id())
        {
            self.candidates.push(Candidate { surface, sensitive });
        }
    }

    fn into_inner(self) -> SmallVec<[Candidate<'a>; 16]> {
        self.candidates
    }
}

/// A navigable detector layer.
///
/// See the [module documentation](self) for the lifecycle. A layer is never
/// cloned; [`clone_with_shift`](Self::clone_with_shift) produces a new,
/// unclosed layer with fresh surfaces.
#[derive(Debug)]
pub struct Layer {
    representation: Box<dyn LayerRepresentation>,
    surface_array: Option<SurfaceArray>,
    thickness: f64,
    approach_descriptor: Option<Box<dyn ApproachDescriptor>>,
    layer_type: LayerType,
    substructure: SubStructureCodes,
    representing_volume: OnceLock<Weak<AbstractVolume>>,
    closure: OnceLock<Closure>,
    enclosure: OnceLock<Enclosure>,
    next_layers: OnceLock<NextLayers>,
}

impl Layer {
    /// Assemble a layer from its representation and optional sub-structure.
    ///
    /// Returns [`LayerError::InvalidThickness`] unless `thickness` is finite
    /// and non-negative.
    pub fn new(
        representation: Box<dyn LayerRepresentation>,
        surface_array: Option<SurfaceArray>,
        thickness: f64,
        approach_descriptor: Option<Box<dyn ApproachDescriptor>>,
        layer_type: LayerType,
    ) -> Result<Self, LayerError> {
        if !(thickness.is_finite() && thickness >= 0.0) {
            return Err(LayerError::InvalidThickness { value: thickness });
        }
        Ok(Self::assemble(
            representation,
            surface_array,
            thickness,
            approach_descriptor,
            layer_type,
        ))
    }

    fn assemble(
        representation: Box<dyn LayerRepresentation>,
        surface_array: Option<SurfaceArray>,
        thickness: f64,
        approach_descriptor: Option<Box<dyn ApproachDescriptor>>,
        layer_type: LayerType,
    ) -> Self {
        let substructure = SubStructureCodes {
            representing: SubStructure::of([representation.surface()]),
            sensitive: surface_array
                .as_ref()
                .map_or(SubStructure::Absent, |a| SubStructure::of(a.surfaces())),
            approach: approach_descriptor
                .as_deref()
                .map_or(SubStructure::Absent, approach_code),
        };
        Self {
            representation,
            surface_array,
            thickness,
            approach_descriptor,
            layer_type,
            substructure,
            representing_volume: OnceLock::new(),
            closure: OnceLock::new(),
            enclosure: OnceLock::new(),
            next_layers: OnceLock::new(),
        }
    }

    /// A new, unclosed copy placed under an additional rigid `shift`.
    ///
    /// The representation, surface array and any supplied approach
    /// descriptor are shifted; thickness and layer type are kept. Closure
    /// state, volume links and neighbours are not carried over.
    pub fn clone_with_shift(&self, shift: &Transform) -> Self {
        Self::assemble(
            self.representation.clone_with_shift(shift),
            self.surface_array
                .as_ref()
                .map(|a| a.clone_with_shift(shift)),
            self.thickness,
            self.approach_descriptor
                .as_ref()
                .map(|d| d.clone_with_shift(shift)),
            self.layer_type,
        )
    }

    // ── Accessors ───────────────────────────────────────────────

    /// The owned sensitive-surface array, if any.
    pub fn surface_array(&self) -> Option<&SurfaceArray> {
        self.surface_array.as_ref()
    }

    /// The surface standing for the whole layer.
    pub fn surface_representation(&self) -> &dyn Surface {
        self.representation.surface()
    }

    /// Extent of the layer along the representation normal.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Role of the layer.
    pub fn layer_type(&self) -> LayerType {
        self.layer_type
    }

    /// The approach descriptor: the supplied one, or the one built at closure.
    pub fn approach_descriptor(&self) -> Option<&dyn ApproachDescriptor> {
        self.approach_descriptor.as_deref().or_else(|| {
            self.closure
                .get()
                .and_then(|c| c.built_approach.as_deref())
        })
    }

    /// Sub-structure codes. The approach code reflects closure once closed.
    pub fn substructure(&self) -> SubStructureCodes {
        match self.closure.get() {
            Some(closure) => SubStructureCodes {
                approach: closure.approach_code,
                ..self.substructure
            },
            None => self.substructure,
        }
    }

    /// Identifier assigned at closure.
    pub fn geometry_id(&self) -> Option<GeometryId> {
        self.closure.get().map(|c| c.geometry_id)
    }

    /// Whether the layer has been closed.
    pub fn is_closed(&self) -> bool {
        self.closure.get().is_some()
    }

    /// Identifier of a surface of this layer, assigned at closure.
    ///
    /// Approach surfaces carry an approach index, array surfaces a
    /// sensitive index, the representing surface the layer identifier.
    pub fn surface_geometry_id(&self, surface: &dyn Surface) -> Option<GeometryId> {
        self.closure
            .get()
            .and_then(|c| c.surface_ids.get(&surface.instance_id()).copied())
    }

    /// The enclosing tracking volume, while it is alive.
    pub fn tracking_volume(&self) -> Option<Arc<TrackingVolume>> {
        match self.enclosure.get()? {
            Enclosure::Tracking(volume) => volume.upgrade(),
            Enclosure::Detached(_) => None,
        }
    }

    /// The enclosing detached tracking volume, while it is alive.
    pub fn enclosing_detached_volume(&self) -> Option<Arc<DetachedTrackingVolume>> {
        match self.enclosure.get()? {
            Enclosure::Detached(volume) => volume.upgrade(),
            Enclosure::Tracking(_) => None,
        }
    }

    /// The representing volume, while it is alive.
    pub fn representing_volume(&self) -> Option<Arc<AbstractVolume>> {
        self.representing_volume.get().and_then(Weak::upgrade)
    }

    /// Use the boundary surfaces of `volume` as approach surfaces.
    ///
    /// Only allowed once, before closure. A supplied approach descriptor
    /// still takes precedence.
    pub fn register_representing_volume(
        &self,
        volume: &Arc<AbstractVolume>,
    ) -> Result<(), LayerError> {
        if let Some(closure) = self.closure.get() {
            return Err(LayerError::AlreadyClosed {
                existing: closure.geometry_id,
            });
        }
        self.representing_volume
            .set(Arc::downgrade(volume))
            .map_err(|_| LayerError::RepresentingVolumeAlreadyRegistered)
    }

    /// Detector elements registered at closure.
    pub fn detector_elements(&self) -> Result<DetectorElements<'_>, LayerError> {
        let closure = self.closed()?;
        Ok(DetectorElements {
            elements: &closure.detector_elements,
            array: self.surface_array.as_ref(),
        })
    }

    // ── Geometry ────────────────────────────────────────────────

    /// Whether `position` lies within the layer volume.
    ///
    /// The normal distance to the representing surface must be within half
    /// the thickness, and the position must pass `check` on its bounds.
    /// Fails with [`LayerError::NotClosed`] before closure.
    pub fn is_on_layer(
        &self,
        position: &Position,
        check: BoundaryCheck,
    ) -> Result<bool, LayerError> {
        self.closed()?;
        let surface = self.surface_representation();
        Ok(
            surface.distance(position).abs() <= 0.5 * self.thickness + ON_SURFACE_TOLERANCE
                && surface.is_within_bounds(position, check),
        )
    }

    /// [`is_on_layer`](Self::is_on_layer) for the position of a track.
    pub fn on_layer<P>(&self, parameters: &P, check: BoundaryCheck) -> Result<bool, LayerError>
    where
        P: TrackParameters + ?Sized,
    {
        self.is_on_layer(parameters.position(), check)
    }

    /// Whether a search with the given resolve flags considers this layer.
    ///
    /// Passive resolution accepts every layer; sensitive resolution accepts
    /// active layers; material resolution accepts layers carrying material.
    /// Fails with [`LayerError::NotClosed`] before closure.
    pub fn resolve(
        &self,
        sensitive: bool,
        material: bool,
        passive: bool,
    ) -> Result<bool, LayerError> {
        self.closed()?;
        Ok(self.accepts(sensitive, material, passive))
    }

    /// [`resolve`](Self::resolve) with the flags of `options`.
    pub fn resolves(&self, options: &NavigationOptions) -> Result<bool, LayerError> {
        self.resolve(
            options.resolve_sensitive,
            options.resolve_material,
            options.resolve_passive,
        )
    }

    // ── Navigation ──────────────────────────────────────────────

    /// Surfaces of this layer the trajectory may cross, in forward order.
    ///
    /// See [`compatible_surfaces_with`](Self::compatible_surfaces_with).
    pub fn compatible_surfaces<P>(
        &self,
        parameters: &P,
        options: &NavigationOptions,
    ) -> Result<Vec<SurfaceIntersection<'_>>, LayerError>
    where
        P: TrackParameters + ?Sized,
    {
        self.compatible_surfaces_with(parameters, options, &VoidCorrector)
    }

    /// Surfaces of this layer the trajectory may cross, in forward order,
    /// with every trial intersection passed through `corrector`.
    ///
    /// Candidates are gathered in a fixed order, each surface once:
    /// approach surfaces carrying material (under material or passive
    /// resolution), sensitive surfaces around the projected impact point
    /// (or all of them for [`SearchDepth::Exhaustive`]), then the
    /// representing surface. A
    /// candidate is kept if it is sensitive and sensitive resolution is on,
    /// carries material and material resolution is on, or passive
    /// resolution is on. Intersections behind the start, beyond the path
    /// limit, invalid, or on an excluded surface are dropped. The result is
    /// sorted by path length; equal lengths keep candidate order.
    ///
    /// Returns an empty list if the layer does not [`resolve`](Self::resolve)
    /// under `options`. Fails with [`LayerError::NotClosed`] before closure
    /// and [`LayerError::Options`] for invalid options.
    pub fn compatible_surfaces_with<P>(
        &self,
        parameters: &P,
        options: &NavigationOptions,
        corrector: &dyn Corrector,
    ) -> Result<Vec<SurfaceIntersection<'_>>, LayerError>
    where
        P: TrackParameters + ?Sized,
    {
        let closure = self.closed()?;
        options.validate()?;
        if !self.accepts(
            options.resolve_sensitive,
            options.resolve_material,
            options.resolve_passive,
        ) {
            trace!(layer = %closure.geometry_id, "layer not resolved");
            return Ok(Vec::new());
        }

        let position = parameters.position();
        let direction = options.direction.apply(parameters.direction());

        let mut candidates = CandidateSet::new(options);
        if options.resolve_material || options.resolve_passive {
            if let Some(descriptor) = self.approach_descriptor() {
                for surface in descriptor.contained_surfaces() {
                    if surface.material().is_some() {
                        candidates.push(surface.as_ref(), false);
                    }
                }
            }
        }
        if let Some(array) = &self.surface_array {
            match options.search_depth {
                SearchDepth::Exhaustive => {
                    for surface in array.surfaces() {
                        candidates.push(surface, true);
                    }
                }
                SearchDepth::Neighbourhood => {
                    let impact = self.impact_point(position, &direction);
                    for surface in array.neighbours(&impact) {
                        candidates.push(surface, true);
                    }
                }
            }
        }
        candidates.push(self.surface_representation(), false);
        let candidates = candidates.into_inner();

        let mut results: Vec<SurfaceIntersection<'_>> = candidates
            .iter()
            .filter_map(|candidate| {
                let trial =
                    candidate
                        .surface
                        .intersect(position, &direction, options.boundary_check);
                let hit = corrector.correct(candidate.surface, trial)?;
                (hit.is_forward() && options.within_path_limit(hit.path_length))
                    .then(|| SurfaceIntersection::new(hit, candidate.surface))
            })
            .collect();
        results.sort_by(|a, b| Intersection::forward_order(&a.intersection, &b.intersection));

        trace!(
            layer = %closure.geometry_id,
            candidates = candidates.len(),
            sensitive = candidates.iter().filter(|c| c.sensitive).count(),
            results = results.len(),
            "compatible surface search"
        );
        Ok(results)
    }

    /// The surface through which the trajectory enters the layer.
    ///
    /// See [`surface_on_approach_with`](Self::surface_on_approach_with).
    pub fn surface_on_approach<P>(
        &self,
        parameters: &P,
        options: &NavigationOptions,
    ) -> Result<SurfaceIntersection<'_>, LayerError>
    where
        P: TrackParameters + ?Sized,
    {
        self.surface_on_approach_with(parameters, options, &VoidCorrector)
    }

    /// The surface through which the trajectory enters the layer, with
    /// trial intersections passed through `corrector`.
    ///
    /// Under sensitive or passive resolution, or material resolution on a
    /// layer carrying material, the approach descriptor is asked first. If
    /// it has no reachable surface, or there is no descriptor, the
    /// representing surface intersection is returned; it is marked invalid
    /// when it lies behind the start, beyond the path limit, on an excluded
    /// surface, or the corrector rejects it.
    pub fn surface_on_approach_with<P>(
        &self,
        parameters: &P,
        options: &NavigationOptions,
        corrector: &dyn Corrector,
    ) -> Result<SurfaceIntersection<'_>, LayerError>
    where
        P: TrackParameters + ?Sized,
    {
        let closure = self.closed()?;
        options.validate()?;

        let position = parameters.position();
        let wants_approach = options.resolve_sensitive
            || options.resolve_passive
            || (options.resolve_material && self.substructure().carries_material());
        if wants_approach {
            if let Some(descriptor) = self.approach_descriptor() {
                if let Some(hit) =
                    descriptor.approach_surface(position, parameters.direction(), options, corrector)
                {
                    trace!(layer = %closure.geometry_id, path = hit.path_length(), "approach surface");
                    return Ok(hit);
                }
            }
        }

        let surface = self.surface_representation();
        let direction = options.direction.apply(parameters.direction());
        let trial = surface.intersect(position, &direction, options.boundary_check);
        let hit = match corrector.correct(surface, trial) {
            Some(hit)
                if hit.is_forward()
                    && options.within_path_limit(hit.path_length)
                    && !options.is_excluded(surface.instance_id()) =>
            {
                hit
            }
            Some(hit) => hit.invalidated(),
            None => trial.invalidated(),
        };
        trace!(layer = %closure.geometry_id, valid = hit.valid, "representing surface on approach");
        Ok(SurfaceIntersection::new(hit, surface))
    }

    /// The neighbouring layer in the direction of travel.
    ///
    /// Compares the neighbour axis value of `position` and one unit along
    /// `direction`: a decrease selects the previous layer, anything else
    /// the next. `None` when the layer has no neighbours or the neighbour
    /// was dropped. Fails with [`LayerError::NotClosed`] before closure.
    pub fn next_layer(
        &self,
        position: &Position,
        direction: &Direction,
    ) -> Result<Option<Arc<Layer>>, LayerError> {
        self.closed()?;
        let Some(links) = self.next_layers.get() else {
            return Ok(None);
        };
        let here = links.axis.value(position);
        let ahead = links.axis.value(&(position + direction.into_inner()));
        let chosen = if ahead < here {
            links.previous.as_ref()
        } else {
            links.next.as_ref()
        };
        Ok(chosen.and_then(Weak::upgrade))
    }

    // ── Volume-facing lifecycle ─────────────────────────────────

    /// Compute the closure state for `layer_id` without applying it.
    ///
    /// Builds the approach descriptor when none was supplied: from the
    /// representing volume's boundary if one was registered, otherwise from
    /// the representation default. Approach surfaces get approach indices
    /// and array surfaces sensitive indices, both one-based. Fails if the
    /// layer is already closed or an index overflows its identifier field.
    pub(crate) fn prepare_closure(&self, layer_id: GeometryId) -> Result<Closure, LayerError> {
        if let Some(closure) = self.closure.get() {
            return Err(LayerError::AlreadyClosed {
                existing: closure.geometry_id,
            });
        }

        let (built_approach, origin): (Option<Box<dyn ApproachDescriptor>>, &'static str) =
            if self.approach_descriptor.is_some() {
                (None, "supplied")
            } else if let Some(volume) = self.representing_volume() {
                let built: Box<dyn ApproachDescriptor> =
                    Box::new(GenericApproachDescriptor::new(volume.boundary_surfaces()));
                (Some(built), "representing volume")
            } else {
                let built = self.representation.build_approach_descriptor(self.thickness);
                let origin = if built.is_some() { "default" } else { "none" };
                (built, origin)
            };

        let approach_descriptor = self
            .approach_descriptor
            .as_deref()
            .or(built_approach.as_deref());
        let approach_code = approach_descriptor.map_or(SubStructure::Absent, approach_code);

        let mut surface_ids = IndexMap::new();
        surface_ids.insert(self.surface_representation().instance_id(), layer_id);
        if let Some(descriptor) = approach_descriptor {
            for (index, surface) in descriptor.contained_surfaces().iter().enumerate() {
                surface_ids.insert(
                    surface.instance_id(),
                    checked_id(layer_id, GeometryField::Approach, index as u64 + 1)?,
                );
            }
        }

        let mut detector_elements = IndexMap::new();
        if let Some(array) = &self.surface_array {
            for (index, surface) in array.surfaces().enumerate() {
                surface_ids.insert(
                    surface.instance_id(),
                    checked_id(layer_id, GeometryField::Sensitive, index as u64 + 1)?,
                );
                if let Some(element) = surface.associated_element() {
                    if let Some(previous) = detector_elements.insert(element, index) {
                        warn!(
                            layer = %layer_id,
                            %element,
                            previous,
                            index,
                            "duplicate detector element, later surface wins"
                        );
                    }
                }
            }
        }

        Ok(Closure {
            geometry_id: layer_id,
            built_approach,
            approach_origin: origin,
            approach_code,
            detector_elements,
            surface_ids,
        })
    }

    /// Freeze the layer with a closure computed by
    /// [`prepare_closure`](Self::prepare_closure).
    pub(crate) fn commit_closure(&self, closure: Closure) -> Result<(), LayerError> {
        let layer_id = closure.geometry_id;
        let origin = closure.approach_origin;
        let elements = closure.detector_elements.len();
        if let Err(rejected) = self.closure.set(closure) {
            let existing = self.geometry_id().unwrap_or(rejected.geometry_id);
            return Err(LayerError::AlreadyClosed { existing });
        }
        debug!(layer = %layer_id, approach = origin, elements, "closed layer geometry");
        Ok(())
    }

    /// Record the tracking volume that encloses this closed layer.
    pub(crate) fn enclose_tracking_volume(
        &self,
        volume: Weak<TrackingVolume>,
    ) -> Result<(), LayerError> {
        self.enclose(Enclosure::Tracking(volume))
    }

    /// Record the detached tracking volume that encloses this closed layer.
    pub(crate) fn enclose_detached_tracking_volume(
        &self,
        volume: Weak<DetachedTrackingVolume>,
    ) -> Result<(), LayerError> {
        self.enclose(Enclosure::Detached(volume))
    }

    fn enclose(&self, enclosure: Enclosure) -> Result<(), LayerError> {
        let closure = self.closed()?;
        let kind = match enclosure {
            Enclosure::Tracking(_) => "tracking",
            Enclosure::Detached(_) => "detached",
        };
        self.enclosure
            .set(enclosure)
            .map_err(|_| LayerError::AlreadyEnclosed)?;
        debug!(layer = %closure.geometry_id, kind, "layer enclosed");
        Ok(())
    }

    /// Record the neighbouring layers and the axis selecting between them.
    pub(crate) fn set_next_layers(
        &self,
        previous: Option<&Arc<Layer>>,
        next: Option<&Arc<Layer>>,
        axis: BinningAxis,
    ) -> Result<(), LayerError> {
        self.next_layers
            .set(NextLayers {
                previous: previous.map(Arc::downgrade),
                next: next.map(Arc::downgrade),
                axis,
            })
            .map_err(|_| LayerError::NeighboursAlreadySet)
    }

    // ── Internals ───────────────────────────────────────────────

    fn closed(&self) -> Result<&Closure, LayerError> {
        self.closure.get().ok_or(LayerError::NotClosed)
    }

    fn accepts(&self, sensitive: bool, material: bool, passive: bool) -> bool {
        passive
            || (sensitive && self.layer_type == LayerType::Active)
            || (material && self.substructure().carries_material())
    }

    /// Projected impact point on the representing surface, or `position`
    /// when the line never meets it.
    fn impact_point(&self, position: &Position, direction: &Direction) -> Position {
        let hit = self
            .surface_representation()
            .intersect(position, direction, BoundaryCheck::Unbounded);
        if hit.valid {
            hit.position
        } else {
            *position
        }
    }
}

/// `id` with `field` set to `value`, refusing values the field cannot hold.
pub(crate) fn checked_id(
    id: GeometryId,
    field: GeometryField,
    value: u64,
) -> Result<GeometryId, LayerError> {
    id.checked_with(field, value)
        .ok_or(LayerError::IdentifierOverflow { field, value })
}

fn approach_code(descriptor: &(dyn ApproachDescriptor + '_)) -> SubStructure {
    SubStructure::of(descriptor.contained_surfaces().iter().map(|s| s.as_ref()))
}

/// Read-only view of the detector elements of a closed layer.
#[derive(Clone, Copy, Debug)]
pub struct DetectorElements<'a> {
    elements: &'a IndexMap<ElementId, usize>,
    array: Option<&'a SurfaceArray>,
}

impl<'a> DetectorElements<'a> {
    /// The sensitive surface reading out `element`.
    pub fn get(&self, element: ElementId) -> Option<&'a dyn Surface> {
        let index = *self.elements.get(&element)?;
        self.array?.get(index)
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no element is registered.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements and their surfaces, in array order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &'a dyn Surface)> + 'a {
        let array = self.array;
        self.elements
            .iter()
            .filter_map(move |(&element, &index)| Some((element, array?.get(index)?)))
    }
}
