//! The editable sketch: a street layout plus an ordered set of placed elements.
//!
//! [`Scene`] is the only way to mutate a sketch. Every mutation is
//! synchronous and enforces the scene invariants on the spot: positions are
//! clamped to the movable area, rotations are folded into `[0, 360)`, and
//! element ids are never handed out twice.
//!
//! Mutations addressed to an id that is not in the scene are silent no-ops,
//! reported through the return value and a debug log.

mod element;
pub mod file;

pub use element::{
    ElementId, ElementKind, Owner, OwnershipRule, ParseKindError, ParseLayoutError,
    ParseOwnerError, PlacedElement, StreetLayout,
};

use indexmap::IndexMap;
use log::{debug, trace, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

use croquis_core::geometry::{Bounds, Point, normalize_degrees};

use crate::config::{AppConfig, CanvasConfig, OwnershipConfig};

/// An editable sketch.
///
/// # Examples
///
/// ```
/// # use croquis::config::AppConfig;
/// # use croquis::scene::{ElementKind, Owner, Scene, StreetLayout};
/// let mut scene = Scene::new(&AppConfig::default());
/// let car = scene.add_element(ElementKind::Car, Some(Owner::FirstParty));
///
/// // Positions are clamped to 20 px inside the 400x500 canvas.
/// scene.move_element(car, 1000.0, -50.0);
/// let placed = scene.element(car).unwrap();
/// assert_eq!(placed.position().x(), 380.0);
/// assert_eq!(placed.position().y(), 20.0);
///
/// scene.set_layout(StreetLayout::Roundabout);
/// assert_eq!(scene.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Scene {
    layout: StreetLayout,
    elements: IndexMap<ElementId, PlacedElement>,
    next_id: u64,
    canvas: CanvasConfig,
    ownership: OwnershipConfig,
    rng: Option<StdRng>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl Scene {
    /// Creates an empty scene with the cross layout.
    ///
    /// When the canvas configuration carries a seed, spawn positions are
    /// drawn from a generator seeded with it; otherwise the thread-local
    /// generator is used.
    pub fn new(config: &AppConfig) -> Self {
        let canvas = config.canvas().clone();
        let rng = canvas.seed().map(StdRng::seed_from_u64);
        Self {
            layout: StreetLayout::default(),
            elements: IndexMap::new(),
            next_id: 1,
            canvas,
            ownership: config.ownership().clone(),
            rng,
        }
    }

    /// Returns the active street layout.
    pub fn layout(&self) -> StreetLayout {
        self.layout
    }

    /// Replaces the street layout. Elements are left untouched.
    pub fn set_layout(&mut self, layout: StreetLayout) {
        debug!(from = self.layout.name(), to = layout.name(); "Street layout changed");
        self.layout = layout;
    }

    /// Returns the elements in z-order (first is bottom-most).
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &PlacedElement> + ExactSizeIterator {
        self.elements.values()
    }

    /// Returns the element with the given id, if present.
    pub fn element(&self, id: ElementId) -> Option<&PlacedElement> {
        self.elements.get(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the canvas rectangle.
    pub fn bounds(&self) -> Bounds {
        self.canvas.bounds()
    }

    /// Returns the canvas configuration the scene was created with.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the ownership rule applied to `kind` when it is added.
    pub fn ownership_rule(&self, kind: ElementKind) -> OwnershipRule {
        self.ownership.rule(kind)
    }

    /// Appends a new element at a random point of the spawn region.
    ///
    /// The ownership rule of `kind` decides the final owner: kinds without
    /// owners drop `owner`, automatic rules replace it, and prompting kinds
    /// keep it. A prompting kind added without an owner is tagged
    /// first-party and a warning is logged.
    pub fn add_element(&mut self, kind: ElementKind, owner: Option<Owner>) -> ElementId {
        let owner = self.resolve_owner(kind, owner);

        let spawn = self.canvas.spawn_area();
        let x = self.sample(spawn.min_x(), spawn.width());
        let y = self.sample(spawn.min_y(), spawn.height());
        let position = self.canvas.movable_area().clamp(Point::new(x, y));

        let id = ElementId::new(self.next_id);
        self.next_id += 1;

        self.elements
            .insert(id, PlacedElement::new(id, kind, owner, position));

        debug!(
            id:% = id,
            kind = kind.name(),
            owner:? = owner,
            x = position.x(),
            y = position.y();
            "Element added"
        );

        id
    }

    /// Moves an element, clamping the target to the movable area.
    ///
    /// Returns `false` if no element has the given id.
    pub fn move_element(&mut self, id: ElementId, x: f32, y: f32) -> bool {
        let area = self.canvas.movable_area();
        match self.elements.get_mut(&id) {
            Some(element) => {
                let position = area.clamp(Point::new(x, y));
                element.set_position(position);
                trace!(id:% = id, x = position.x(), y = position.y(); "Element moved");
                true
            }
            None => {
                debug!(id:% = id; "Move ignored, element not found");
                false
            }
        }
    }

    /// Sets an element's rotation, normalized into `[0, 360)`.
    ///
    /// Returns `false` if no element has the given id.
    pub fn rotate_element(&mut self, id: ElementId, degrees: f32) -> bool {
        match self.elements.get_mut(&id) {
            Some(element) => {
                let rotation = normalize_degrees(degrees);
                element.set_rotation(rotation);
                trace!(id:% = id, rotation; "Element rotated");
                true
            }
            None => {
                debug!(id:% = id; "Rotation ignored, element not found");
                false
            }
        }
    }

    /// Removes an element, keeping the order of the others.
    ///
    /// Returns `false` if no element has the given id.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        let removed = self.elements.shift_remove(&id).is_some();
        if removed {
            debug!(id:% = id, remaining = self.elements.len(); "Element deleted");
        } else {
            debug!(id:% = id; "Delete ignored, element not found");
        }
        removed
    }

    /// Removes every element. The layout is kept.
    pub fn clear(&mut self) {
        debug!(removed = self.elements.len(); "Scene cleared");
        self.elements.clear();
    }

    /// Removes every element and restores the cross layout.
    ///
    /// Id allocation continues where it left off.
    pub fn reset(&mut self) {
        self.clear();
        self.layout = StreetLayout::default();
    }

    fn resolve_owner(&self, kind: ElementKind, owner: Option<Owner>) -> Option<Owner> {
        match self.ownership.rule(kind) {
            OwnershipRule::None => {
                if owner.is_some() {
                    debug!(kind = kind.name(); "Owner dropped, kind carries no owner");
                }
                None
            }
            OwnershipRule::Prompt => Some(owner.unwrap_or_else(|| {
                warn!(kind = kind.name(); "No owner chosen, defaulting to first party");
                Owner::FirstParty
            })),
            OwnershipRule::AutoFirstParty => Some(Owner::FirstParty),
            OwnershipRule::AutoThirdParty => Some(Owner::ThirdParty),
        }
    }

    /// Draws a value from `[min, min + extent)`.
    ///
    /// Empty, infinite and NaN extents yield `min`; the caller clamps the
    /// result into the movable area.
    fn sample(&mut self, min: f32, extent: f32) -> f32 {
        if !(extent.is_finite() && extent > 0.0) {
            debug!(min, extent; "Degenerate spawn range, using its start");
            return min;
        }
        let offset = match &mut self.rng {
            Some(rng) => rng.random_range(0.0..extent),
            None => rand::rng().random_range(0.0..extent),
        };
        min + offset
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Property Test Functions
    // ===================

    /// Any move leaves the element inside `[20, 380] x [20, 480]`.
    fn check_move_is_clamped(x: f32, y: f32) -> Result<(), TestCaseError> {
        let mut scene = Scene::default();
        let id = scene.add_element(ElementKind::Car, Some(Owner::FirstParty));
        scene.move_element(id, x, y);

        let p = scene.element(id).unwrap().position();
        prop_assert!((20.0..=380.0).contains(&p.x()));
        prop_assert!((20.0..=480.0).contains(&p.y()));

        // In-range coordinates are kept exactly.
        if (20.0..=380.0).contains(&x) {
            prop_assert_eq!(p.x(), x);
        }
        if (20.0..=480.0).contains(&y) {
            prop_assert_eq!(p.y(), y);
        }
        Ok(())
    }

    /// Any rotation is stored within `[0, 360)`.
    fn check_rotation_is_normalized(degrees: f32) -> Result<(), TestCaseError> {
        let mut scene = Scene::default();
        let id = scene.add_element(ElementKind::Truck, Some(Owner::FirstParty));
        scene.rotate_element(id, degrees);

        let rotation = scene.element(id).unwrap().rotation();
        prop_assert!((0.0..360.0).contains(&rotation));
        Ok(())
    }

    /// Deleting one element removes exactly that element.
    fn check_delete_removes_exactly_one(count: usize, victim: usize) -> Result<(), TestCaseError> {
        let mut scene = Scene::default();
        let ids: Vec<_> = (0..count)
            .map(|_| scene.add_element(ElementKind::Pedestrian, None))
            .collect();
        let victim = ids[victim % count];

        prop_assert!(scene.delete_element(victim));
        prop_assert_eq!(scene.len(), count - 1);
        prop_assert!(scene.element(victim).is_none());

        let expected: Vec<_> = ids.into_iter().filter(|id| *id != victim).collect();
        let actual: Vec<_> = scene.elements().map(|e| e.id()).collect();
        prop_assert_eq!(actual, expected);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn move_is_clamped(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
            check_move_is_clamped(x, y)?;
        }

        #[test]
        fn rotation_is_normalized(degrees in -100_000.0f32..100_000.0) {
            check_rotation_is_normalized(degrees)?;
        }

        #[test]
        fn delete_removes_exactly_one(count in 1usize..20, victim in 0usize..20) {
            check_delete_removes_exactly_one(count, victim)?;
        }
    }
}
