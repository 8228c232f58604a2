//! Resolving surface points to element targets.

use croquis_core::geometry::Point;

use crate::{
    glyph,
    scene::{ElementId, PlacedElement, Scene},
};

/// Horizontal distance of each control from the element's vertical axis.
pub const CONTROL_SPREAD: f32 = 14.0;
/// Distance between the element's top edge and the control centers.
pub const CONTROL_GAP: f32 = 14.0;
/// Radius of the circular control buttons.
pub const CONTROL_RADIUS: f32 = 9.0;

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    RotateHandle,
    DeleteHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element: ElementId,
    pub part: HitPart,
}

impl Hit {
    pub fn new(element: ElementId, part: HitPart) -> Self {
        Self { element, part }
    }
}

/// Center of a control in the element's local, unrotated frame.
///
/// Returns `None` for [`HitPart::Body`].
pub fn control_anchor(element: &PlacedElement, part: HitPart) -> Option<Point> {
    let top = -glyph::footprint(element.kind()).height() / 2.0 - CONTROL_GAP;
    match part {
        HitPart::Body => None,
        HitPart::RotateHandle => Some(Point::new(-CONTROL_SPREAD, top)),
        HitPart::DeleteHandle => Some(Point::new(CONTROL_SPREAD, top)),
    }
}

/// Maps a surface point into the element's local frame.
fn to_local(element: &PlacedElement, point: Point) -> Point {
    point
        .sub_point(element.position())
        .rotate(-element.rotation())
}

fn control_at(element: &PlacedElement, local: Point) -> Option<HitPart> {
    [HitPart::RotateHandle, HitPart::DeleteHandle]
        .into_iter()
        .find(|&part| {
            control_anchor(element, part)
                .is_some_and(|anchor| local.sub_point(anchor).hypot() <= CONTROL_RADIUS)
        })
}

fn body_contains(element: &PlacedElement, local: Point) -> bool {
    let size = glyph::footprint(element.kind());
    local.x().abs() <= size.width() / 2.0 && local.y().abs() <= size.height() / 2.0
}

/// Tests which element (if any) is under `point`.
///
/// The selected element's controls are checked first, then the controls of
/// every element, then element bodies. Within each pass the topmost element
/// (last in z-order) wins.
///
/// Controls are not stacked per element: every control beats every body, so
/// a lower element's rotate or delete control that overlaps a higher
/// element's body takes the hit. This mirrors the preview, which draws all
/// controls on the chrome layer above all glyphs.
#[must_use]
pub fn hit_test(scene: &Scene, selected: Option<ElementId>, point: Point) -> Option<Hit> {
    if let Some(element) = selected.and_then(|id| scene.element(id)) {
        if let Some(part) = control_at(element, to_local(element, point)) {
            return Some(Hit::new(element.id(), part));
        }
    }

    let controls = scene.elements().rev().find_map(|element| {
        control_at(element, to_local(element, point)).map(|part| Hit::new(element.id(), part))
    });
    if controls.is_some() {
        return controls;
    }

    scene
        .elements()
        .rev()
        .find(|element| body_contains(element, to_local(element, point)))
        .map(|element| Hit::new(element.id(), HitPart::Body))
}
