//! Pointer gestures over a scene.
//!
//! [`Controller`] turns pointer events into scene mutations. It owns the
//! transient [`InteractionState`] (the gesture in progress) and the selected
//! element id, neither of which is part of the scene itself.
//!
//! Hosts either pass the resolved [`Hit`] of each pointer-down and click
//! themselves, or use the `*_at` variants, which resolve it with
//! [`hit_test`].

mod hit;

pub use hit::{
    CONTROL_GAP, CONTROL_RADIUS, CONTROL_SPREAD, Hit, HitPart, control_anchor, hit_test,
};

use log::{debug, trace};

use croquis_core::geometry::Point;

use crate::scene::{ElementId, Scene};

/// The gesture currently being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving an element with its body.
    Dragging {
        /// Element being moved.
        id: ElementId,
        /// Pointer position minus element position at drag start.
        offset: Point,
    },
    /// Turning an element with its rotate control.
    Rotating {
        /// Element being rotated.
        id: ElementId,
        /// Bearing of the pointer from the element center at gesture start.
        start_angle: f32,
        /// Element rotation at gesture start.
        start_rotation: f32,
    },
}

impl InteractionState {
    /// Returns the element the gesture acts on.
    pub fn target(self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Rotating { id, .. } => Some(id),
        }
    }

    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }
}

/// Translates pointer input into scene mutations.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: InteractionState,
    selected: Option<ElementId>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Returns the highlighted element, if any.
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Starts a gesture on `target`.
    ///
    /// A body starts a drag, a rotate control starts a rotation. Empty
    /// surface, delete controls and ids missing from the scene leave the
    /// state untouched. Any gesture already in progress is replaced.
    pub fn pointer_down(&mut self, scene: &Scene, target: Option<Hit>, pointer: Point) {
        let Some(hit) = target else {
            return;
        };
        let Some(element) = scene.element(hit.element) else {
            debug!(id:% = hit.element; "Pointer down ignored, element not found");
            return;
        };

        let next = match hit.part {
            HitPart::Body => InteractionState::Dragging {
                id: element.id(),
                offset: pointer.sub_point(element.position()),
            },
            HitPart::RotateHandle => InteractionState::Rotating {
                id: element.id(),
                start_angle: pointer.angle_from(element.position()),
                start_rotation: element.rotation(),
            },
            HitPart::DeleteHandle => return,
        };

        debug!(state:? = next; "Gesture started");
        self.state = next;
    }

    /// Resolves the target under `pointer` and starts a gesture on it.
    pub fn pointer_down_at(&mut self, scene: &Scene, pointer: Point) {
        let target = hit_test(scene, self.selected, pointer);
        self.pointer_down(scene, target, pointer);
    }

    /// Advances the gesture in progress.
    ///
    /// Dragging moves the element so the pointer keeps its start offset;
    /// rotating adds the pointer's angular travel around the element center
    /// to the start rotation. The scene clamps and normalizes the result.
    pub fn pointer_move(&mut self, scene: &mut Scene, pointer: Point) {
        match self.state {
            InteractionState::Idle => {}
            InteractionState::Dragging { id, offset } => {
                let target = pointer.sub_point(offset);
                scene.move_element(id, target.x(), target.y());
            }
            InteractionState::Rotating {
                id,
                start_angle,
                start_rotation,
            } => {
                let Some(center) = scene.element(id).map(|e| e.position()) else {
                    trace!(id:% = id; "Rotation target gone");
                    return;
                };
                let angle = pointer.angle_from(center);
                scene.rotate_element(id, start_rotation + (angle - start_angle));
            }
        }
    }

    /// Ends the gesture in progress.
    pub fn pointer_up(&mut self) {
        self.finish("pointer up");
    }

    /// Ends the gesture in progress when the pointer leaves the surface.
    pub fn pointer_leave(&mut self) {
        self.finish("pointer leave");
    }

    fn finish(&mut self, reason: &str) {
        if !self.state.is_idle() {
            debug!(reason; "Gesture ended");
        }
        self.state = InteractionState::Idle;
    }

    /// Handles a click on `target`.
    ///
    /// Clicking a body toggles its selection. Clicking a delete control
    /// removes the element and drops the selection if it pointed at it;
    /// the selection is otherwise left alone. Rotate controls and empty
    /// surface do nothing.
    pub fn click(&mut self, scene: &mut Scene, target: Option<Hit>) {
        let Some(hit) = target else {
            return;
        };

        match hit.part {
            HitPart::Body => {
                if scene.element(hit.element).is_none() {
                    return;
                }
                self.selected = if self.selected == Some(hit.element) {
                    None
                } else {
                    Some(hit.element)
                };
                debug!(selected:? = self.selected.map(ElementId::get); "Selection changed");
            }
            HitPart::DeleteHandle => {
                if scene.delete_element(hit.element) && self.selected == Some(hit.element) {
                    self.selected = None;
                }
                if self.state.target() == Some(hit.element) {
                    self.state = InteractionState::Idle;
                }
            }
            HitPart::RotateHandle => {}
        }
    }

    /// Resolves the target under `pointer` and clicks it.
    pub fn click_at(&mut self, scene: &mut Scene, pointer: Point) {
        let target = hit_test(scene, self.selected, pointer);
        self.click(scene, target);
    }

    /// Drops the gesture and the selection.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::scene::{ElementKind, Owner};

    fn scene_with_car() -> (Scene, ElementId) {
        let mut scene = Scene::default();
        let id = scene.add_element(ElementKind::Car, Some(Owner::FirstParty));
        scene.move_element(id, 200.0, 250.0);
        (scene, id)
    }

    fn body(id: ElementId) -> Option<Hit> {
        Some(Hit::new(id, HitPart::Body))
    }

    #[test]
    fn test_drag_keeps_pointer_offset() {
        let (mut scene, id) = scene_with_car();
        let mut controller = Controller::new();

        controller.pointer_down(&scene, body(id), Point::new(205.0, 253.0));
        assert_eq!(
            controller.state(),
            InteractionState::Dragging {
                id,
                offset: Point::new(5.0, 3.0)
            }
        );

        controller.pointer_move(&mut scene, Point::new(100.0, 100.0));
        assert_eq!(scene.element(id).unwrap().position(), Point::new(95.0, 97.0));

        controller.pointer_move(&mut scene, Point::new(120.0, 130.0));
        assert_eq!(scene.element(id).unwrap().position(), Point::new(115.0, 127.0));

        controller.pointer_up();
        assert!(controller.state().is_idle());

        controller.pointer_move(&mut scene, Point::new(300.0, 300.0));
        assert_eq!(scene.element(id).unwrap().position(), Point::new(115.0, 127.0));
    }

    #[test]
    fn test_drag_is_clamped_by_scene() {
        let (mut scene, id) = scene_with_car();
        let mut controller = Controller::new();

        controller.pointer_down(&scene, body(id), Point::new(200.0, 250.0));
        controller.pointer_move(&mut scene, Point::new(-40.0, 900.0));
        assert_eq!(scene.element(id).unwrap().position(), Point::new(20.0, 480.0));
    }

    #[test]
    fn test_rotation_tracks_angular_delta() {
        let (mut scene, id) = scene_with_car();
        scene.rotate_element(id, 30.0);
        let mut controller = Controller::new();

        // Straight above the center: bearing -90.
        controller.pointer_down(
            &scene,
            Some(Hit::new(id, HitPart::RotateHandle)),
            Point::new(200.0, 150.0),
        );
        match controller.state() {
            InteractionState::Rotating {
                start_angle,
                start_rotation,
                ..
            } => {
                assert_approx_eq!(f32, start_angle, -90.0);
                assert_approx_eq!(f32, start_rotation, 30.0);
            }
            other => panic!("Expected rotating, got {other:?}"),
        }

        controller.pointer_move(&mut scene, Point::new(300.0, 250.0));
        assert_approx_eq!(f32, scene.element(id).unwrap().rotation(), 120.0, epsilon = 1e-3);

        controller.pointer_move(&mut scene, Point::new(200.0, 350.0));
        assert_approx_eq!(f32, scene.element(id).unwrap().rotation(), 210.0, epsilon = 1e-3);

        // Past the -180/180 seam the rotation stays continuous.
        controller.pointer_move(&mut scene, Point::new(100.0, 260.0));
        let rotation = scene.element(id).unwrap().rotation();
        assert!((0.0..360.0).contains(&rotation));
        assert!(rotation > 290.0 && rotation < 310.0, "rotation = {rotation}");

        controller.pointer_leave();
        assert!(controller.state().is_idle());
    }

    #[test]
    fn test_grabbing_rotate_handle_keeps_rotation() {
        let (mut scene, id) = scene_with_car();
        scene.rotate_element(id, 45.0);
        let element = scene.element(id).unwrap();
        let handle = control_anchor(element, HitPart::RotateHandle)
            .unwrap()
            .rotate(element.rotation())
            .add_point(element.position());
        let mut controller = Controller::new();

        controller.pointer_down_at(&scene, handle);
        assert!(matches!(
            controller.state(),
            InteractionState::Rotating { id: target, .. } if target == id
        ));
        assert_approx_eq!(f32, scene.element(id).unwrap().rotation(), 45.0);

        controller.pointer_move(&mut scene, handle);
        assert_approx_eq!(f32, scene.element(id).unwrap().rotation(), 45.0, epsilon = 1e-3);

        controller.pointer_up();
        assert_approx_eq!(f32, scene.element(id).unwrap().rotation(), 45.0, epsilon = 1e-3);
        assert_eq!(scene.element(id).unwrap().position(), Point::new(200.0, 250.0));
    }

    #[test]
    fn test_pointer_down_on_empty_surface_keeps_state() {
        let (scene, id) = scene_with_car();
        let mut controller = Controller::new();

        controller.pointer_down(&scene, None, Point::new(10.0, 10.0));
        assert!(controller.state().is_idle());

        controller.pointer_down(&scene, body(id), Point::new(200.0, 250.0));
        controller.pointer_down(&scene, None, Point::new(10.0, 10.0));
        assert_eq!(controller.state().target(), Some(id));
    }

    #[test]
    fn test_new_gesture_replaces_active_one() {
        let (mut scene, first) = scene_with_car();
        let second = scene.add_element(ElementKind::Pedestrian, None);
        let mut controller = Controller::new();

        controller.pointer_down(&scene, body(first), Point::new(200.0, 250.0));
        controller.pointer_down(
            &scene,
            Some(Hit::new(second, HitPart::RotateHandle)),
            Point::new(0.0, 0.0),
        );
        assert!(matches!(
            controller.state(),
            InteractionState::Rotating { id, .. } if id == second
        ));
    }

    #[test]
    fn test_missing_element_is_ignored() {
        let (mut scene, id) = scene_with_car();
        let mut controller = Controller::new();

        controller.pointer_down(&scene, body(id), Point::new(200.0, 250.0));
        scene.delete_element(id);
        controller.pointer_move(&mut scene, Point::new(50.0, 50.0));
        assert!(scene.is_empty());

        controller.pointer_up();
        controller.pointer_down(&scene, body(id), Point::new(0.0, 0.0));
        assert!(controller.state().is_idle());
    }

    #[test]
    fn test_click_toggles_selection() {
        let (mut scene, id) = scene_with_car();
        let mut controller = Controller::new();

        controller.click(&mut scene, body(id));
        assert_eq!(controller.selected(), Some(id));
        controller.click(&mut scene, body(id));
        assert_eq!(controller.selected(), None);

        controller.click(&mut scene, None);
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn test_delete_control_removes_and_clears_selection() {
        let (mut scene, id) = scene_with_car();
        let other = scene.add_element(ElementKind::Truck, Some(Owner::ThirdParty));
        let mut controller = Controller::new();

        controller.click(&mut scene, body(other));
        controller.click(&mut scene, Some(Hit::new(id, HitPart::DeleteHandle)));
        assert!(scene.element(id).is_none());
        assert_eq!(controller.selected(), Some(other));

        controller.click(&mut scene, Some(Hit::new(other, HitPart::DeleteHandle)));
        assert!(scene.is_empty());
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn test_at_variants_resolve_targets() {
        let (mut scene, id) = scene_with_car();
        let mut controller = Controller::new();

        controller.click_at(&mut scene, Point::new(200.0, 250.0));
        assert_eq!(controller.selected(), Some(id));

        controller.pointer_down_at(&scene, Point::new(186.0, 200.0));
        assert!(matches!(controller.state(), InteractionState::Rotating { .. }));
        controller.pointer_up();

        controller.click_at(&mut scene, Point::new(214.0, 200.0));
        assert!(scene.is_empty());
        assert_eq!(controller.selected(), None);
    }
}
