//! Pointer/touch input tracking and conversion from platform events.
//!
//! [`PointerTracker`] is the stateful bridge between winit events and the
//! scene's interaction points. Feed it the raw events, hand its points to
//! [`Scene::dispatch`](crate::scene::Scene::dispatch), and call
//! [`end_frame`](PointerTracker::end_frame) once per frame to retire edge
//! flags and released touch contacts.
//!
//! ```ignore
//! use prism_stage::input::PointerTracker;
//!
//! let mut tracker = PointerTracker::new();
//!
//! // in the winit event handler:
//! match event {
//!     WindowEvent::CursorMoved { position, .. } => {
//!         tracker.handle_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
//!     }
//!     WindowEvent::MouseInput { state, button, .. } => {
//!         tracker.handle_mouse_input(state, button);
//!     }
//!     WindowEvent::Touch(touch) => {
//!         tracker.handle_touch(&touch);
//!     }
//!     _ => {}
//! }
//!
//! // once per frame:
//! scene.dispatch(tracker.points_mut());
//! scene.update();
//! tracker.end_frame();
//! ```

use std::collections::HashMap;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase};

use crate::scene::{InteractionPoint, PointId, PointerKind};

/// The persistent mouse point id. Touch contacts start at 1.
const MOUSE_POINT: PointId = PointId(0);

/// Tracks live interaction points across platform input events.
///
/// The mouse point is created on first contact and persists; touch points
/// are created on `Started` and discarded by [`end_frame`](Self::end_frame)
/// after the frame that dispatched their release.
#[derive(Debug)]
pub struct PointerTracker {
    points: Vec<InteractionPoint>,
    /// winit touch id to interaction point id.
    touch_ids: HashMap<u64, PointId>,
    next_id: u64,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            touch_ids: HashMap::new(),
            next_id: 1,
        }
    }

    /// The live interaction points.
    pub fn points(&self) -> &[InteractionPoint] {
        &self.points
    }

    /// Mutable access for scene dispatch.
    pub fn points_mut(&mut self) -> &mut [InteractionPoint] {
        &mut self.points
    }

    /// Number of live points (mouse plus active touches).
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    fn mouse_index(&mut self) -> usize {
        match self.points.iter().position(|p| p.id == MOUSE_POINT) {
            Some(index) => index,
            None => {
                self.points.push(InteractionPoint::new(
                    MOUSE_POINT,
                    PointerKind::Mouse,
                    Vec2::ZERO,
                ));
                self.points.len() - 1
            }
        }
    }

    fn point_index(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    /// Handle a cursor-moved event.
    pub fn handle_cursor_moved(&mut self, pos: Vec2) {
        let index = self.mouse_index();
        self.points[index].pos = pos;
    }

    /// Handle a mouse button event.
    ///
    /// Only the left button participates in the press/capture state
    /// machine; other buttons are ignored.
    pub fn handle_mouse_input(&mut self, state: ElementState, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        let index = self.mouse_index();
        let point = &mut self.points[index];
        match state {
            ElementState::Pressed => point.press(),
            ElementState::Released => point.release(),
        }
    }

    /// Handle a winit touch event.
    pub fn handle_touch(&mut self, touch: &Touch) {
        let pos = Vec2::new(touch.location.x as f32, touch.location.y as f32);
        self.touch_event(touch.id, touch.phase, pos);
    }

    /// Handle a touch transition by raw id/phase/position.
    ///
    /// `Cancelled` is treated as a release: the point runs one release
    /// pass through dispatch and is then discarded.
    pub fn touch_event(&mut self, touch_id: u64, phase: TouchPhase, pos: Vec2) {
        match phase {
            TouchPhase::Started => {
                let id = PointId(self.next_id);
                self.next_id += 1;
                self.touch_ids.insert(touch_id, id);

                let mut point = InteractionPoint::new(id, PointerKind::Touch, pos);
                point.press();
                self.points.push(point);
                tracing::trace!(target: "prism_stage::input", touch = touch_id, "touch started");
            }
            TouchPhase::Moved => {
                if let Some(&id) = self.touch_ids.get(&touch_id) {
                    if let Some(index) = self.point_index(id) {
                        self.points[index].pos = pos;
                    }
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if let Some(id) = self.touch_ids.remove(&touch_id) {
                    if let Some(index) = self.point_index(id) {
                        let point = &mut self.points[index];
                        point.pos = pos;
                        point.release();
                    }
                    tracing::trace!(target: "prism_stage::input", touch = touch_id, "touch ended");
                }
            }
        }
    }

    /// Retire edge flags and released touch contacts.
    ///
    /// Call after dispatch: released touches must live through the pass
    /// that delivers their release, then disappear.
    pub fn end_frame(&mut self) {
        for point in &mut self.points {
            point.clicked = false;
            point.first_down = false;
        }
        self.points
            .retain(|p| p.kind != PointerKind::Touch || p.down);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_point_appears_on_first_contact_and_persists() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.point_count(), 0);

        tracker.handle_cursor_moved(Vec2::new(10.0, 20.0));
        assert_eq!(tracker.point_count(), 1);
        assert_eq!(tracker.points()[0].pos, Vec2::new(10.0, 20.0));
        assert_eq!(tracker.points()[0].kind, PointerKind::Mouse);

        tracker.end_frame();
        assert_eq!(tracker.point_count(), 1);
    }

    #[test]
    fn left_button_drives_press_edges() {
        let mut tracker = PointerTracker::new();
        tracker.handle_cursor_moved(Vec2::new(5.0, 5.0));

        tracker.handle_mouse_input(ElementState::Pressed, MouseButton::Left);
        {
            let point = &tracker.points()[0];
            assert!(point.down);
            assert!(point.first_down);
        }

        // a repeated press event is not a new edge
        tracker.end_frame();
        tracker.handle_mouse_input(ElementState::Pressed, MouseButton::Left);
        assert!(!tracker.points()[0].first_down);

        tracker.handle_mouse_input(ElementState::Released, MouseButton::Left);
        assert!(!tracker.points()[0].down);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut tracker = PointerTracker::new();
        tracker.handle_cursor_moved(Vec2::new(5.0, 5.0));
        tracker.handle_mouse_input(ElementState::Pressed, MouseButton::Right);
        assert!(!tracker.points()[0].down);
    }

    #[test]
    fn touch_lifecycle() {
        let mut tracker = PointerTracker::new();

        tracker.touch_event(77, TouchPhase::Started, Vec2::new(1.0, 1.0));
        assert_eq!(tracker.point_count(), 1);
        {
            let point = &tracker.points()[0];
            assert_eq!(point.kind, PointerKind::Touch);
            assert!(point.down);
            assert!(point.first_down);
        }

        tracker.touch_event(77, TouchPhase::Moved, Vec2::new(2.0, 3.0));
        assert_eq!(tracker.points()[0].pos, Vec2::new(2.0, 3.0));

        tracker.touch_event(77, TouchPhase::Ended, Vec2::new(2.0, 3.0));
        // the released point survives until end_frame so dispatch can see it
        assert_eq!(tracker.point_count(), 1);
        assert!(!tracker.points()[0].down);

        tracker.end_frame();
        assert_eq!(tracker.point_count(), 0);
    }

    #[test]
    fn simultaneous_touches_get_distinct_ids() {
        let mut tracker = PointerTracker::new();
        tracker.touch_event(1, TouchPhase::Started, Vec2::new(0.0, 0.0));
        tracker.touch_event(2, TouchPhase::Started, Vec2::new(9.0, 9.0));

        assert_eq!(tracker.point_count(), 2);
        assert_ne!(tracker.points()[0].id, tracker.points()[1].id);

        tracker.touch_event(1, TouchPhase::Ended, Vec2::new(0.0, 0.0));
        tracker.end_frame();
        assert_eq!(tracker.point_count(), 1);
        assert_eq!(tracker.points()[0].pos, Vec2::new(9.0, 9.0));
    }

    #[test]
    fn cancelled_touch_is_released() {
        let mut tracker = PointerTracker::new();
        tracker.touch_event(5, TouchPhase::Started, Vec2::new(0.0, 0.0));
        tracker.touch_event(5, TouchPhase::Cancelled, Vec2::new(0.0, 0.0));
        assert!(!tracker.points()[0].down);
        tracker.end_frame();
        assert_eq!(tracker.point_count(), 0);
    }

    #[test]
    fn end_frame_clears_edge_flags() {
        let mut tracker = PointerTracker::new();
        tracker.handle_cursor_moved(Vec2::ZERO);
        tracker.handle_mouse_input(ElementState::Pressed, MouseButton::Left);
        tracker.points_mut()[0].clicked = true;

        tracker.end_frame();
        let point = &tracker.points()[0];
        assert!(!point.first_down);
        assert!(!point.clicked);
        assert!(point.down);
    }
}
