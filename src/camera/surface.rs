use crate::animation::transitions::{Transition, TransitionType};
use crate::camera::{CameraTarget, CameraView};
use crate::core::{
    geo::{Coordinate, Point},
    viewport::Viewport,
};
use crate::traits::CameraSurface;

/// Camera surface backed by a [`Viewport`] and animated transitions
///
/// Used by the egui map canvas. A jump to a point already on screen glides
/// straight there; anything further away flies out and back in. In follow mode every live position update
/// recenters the viewport at the current zoom.
#[derive(Debug, Clone)]
pub struct ViewportCamera {
    viewport: Viewport,
    transition: Option<Transition>,
    following: bool,
    user_position: Option<Coordinate>,
}

impl ViewportCamera {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            transition: None,
            following: false,
            user_position: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn user_position(&self) -> Option<Coordinate> {
        self.user_position
    }

    /// Keeps the projection in sync with the widget size
    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
        if let Some(transition) = self.transition.as_mut() {
            transition.current_viewport.set_size(size);
        }
    }

    /// Drag gesture; cancels any running animation
    pub fn pan(&mut self, delta: Point) {
        self.stop_transition();
        self.viewport.pan(delta);
    }

    /// Scroll or pinch gesture around a screen point
    pub fn zoom_around(&mut self, zoom: f64, focus: Option<Point>) {
        self.stop_transition();
        self.viewport.zoom_around(zoom, focus);
    }

    fn stop_transition(&mut self) {
        if let Some(mut transition) = self.transition.take() {
            transition.stop();
        }
    }
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl CameraSurface for ViewportCamera {
    fn jump_to(&mut self, target: &CameraTarget) {
        self.stop_transition();
        let transition_type = if self.viewport.contains(&target.coordinate) {
            TransitionType::SetView {
                target_center: target.coordinate,
                target_zoom: target.zoom,
            }
        } else {
            TransitionType::FlyTo {
                target_center: target.coordinate,
                target_zoom: target.zoom,
            }
        };
        let transition = Transition::new(
            transition_type,
            &self.viewport,
            target.duration.as_secs_f64(),
        );
        if transition.is_finished() {
            self.viewport = transition.current_viewport;
        } else {
            self.transition = Some(transition);
        }
    }

    fn set_follow(&mut self, follow: bool) {
        self.following = follow;
        if follow {
            if let Some(position) = self.user_position {
                self.stop_transition();
                self.viewport.set_center(position);
            }
        }
    }

    fn is_following(&self) -> bool {
        self.following
    }

    fn advance(&mut self, delta_time: f64) {
        if let Some(transition) = self.transition.as_mut() {
            transition.update(delta_time);
            self.viewport.center = transition.current_viewport.center;
            self.viewport.zoom = transition.current_viewport.zoom;
            if transition.is_finished() {
                self.transition = None;
            }
        }
    }

    fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    fn user_position_changed(&mut self, coordinate: Coordinate) {
        self.user_position = Some(coordinate);
        if self.following && self.transition.is_none() {
            self.viewport.set_center(coordinate);
        }
    }

    fn view(&self) -> CameraView {
        CameraView {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
        }
    }

    fn set_view(&mut self, view: CameraView) {
        self.stop_transition();
        self.viewport.set_center(view.center);
        self.viewport.set_zoom(view.zoom);
    }
}
