use crate::camera::{CameraState, CameraTarget, CameraView};
use crate::core::geo::Coordinate;
use crate::traits::CameraSurface;

/// Camera state machine over a single [`CameraSurface`]
///
/// Nothing reaches the surface until the map has signalled its first render
/// through [`CameraController::mark_ready`]. Calls made earlier are logged and
/// dropped.
pub struct CameraController {
    surface: Box<dyn CameraSurface>,
    state: CameraState,
    follow_on_ready: bool,
}

impl CameraController {
    pub fn new(surface: Box<dyn CameraSurface>) -> Self {
        Self {
            surface,
            state: CameraState::Uninitialized,
            follow_on_ready: false,
        }
    }

    /// Follow mode is switched on as soon as the map becomes ready
    pub fn with_follow_on_ready(mut self, follow: bool) -> Self {
        self.follow_on_ready = follow;
        self
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state != CameraState::Uninitialized
    }

    pub fn is_following(&self) -> bool {
        self.surface.is_following()
    }

    /// The map finished its initial style/render pass
    pub fn mark_ready(&mut self) {
        if self.is_ready() {
            return;
        }
        log::debug!("Camera ready");
        self.state = CameraState::Idle;
        if self.follow_on_ready {
            self.surface.set_follow(true);
        }
    }

    /// Moves the viewport; returns false when the map is not ready yet
    pub fn jump_to(&mut self, target: CameraTarget) -> bool {
        if !self.is_ready() {
            log::warn!(
                "Camera not ready; dropping jump to {} at zoom {}",
                target.coordinate,
                target.zoom
            );
            return false;
        }

        if self.surface.is_following() {
            self.surface.set_follow(false);
        }
        log::debug!(
            "Camera jump to {} zoom {} over {:?}",
            target.coordinate,
            target.zoom,
            target.duration
        );
        self.surface.jump_to(&target);
        self.state = if self.surface.is_animating() {
            CameraState::Animating
        } else {
            CameraState::Idle
        };
        true
    }

    pub fn enable_follow(&mut self) {
        if !self.is_ready() {
            log::warn!("Camera not ready; ignoring follow request");
            return;
        }
        self.surface.set_follow(true);
    }

    pub fn disable_follow(&mut self) {
        if self.surface.is_following() {
            self.surface.set_follow(false);
        }
    }

    /// Touch on the map; manual interaction always ends follow mode
    pub fn on_user_interaction(&mut self) {
        self.disable_follow();
    }

    pub fn user_position_changed(&mut self, coordinate: Coordinate) {
        self.surface.user_position_changed(coordinate);
    }

    /// Drives the surface for one frame
    pub fn update(&mut self, delta_time: f64) {
        self.surface.advance(delta_time);
        if self.state == CameraState::Animating && !self.surface.is_animating() {
            self.state = CameraState::Idle;
        }
    }

    pub fn view(&self) -> CameraView {
        self.surface.view()
    }

    /// Gesture-driven view change; counts as user interaction
    pub fn set_view(&mut self, view: CameraView) {
        self.on_user_interaction();
        self.surface.set_view(view);
        if self.state == CameraState::Animating {
            self.state = CameraState::Idle;
        }
    }

    pub fn surface(&self) -> &dyn CameraSurface {
        self.surface.as_ref()
    }
}

impl std::fmt::Debug for CameraController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraController")
            .field("state", &self.state)
            .field("view", &self.surface.view())
            .field("following", &self.surface.is_following())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ViewportCamera;
    use std::time::Duration;

    fn controller() -> CameraController {
        CameraController::new(Box::new(ViewportCamera::default()))
    }

    #[test]
    fn test_jump_before_ready_is_dropped() {
        let mut camera = controller();
        let before = camera.view();

        let applied = camera.jump_to(CameraTarget::immediate(Coordinate::new(34.78, 32.08), 11.0));

        assert!(!applied);
        assert_eq!(camera.state(), CameraState::Uninitialized);
        assert_eq!(camera.view(), before);
    }

    #[test]
    fn test_jump_after_ready_takes_effect() {
        let mut camera = controller();
        camera.mark_ready();

        assert!(camera.jump_to(CameraTarget::immediate(Coordinate::new(34.78, 32.08), 11.0)));
        assert_eq!(camera.view().center, Coordinate::new(34.78, 32.08));
        assert_eq!(camera.view().zoom, 11.0);
        assert_eq!(camera.state(), CameraState::Idle);
    }

    #[test]
    fn test_animation_returns_to_idle() {
        let mut camera = controller();
        camera.mark_ready();
        camera.jump_to(CameraTarget::new(
            Coordinate::new(34.78, 32.08),
            14.0,
            Duration::from_millis(800),
        ));
        assert_eq!(camera.state(), CameraState::Animating);

        for _ in 0..60 {
            camera.update(1.0 / 30.0);
        }
        assert_eq!(camera.state(), CameraState::Idle);
    }

    #[test]
    fn test_follow_on_ready_and_disabled_by_jump() {
        let mut camera = controller().with_follow_on_ready(true);
        assert!(!camera.is_following());

        camera.mark_ready();
        assert!(camera.is_following());

        camera.jump_to(CameraTarget::immediate(Coordinate::new(34.78, 32.08), 14.0));
        assert!(!camera.is_following());
    }

    #[test]
    fn test_user_interaction_disables_follow() {
        let mut camera = controller();
        camera.mark_ready();
        camera.enable_follow();
        assert!(camera.is_following());

        camera.on_user_interaction();
        assert!(!camera.is_following());
    }
}
