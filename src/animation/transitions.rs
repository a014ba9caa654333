use crate::animation::interpolation::{EasingFunction, Interpolation};
use crate::core::{geo::Coordinate, viewport::Viewport};

/// Types of camera transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionType {
    /// Combined pan and zoom along a straight line
    SetView {
        target_center: Coordinate,
        target_zoom: f64,
    },
    /// Smooth fly-to animation: zooms out, travels, zooms back in
    FlyTo {
        target_center: Coordinate,
        target_zoom: f64,
    },
}

impl TransitionType {
    pub fn target_center(&self) -> Coordinate {
        match self {
            Self::SetView { target_center, .. } | Self::FlyTo { target_center, .. } => {
                *target_center
            }
        }
    }

    pub fn target_zoom(&self) -> f64 {
        match self {
            Self::SetView { target_zoom, .. } | Self::FlyTo { target_zoom, .. } => *target_zoom,
        }
    }
}

/// State of a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState {
    Running,
    Completed,
    Cancelled,
}

/// A viewport transition driven by frame deltas
#[derive(Debug, Clone)]
pub struct Transition {
    pub transition_type: TransitionType,
    /// Duration in seconds
    pub duration: f64,
    pub easing: EasingFunction,
    pub state: TransitionState,
    pub elapsed_time: f64,
    start_viewport: Viewport,
    target_viewport: Viewport,
    /// Interpolated viewport for the current frame
    pub current_viewport: Viewport,
}

impl Transition {
    /// Starts a transition from `current`; a zero duration completes immediately
    pub fn new(transition_type: TransitionType, current: &Viewport, duration: f64) -> Self {
        let mut target_viewport = current.clone();
        target_viewport.set_center(transition_type.target_center());
        target_viewport.set_zoom(transition_type.target_zoom());

        let mut transition = Self {
            transition_type,
            duration: duration.max(0.0),
            easing: EasingFunction::EaseInOutQuad,
            state: TransitionState::Running,
            elapsed_time: 0.0,
            start_viewport: current.clone(),
            target_viewport,
            current_viewport: current.clone(),
        };

        if transition.duration == 0.0 {
            transition.complete();
        }
        transition
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Stop the transition where it is
    pub fn stop(&mut self) {
        if self.state == TransitionState::Running {
            self.state = TransitionState::Cancelled;
        }
    }

    /// Advance by `delta_time` seconds; returns true while the viewport changed
    pub fn update(&mut self, delta_time: f64) -> bool {
        if self.state != TransitionState::Running {
            return false;
        }

        self.elapsed_time += delta_time.max(0.0);
        let progress = self.progress();
        let eased_progress = self.easing.apply(progress);

        match self.transition_type {
            TransitionType::FlyTo {
                target_center,
                target_zoom,
            } => self.update_flyto_viewport(eased_progress, target_center, target_zoom),
            TransitionType::SetView { .. } => {
                self.current_viewport.center = Interpolation::coordinate(
                    &self.start_viewport.center,
                    &self.target_viewport.center,
                    eased_progress,
                );
                self.current_viewport.zoom = Interpolation::linear(
                    self.start_viewport.zoom,
                    self.target_viewport.zoom,
                    eased_progress,
                );
            }
        }

        if progress >= 1.0 {
            self.complete();
        }
        true
    }

    fn update_flyto_viewport(&mut self, progress: f64, target_center: Coordinate, target_zoom: f64) {
        let start_center = self.start_viewport.center;
        let start_zoom = self.start_viewport.zoom;

        // Highest point of the arc: zoom out further for longer hops
        let distance = start_center.distance_to(&target_center);
        let zoom_for_distance = 19.0 - (distance.max(1.0)).log2();
        let flight_zoom = start_zoom
            .min(target_zoom)
            .min(zoom_for_distance)
            .max(self.current_viewport.min_zoom);

        let zoom = if progress < 0.5 {
            let t = progress * 2.0;
            start_zoom - (start_zoom - flight_zoom) * (2.0 * t - t * t)
        } else {
            let t = (progress - 0.5) * 2.0;
            flight_zoom + (target_zoom - flight_zoom) * (t * t)
        };

        self.current_viewport.center =
            Interpolation::slerp_coordinate(&start_center, &target_center, progress);
        self.current_viewport.set_zoom(zoom);
    }

    fn complete(&mut self) {
        self.state = TransitionState::Completed;
        self.current_viewport = self.target_viewport.clone();
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            TransitionState::Completed | TransitionState::Cancelled
        )
    }

    /// Get the current progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.duration == 0.0 {
            1.0
        } else {
            (self.elapsed_time / self.duration).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;

    fn start_viewport() -> Viewport {
        Viewport::new(Coordinate::new(34.78, 32.08), 12.0, Point::new(800.0, 600.0))
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let transition = Transition::new(
            TransitionType::SetView {
                target_center: Coordinate::new(35.21, 31.77),
                target_zoom: 14.0,
            },
            &start_viewport(),
            0.0,
        );

        assert!(transition.is_finished());
        assert_eq!(transition.current_viewport.center, Coordinate::new(35.21, 31.77));
        assert_eq!(transition.current_viewport.zoom, 14.0);
    }

    #[test]
    fn test_fly_to_lands_on_target() {
        let target = Coordinate::new(35.21, 31.77);
        let mut transition = Transition::new(
            TransitionType::FlyTo {
                target_center: target,
                target_zoom: 11.0,
            },
            &start_viewport(),
            0.9,
        );

        let mut frames = 0;
        while !transition.is_finished() {
            assert!(transition.update(1.0 / 60.0));
            frames += 1;
            assert!(frames < 1_000, "transition never finished");
        }

        assert_eq!(transition.current_viewport.center, target);
        assert_eq!(transition.current_viewport.zoom, 11.0);
        assert!(!transition.update(0.1));
    }

    #[test]
    fn test_fly_to_zooms_out_mid_flight() {
        let mut transition = Transition::new(
            TransitionType::FlyTo {
                target_center: Coordinate::new(35.21, 31.77),
                target_zoom: 12.0,
            },
            &start_viewport(),
            1.0,
        )
        .with_easing(EasingFunction::Linear);

        transition.update(0.5);
        assert!(transition.current_viewport.zoom < 12.0);
    }

    #[test]
    fn test_stop_cancels() {
        let mut transition = Transition::new(
            TransitionType::SetView {
                target_center: Coordinate::new(35.21, 31.77),
                target_zoom: 14.0,
            },
            &start_viewport(),
            1.0,
        );
        transition.update(0.2);
        transition.stop();

        assert_eq!(transition.state, TransitionState::Cancelled);
        assert!(transition.is_finished());
        assert!(!transition.update(0.2));
    }
}
