pub mod controller;
pub mod surface;

use crate::core::geo::Coordinate;
use std::time::Duration;

pub use controller::CameraController;
pub use surface::ViewportCamera;

/// Desired viewport, applied imperatively through [`crate::traits::CameraSurface::jump_to`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub coordinate: Coordinate,
    pub zoom: f64,
    pub duration: Duration,
}

impl CameraTarget {
    pub fn new(coordinate: Coordinate, zoom: f64, duration: Duration) -> Self {
        Self {
            coordinate,
            zoom,
            duration,
        }
    }

    /// Target applied without animation
    pub fn immediate(coordinate: Coordinate, zoom: f64) -> Self {
        Self::new(coordinate, zoom, Duration::ZERO)
    }
}

/// Where the camera currently looks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub center: Coordinate,
    pub zoom: f64,
}

/// Lifecycle of the camera controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    /// Map has not finished its initial render
    Uninitialized,
    Idle,
    Animating,
}
