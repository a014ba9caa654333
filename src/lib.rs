//! # incident-map
//!
//! A map screen for reporting incidents on the spot.
//!
//! The user drops categorized incident markers at their GPS position (or at a
//! tapped point), searches for a place by name and re-centers the camera. The
//! screen is a single state machine, [`screen::MapScreen`], wired to three
//! external seams: a [`traits::LocationProvider`], a [`traits::Geocoder`] and a
//! [`traits::CameraSurface`]. The egui views under [`ui`] render it.

pub mod animation;
pub mod bootstrap;
pub mod camera;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod location;
pub mod prelude;
pub mod runtime;
pub mod screen;
pub mod search;
pub mod traits;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{CameraMode, MarkerGlyphSource, PlacementMode, ScreenOptions, ScreenProfile},
    geo::{Coordinate, Point},
    viewport::Viewport,
};

pub use crate::camera::{controller::CameraController, surface::ViewportCamera, CameraTarget};

pub use crate::layers::marker::{Marker, MarkerId, MarkerStore};

pub use crate::data::catalog::EventCategory;

pub use crate::input::events::ScreenEvent;

pub use crate::screen::{state::MapScreen, Alert, Confirmation, ExternalAction};

pub use crate::search::geocoding::{MapboxGeocoder, SearchResult};

pub use crate::bootstrap::layout::{LayoutBootstrap, LayoutDirection};

/// Installs `env_logger` honouring `RUST_LOG` (default `info`); later calls are ignored
#[cfg(feature = "debug")]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already installed");
    }
}

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Not ready: {0}")]
    NotReady(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Restart failed: {0}")]
    Restart(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

/// Error type alias for convenience
pub type Error = MapError;
