//! Prelude module for common incident-map types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use incident_map::prelude::*;`

pub use crate::core::{
    config::{
        CameraConfig, CameraMode, GeocodingConfig, MarkerGlyphSource, PlacementMode,
        ScreenOptions, ScreenProfile, SearchConfig,
    },
    geo::{Coordinate, Point},
    viewport::Viewport,
};

pub use crate::camera::{CameraController, CameraState, CameraTarget, CameraView, ViewportCamera};

pub use crate::layers::marker::{Marker, MarkerId, MarkerStore};

pub use crate::data::catalog::EventCategory;

pub use crate::location::{Accuracy, LocationService, PermissionStatus, StaticLocationProvider};

pub use crate::search::{geocoding::MapboxGeocoder, SearchResult};

pub use crate::bootstrap::{
    init_layout_direction, layout_direction, BootstrapOutcome, JsonFileStore, LayoutBootstrap,
    LayoutDirection, MemoryStore, ProcessRestarter,
};

pub use crate::input::events::ScreenEvent;

pub use crate::screen::{menu::MenuItem, state::MapScreen, Alert, Confirmation, ExternalAction};

pub use crate::traits::{CameraSurface, Geocoder, KeyValueStore, LocationProvider, Restarter};

pub use crate::runtime::{init_runtime, runtime, spawn, AsyncHandle, AsyncSpawner};

#[cfg(feature = "egui")]
pub use crate::ui::{widget::MapScreenView, UiMapExt};

pub use crate::{MapError, Result};

pub use std::{
    pin::Pin,
    sync::Arc,
    time::{Duration, Instant},
};

pub use futures::Future;
