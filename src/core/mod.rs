pub mod config;
pub mod constants;
pub mod geo;
pub mod locale;
pub mod viewport;

pub use config::{
    CameraConfig, CameraMode, GeocodingConfig, MarkerGlyphSource, PlacementMode, ScreenOptions,
    ScreenProfile, SearchConfig,
};
pub use geo::{Coordinate, Point};
pub use viewport::Viewport;
