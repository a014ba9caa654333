//! Screen-wide constants: camera zoom levels, animation durations, search limits.
//! Keeping them in a single place makes it easier to tweak the screen's magic numbers.

/// Default square tile size in pixels, used by the Web Mercator pixel projection.
pub const TILE_SIZE: f64 = 256.0;

/// Zoom limits accepted by the viewport.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 20.0;

/// Zoom of the first camera placement once a fix is known.
pub const INITIAL_ZOOM: f64 = 14.0;

/// "Center on me" button.
pub const RECENTER_ZOOM: f64 = 14.0;
pub const RECENTER_DURATION_MS: u64 = 800;

/// Recenter after an eagerly placed marker.
pub const MARKER_FOCUS_ZOOM: f64 = 15.0;
pub const MARKER_FOCUS_DURATION_MS: u64 = 700;

/// Camera focus on a selected search result.
pub const SEARCH_FOCUS_ZOOM: f64 = 11.0;
pub const SEARCH_FOCUS_DURATION_MS: u64 = 900;

/// One-shot retry for a search focus issued before the map finished loading.
pub const SEARCH_FOCUS_RETRY_MS: u64 = 100;

/// Delay before follow mode resumes after a manual recenter.
pub const FOLLOW_RESUME_DELAY_MS: u64 = 1_500;

/// Keystroke debounce for place search.
pub const SEARCH_DEBOUNCE_MS: u64 = 350;

/// Geocoding request parameters.
pub const SEARCH_RESULT_LIMIT: usize = 7;
pub const SEARCH_LANGUAGE: &str = "he";
pub const SEARCH_RESULT_TYPES: [&str; 3] = ["place", "locality", "region"];

/// Default geocoding host.
pub const GEOCODING_BASE_URL: &str = "https://api.mapbox.com";

/// Environment variable holding the geocoding access token.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Remote map style used by surfaces able to render it.
pub const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/streets-v12";

/// Hold time on a marker that asks to remove it.
pub const LONG_PRESS_MS: u64 = 500;

/// Marker icon size in logical pixels.
pub const MARKER_ICON_SIZE: f32 = 28.0;

/// Durable flag recording that the right-to-left flip was applied.
pub const RTL_APPLIED_KEY: &str = "rtl-applied";
pub const RTL_APPLIED_VALUE: &str = "true";
