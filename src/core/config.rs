//! Configuration system for the incident map screen
//!
//! The screen historically shipped as two near-identical variants. Both are
//! now presets of a single [`ScreenOptions`], resolved from a
//! [`ScreenProfile`] the same way the map engine resolves performance
//! profiles. A custom profile can be loaded from JSON.

use crate::core::constants;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// How a marker's category is drawn on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerGlyphSource {
    /// PNG icon from the asset directory
    ImageAsset,
    /// Emoji glyph rendered as text
    TextGlyph,
}

/// How the camera tracks the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Camera moves only on explicit recenter / focus requests
    ManualRecenter,
    /// Camera continuously follows the live device position
    FollowUser,
}

/// What choosing a category in the picker does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Place immediately at the current or best-known position
    Eager,
    /// Arm a pending placement; the next map tap places the marker
    TapToPlace,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenProfile {
    /// PNG icons, explicit recenters, eager placement
    #[default]
    IconRecenter,
    /// Emoji glyphs, continuous follow, eager placement
    EmojiFollow,
    Custom(ScreenOptions),
}

impl ScreenProfile {
    pub fn resolve(&self) -> ScreenOptions {
        match self {
            Self::IconRecenter => ScreenOptions {
                marker_glyphs: MarkerGlyphSource::ImageAsset,
                camera_mode: CameraMode::ManualRecenter,
                placement_mode: PlacementMode::Eager,
                ..ScreenOptions::base()
            },
            Self::EmojiFollow => ScreenOptions {
                marker_glyphs: MarkerGlyphSource::TextGlyph,
                camera_mode: CameraMode::FollowUser,
                placement_mode: PlacementMode::Eager,
                ..ScreenOptions::base()
            },
            Self::Custom(options) => options.clone(),
        }
    }

    /// Looks up a preset by the short name used in the app's environment
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "icons" | "icon" | "icon_recenter" => Some(Self::IconRecenter),
            "emoji" | "emoji_follow" => Some(Self::EmojiFollow),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenOptions {
    pub marker_glyphs: MarkerGlyphSource,
    pub camera_mode: CameraMode,
    pub placement_mode: PlacementMode,
    /// Remote style reference handed to surfaces that render vector styles
    pub map_style_url: String,
    /// Directory holding the category PNG icons
    pub asset_dir: String,
    pub camera: CameraConfig,
    pub search: SearchConfig,
}

impl ScreenOptions {
    fn base() -> Self {
        Self {
            marker_glyphs: MarkerGlyphSource::ImageAsset,
            camera_mode: CameraMode::ManualRecenter,
            placement_mode: PlacementMode::Eager,
            map_style_url: constants::DEFAULT_STYLE_URL.to_string(),
            asset_dir: "assets/icons".to_string(),
            camera: CameraConfig::default(),
            search: SearchConfig::default(),
        }
    }

    /// Reads options from a JSON file; missing fields take the default preset's values
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let options: Self = serde_json::from_str(&text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        self.camera.validate()?;
        if self.search.result_limit == 0 {
            return Err(MapError::InvalidConfig(
                "search.result_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn follows_user(&self) -> bool {
        self.camera_mode == CameraMode::FollowUser
    }
}

impl Default for ScreenOptions {
    fn default() -> Self {
        ScreenProfile::default().resolve()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_zoom: f64,
    pub recenter_zoom: f64,
    pub recenter_duration_ms: u64,
    pub marker_focus_zoom: f64,
    pub marker_focus_duration_ms: u64,
    pub follow_resume_delay_ms: u64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl CameraConfig {
    pub fn recenter_duration(&self) -> Duration {
        Duration::from_millis(self.recenter_duration_ms)
    }

    pub fn marker_focus_duration(&self) -> Duration {
        Duration::from_millis(self.marker_focus_duration_ms)
    }

    pub fn follow_resume_delay(&self) -> Duration {
        Duration::from_millis(self.follow_resume_delay_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.min_zoom > self.max_zoom {
            return Err(MapError::InvalidConfig(format!(
                "camera.min_zoom ({}) exceeds camera.max_zoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_zoom: constants::INITIAL_ZOOM,
            recenter_zoom: constants::RECENTER_ZOOM,
            recenter_duration_ms: constants::RECENTER_DURATION_MS,
            marker_focus_zoom: constants::MARKER_FOCUS_ZOOM,
            marker_focus_duration_ms: constants::MARKER_FOCUS_DURATION_MS,
            follow_resume_delay_ms: constants::FOLLOW_RESUME_DELAY_MS,
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub result_limit: usize,
    pub language: String,
    pub result_types: Vec<String>,
    pub focus_zoom: f64,
    pub focus_duration_ms: u64,
    pub focus_retry_ms: u64,
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn focus_duration(&self) -> Duration {
        Duration::from_millis(self.focus_duration_ms)
    }

    pub fn focus_retry_delay(&self) -> Duration {
        Duration::from_millis(self.focus_retry_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: constants::SEARCH_DEBOUNCE_MS,
            result_limit: constants::SEARCH_RESULT_LIMIT,
            language: constants::SEARCH_LANGUAGE.to_string(),
            result_types: constants::SEARCH_RESULT_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            focus_zoom: constants::SEARCH_FOCUS_ZOOM,
            focus_duration_ms: constants::SEARCH_FOCUS_DURATION_MS,
            focus_retry_ms: constants::SEARCH_FOCUS_RETRY_MS,
        }
    }
}

/// Where and how to reach the geocoding API.
///
/// The access token is a secret; it comes from the environment or the host
/// application, never from source.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub base_url: String,
    pub access_token: Option<String>,
}

impl GeocodingConfig {
    pub fn new(base_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token,
        }
    }

    /// Reads the token from `MAPBOX_ACCESS_TOKEN`; the host stays at its default
    pub fn from_env() -> Self {
        let access_token = std::env::var(constants::ACCESS_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty());
        if access_token.is_none() {
            log::warn!(
                "{} is not set; place search will return no results",
                constants::ACCESS_TOKEN_ENV
            );
        }
        Self::new(constants::GEOCODING_BASE_URL, access_token)
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self::new(constants::GEOCODING_BASE_URL, None)
    }
}

impl std::fmt::Debug for GeocodingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingConfig")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_profile_presets() {
        let icons = ScreenProfile::IconRecenter.resolve();
        let emoji = ScreenProfile::EmojiFollow.resolve();

        assert_eq!(icons.marker_glyphs, MarkerGlyphSource::ImageAsset);
        assert_eq!(icons.camera_mode, CameraMode::ManualRecenter);
        assert!(!icons.follows_user());

        assert_eq!(emoji.marker_glyphs, MarkerGlyphSource::TextGlyph);
        assert_eq!(emoji.camera_mode, CameraMode::FollowUser);
        assert!(emoji.follows_user());

        // Both variants share search behaviour
        assert_eq!(icons.search, emoji.search);
        assert_eq!(icons.search.debounce_ms, 350);
        assert_eq!(icons.search.result_limit, 7);
        assert_eq!(icons.search.language, "he");
        assert_eq!(icons.search.result_types, vec!["place", "locality", "region"]);
    }

    #[test]
    fn test_profile_from_name() {
        assert_eq!(ScreenProfile::from_name("emoji"), Some(ScreenProfile::EmojiFollow));
        assert_eq!(ScreenProfile::from_name(" Icons "), Some(ScreenProfile::IconRecenter));
        assert_eq!(ScreenProfile::from_name("satellite"), None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let options: ScreenOptions = serde_json::from_str(
            r#"{"placement_mode":"tap_to_place","search":{"debounce_ms":500}}"#,
        )
        .unwrap();

        assert_eq!(options.placement_mode, PlacementMode::TapToPlace);
        assert_eq!(options.marker_glyphs, MarkerGlyphSource::ImageAsset);
        assert_eq!(options.search.debounce_ms, 500);
        assert_eq!(options.search.result_limit, 7);
        assert_eq!(options.camera.recenter_zoom, 14.0);
    }

    #[test]
    fn test_validate_rejects_inverted_zoom_limits() {
        let mut options = ScreenOptions::default();
        options.camera.min_zoom = 18.0;
        options.camera.max_zoom = 3.0;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_geocoding_config_debug_redacts_token() {
        let config = GeocodingConfig::new("https://example.test", Some("pk.secret".to_string()));
        let printed = format!("{config:?}");
        assert!(!printed.contains("pk.secret"));
        assert!(printed.contains("<redacted>"));
    }
}
