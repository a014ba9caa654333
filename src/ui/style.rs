use egui::{Color32, FontId, Stroke};
use std::path::Path;

/// Style configuration for the map screen
#[derive(Debug, Clone)]
pub struct ScreenStyle {
    /// Canvas color; no tiles are drawn
    pub background_color: Color32,
    /// Latitude/longitude grid lines
    pub graticule_stroke: Stroke,
    /// Style for incident markers
    pub markers: MarkerStyle,
    /// Style for the user location puck
    pub puck: PuckStyle,
    /// Round floating buttons (add, recenter, distress)
    pub buttons: ButtonStyle,
    /// Search field and dropdown panels
    pub panel: PanelStyle,
}

/// Style for incident markers
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    /// Icon edge length in points
    pub size: f32,
    /// Halo drawn behind text glyphs
    pub halo_color: Color32,
    pub glyph_font: FontId,
}

#[derive(Debug, Clone)]
pub struct PuckStyle {
    pub fill_color: Color32,
    pub border_stroke: Stroke,
    pub radius: f32,
    /// Translucent accuracy ring
    pub ring_color: Color32,
}

#[derive(Debug, Clone)]
pub struct ButtonStyle {
    pub background_color: Color32,
    pub hover_color: Color32,
    pub pressed_color: Color32,
    pub distress_color: Color32,
    pub text_color: Color32,
    /// Diameter
    pub size: f32,
    /// Distance from the screen edge
    pub margin: f32,
    pub font_id: FontId,
}

#[derive(Debug, Clone)]
pub struct PanelStyle {
    pub background_color: Color32,
    pub text_color: Color32,
    pub muted_text_color: Color32,
    pub width: f32,
    pub margin: f32,
    pub max_dropdown_height: f32,
}

impl Default for ScreenStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(236, 233, 226),
            graticule_stroke: Stroke::new(1.0, Color32::from_rgba_unmultiplied(0, 0, 0, 28)),
            markers: MarkerStyle::default(),
            puck: PuckStyle::default(),
            buttons: ButtonStyle::default(),
            panel: PanelStyle::default(),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: crate::core::constants::MARKER_ICON_SIZE,
            halo_color: Color32::from_rgba_unmultiplied(255, 255, 255, 200),
            glyph_font: FontId::proportional(24.0),
        }
    }
}

impl Default for PuckStyle {
    fn default() -> Self {
        Self {
            fill_color: Color32::from_rgb(30, 136, 229),
            border_stroke: Stroke::new(2.5, Color32::WHITE),
            radius: 8.0,
            ring_color: Color32::from_rgba_unmultiplied(30, 136, 229, 50),
        }
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            hover_color: Color32::from_rgb(240, 240, 240),
            pressed_color: Color32::LIGHT_GRAY,
            distress_color: Color32::from_rgb(229, 57, 53),
            text_color: Color32::BLACK,
            size: 56.0,
            margin: 20.0,
            font_id: FontId::proportional(24.0),
        }
    }
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            text_color: Color32::from_rgb(33, 33, 33),
            muted_text_color: Color32::from_rgb(102, 102, 102),
            width: 320.0,
            margin: 12.0,
            max_dropdown_height: 280.0,
        }
    }
}

/// Predefined themes for the screen
pub struct ScreenThemes;

impl ScreenThemes {
    /// Light theme (default)
    pub fn light() -> ScreenStyle {
        ScreenStyle::default()
    }

    /// Dark theme for night use
    pub fn dark() -> ScreenStyle {
        ScreenStyle {
            background_color: Color32::from_rgb(40, 40, 40),
            graticule_stroke: Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 24)),
            buttons: ButtonStyle {
                background_color: Color32::from_rgb(60, 60, 60),
                hover_color: Color32::from_rgb(80, 80, 80),
                pressed_color: Color32::from_rgb(100, 100, 100),
                text_color: Color32::WHITE,
                ..ButtonStyle::default()
            },
            panel: PanelStyle {
                background_color: Color32::from_rgb(50, 50, 50),
                text_color: Color32::WHITE,
                muted_text_color: Color32::from_rgb(170, 170, 170),
                ..PanelStyle::default()
            },
            markers: MarkerStyle {
                halo_color: Color32::from_rgba_unmultiplied(0, 0, 0, 160),
                ..MarkerStyle::default()
            },
            ..ScreenStyle::default()
        }
    }
}

/// Extension trait for applying styles to egui elements
pub trait StyleExt {
    /// Fill color of a floating button for its interaction state
    fn style_button(&self, response: &egui::Response, style: &ButtonStyle) -> Color32;
}

impl StyleExt for egui::Ui {
    fn style_button(&self, response: &egui::Response, style: &ButtonStyle) -> Color32 {
        if response.is_pointer_button_down_on() {
            style.pressed_color
        } else if response.hovered() {
            style.hover_color
        } else {
            style.background_color
        }
    }
}

/// Adds a font file (one with Hebrew coverage) ahead of egui's defaults.
///
/// Returns false when none of `candidates` can be read; text then renders
/// with the built-in fonts.
pub fn install_fonts(ctx: &egui::Context, candidates: &[&Path]) -> bool {
    for path in candidates {
        match std::fs::read(path) {
            Ok(bytes) => {
                let mut fonts = egui::FontDefinitions::default();
                fonts
                    .font_data
                    .insert("screen".to_owned(), egui::FontData::from_owned(bytes));
                for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                    fonts
                        .families
                        .entry(family)
                        .or_default()
                        .insert(0, "screen".to_owned());
                }
                ctx.set_fonts(fonts);
                log::info!("Using font {}", path.display());
                return true;
            }
            Err(e) => log::debug!("Font {} unavailable: {}", path.display(), e),
        }
    }
    log::warn!("No font with Hebrew coverage found; labels may not render");
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles() {
        let style = ScreenStyle::default();
        assert_eq!(style.markers.size, 28.0);
        assert_eq!(style.buttons.size, 56.0);
    }

    #[test]
    fn test_dark_theme() {
        let dark = ScreenThemes::dark();
        assert_eq!(dark.background_color, Color32::from_rgb(40, 40, 40));
        assert_eq!(dark.buttons.text_color, Color32::WHITE);
        assert_eq!(dark.buttons.size, ButtonStyle::default().size);
    }

    #[test]
    fn test_missing_fonts_fall_back() {
        let ctx = egui::Context::default();
        assert!(!install_fonts(&ctx, &[Path::new("/nonexistent/font.ttf")]));
    }
}
