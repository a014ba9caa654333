use crate::bootstrap::layout::{layout_direction, LayoutDirection};
use crate::camera::CameraState;
use crate::input::events::ScreenEvent;
use crate::screen::MapScreen;
use crate::ui::{
    dialogs, event_picker,
    icons::IconCache,
    map_view::MapCanvas,
    search_bar::SearchBar,
    side_menu,
    style::{ScreenStyle, ScreenThemes, StyleExt},
};
use egui::{Align2, Color32, Pos2, Rect, Response, Sense, Ui, Vec2};
use std::time::Duration;

/// Repaint cadence while async work is pending
const PENDING_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

/// Floating buttons over the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FloatingButton {
    AddEvent,
    Recenter,
    Distress,
}

impl FloatingButton {
    fn glyph(self) -> &'static str {
        match self {
            Self::AddEvent => "➕",
            Self::Recenter => "📍",
            Self::Distress => "❕",
        }
    }

    fn event(self) -> ScreenEvent {
        match self {
            Self::AddEvent => ScreenEvent::AddEventPressed,
            Self::Recenter => ScreenEvent::RecenterPressed,
            Self::Distress => ScreenEvent::DistressPressed,
        }
    }
}

/// egui front end for a [`MapScreen`]
///
/// Holds only presentation state. Every interaction is turned into a
/// [`ScreenEvent`] and handed to the screen after the frame is drawn.
///
/// ```rust,ignore
/// let mut view = MapScreenView::new(&screen.options().asset_dir);
/// view.show(ui, &mut screen);
/// ```
pub struct MapScreenView {
    pub style: ScreenStyle,
    pub direction: LayoutDirection,
    icons: IconCache,
}

impl MapScreenView {
    pub fn new(asset_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            style: ScreenThemes::light(),
            direction: layout_direction(),
            icons: IconCache::new(asset_dir),
        }
    }

    pub fn with_style(mut self, style: ScreenStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Draws the whole screen into the remaining space of `ui`
    pub fn show(&mut self, ui: &mut Ui, screen: &mut MapScreen) -> Response {
        let rect = ui.available_rect_before_wrap();
        let mut events = Vec::new();

        let response = MapCanvas::new(screen, &self.style, &mut self.icons).show(ui, rect, &mut events);
        self.floating_buttons(ui, rect, &mut events);
        self.search_bar(ui, rect, screen, &mut events);

        let ctx = ui.ctx().clone();
        if screen.menu().is_open() {
            side_menu::show(&ctx, &self.style.panel, self.direction, &mut events);
        }
        event_picker::show(
            &ctx,
            screen.picker(),
            screen.options().marker_glyphs,
            &mut self.icons,
            &self.style.panel,
            &mut events,
        );
        event_picker::show_tap_hint(&ctx, screen.picker(), &self.style.panel);
        if let Some(confirmation) = screen.confirmation() {
            dialogs::show_confirmation(&ctx, confirmation, &mut events);
        }
        if let Some(alert) = screen.alert() {
            dialogs::show_alert(&ctx, alert, &mut events);
        }

        for event in events {
            screen.handle_event(event);
        }
        request_repaint(&ctx, screen);

        response
    }

    fn search_bar(&self, ui: &mut Ui, rect: Rect, screen: &MapScreen, events: &mut Vec<ScreenEvent>) {
        let margin = self.style.panel.margin;
        let width = self.style.panel.width.min(rect.width() - 2.0 * margin);
        let x = if self.direction.is_rtl() {
            rect.right() - margin - width
        } else {
            rect.left() + margin
        };
        let area = Rect::from_min_size(
            Pos2::new(x, rect.top() + margin),
            Vec2::new(width, self.style.panel.max_dropdown_height + 48.0),
        );

        ui.allocate_ui_at_rect(area, |ui| {
            SearchBar::new(screen.search(), &self.style.panel, self.direction).show(ui, events);
        });
    }

    fn floating_buttons(&self, ui: &mut Ui, rect: Rect, events: &mut Vec<ScreenEvent>) {
        let style = &self.style.buttons;
        let step = style.size + style.margin / 2.0;
        // Add sits on the leading edge; recenter and distress stack on the trailing one
        let (leading_x, trailing_x) = if self.direction.is_rtl() {
            (rect.right() - style.margin - style.size / 2.0, rect.left() + style.margin + style.size / 2.0)
        } else {
            (rect.left() + style.margin + style.size / 2.0, rect.right() - style.margin - style.size / 2.0)
        };
        let bottom_y = rect.bottom() - style.margin - style.size / 2.0;

        let layout = [
            (FloatingButton::AddEvent, Pos2::new(leading_x, bottom_y)),
            (FloatingButton::Distress, Pos2::new(trailing_x, bottom_y)),
            (FloatingButton::Recenter, Pos2::new(trailing_x, bottom_y - step)),
        ];

        for (button, center) in layout {
            if self.floating_button(ui, button, center) {
                events.push(button.event());
            }
        }
    }

    fn floating_button(&self, ui: &mut Ui, button: FloatingButton, center: Pos2) -> bool {
        let style = &self.style.buttons;
        let rect = Rect::from_center_size(center, Vec2::splat(style.size));
        let response = ui.interact(rect, ui.id().with(("fab", button.glyph())), Sense::click());

        let fill = match button {
            FloatingButton::Distress => style.distress_color,
            _ => ui.style_button(&response, style),
        };
        let painter = ui.painter();
        painter.circle_filled(center + Vec2::new(0.0, 2.0), style.size / 2.0, Color32::from_black_alpha(40));
        painter.circle_filled(center, style.size / 2.0, fill);
        painter.text(
            center,
            Align2::CENTER_CENTER,
            button.glyph(),
            style.font_id.clone(),
            style.text_color,
        );

        response.clicked()
    }
}

impl std::fmt::Debug for MapScreenView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapScreenView")
            .field("direction", &self.direction)
            .field("icons", &self.icons)
            .finish()
    }
}

fn request_repaint(ctx: &egui::Context, screen: &MapScreen) {
    if screen.camera().state() == CameraState::Animating {
        ctx.request_repaint();
    } else if screen.search().is_loading() || screen.search().is_debounce_pending() {
        ctx.request_repaint_after(PENDING_REPAINT_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floating_buttons_map_to_events() {
        assert_eq!(FloatingButton::AddEvent.event(), ScreenEvent::AddEventPressed);
        assert_eq!(FloatingButton::Recenter.event(), ScreenEvent::RecenterPressed);
        assert_eq!(FloatingButton::Distress.event(), ScreenEvent::DistressPressed);
        assert_eq!(FloatingButton::Distress.glyph(), "❕");
    }

    #[test]
    fn test_view_builder() {
        let view = MapScreenView::new("assets/icons")
            .with_style(ScreenThemes::dark())
            .with_direction(LayoutDirection::RightToLeft);
        assert!(view.direction.is_rtl());
        assert_eq!(view.style.background_color, ScreenThemes::dark().background_color);
    }
}
