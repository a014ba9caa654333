//! Map canvas: background grid, user puck, markers and gestures.
//!
//! No tiles are drawn. The canvas projects through a [`Viewport`] rebuilt
//! each frame from the camera view, and turns pointer input into
//! [`ScreenEvent`]s.

use crate::camera::CameraView;
use crate::core::{
    config::MarkerGlyphSource,
    constants::LONG_PRESS_MS,
    geo::{Coordinate, Point},
    viewport::Viewport,
};
use crate::input::events::ScreenEvent;
use crate::layers::marker::Marker;
use crate::screen::MapScreen;
use crate::ui::{icons::IconCache, style::ScreenStyle};
use egui::{Align2, Color32, Painter, Pos2, Rect, Response, Sense, Ui, Vec2};

/// Candidate grid spacings in degrees, widest first
const GRID_STEPS: [f64; 12] = [
    30.0, 10.0, 5.0, 2.0, 1.0, 0.5, 0.2, 0.1, 0.05, 0.02, 0.01, 0.005,
];
const MIN_GRID_SPACING: f64 = 80.0;
const SCROLL_ZOOM_RATE: f64 = 0.002;

pub struct MapCanvas<'a> {
    screen: &'a MapScreen,
    style: &'a ScreenStyle,
    icons: &'a mut IconCache,
}

impl<'a> MapCanvas<'a> {
    pub fn new(screen: &'a MapScreen, style: &'a ScreenStyle, icons: &'a mut IconCache) -> Self {
        Self {
            screen,
            style,
            icons,
        }
    }

    /// Draws into `rect` and appends the events produced this frame
    pub fn show(mut self, ui: &mut Ui, rect: Rect, events: &mut Vec<ScreenEvent>) -> Response {
        let screen = self.screen;
        let response = ui.allocate_rect(rect, Sense::click_and_drag());
        let viewport = viewport_for(screen, rect);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.style.background_color);
        draw_graticule(&painter, rect, &viewport, self.style);

        if let Some(fix) = screen.last_known_fix() {
            draw_puck(&painter, rect, &viewport, fix, self.style);
        }

        let glyph_source = screen.options().marker_glyphs;
        let mut hits = Vec::new();
        for marker in screen.markers() {
            if !viewport.contains(&marker.coordinate()) {
                continue;
            }
            let center = to_screen(rect, viewport.coordinate_to_pixel(&marker.coordinate()));
            let marker_rect = Rect::from_center_size(center, Vec2::splat(self.style.markers.size));
            self.draw_marker(ui, &painter, marker, marker_rect, glyph_source);
            hits.push((marker_rect, marker));
        }

        if let Some(marker) = long_pressed_marker(ui, &response, &hits) {
            events.push(ScreenEvent::MarkerLongPressed(marker.id().clone()));
        }

        if !screen.is_map_ready() && rect.width() > 0.0 && rect.height() > 0.0 {
            events.push(ScreenEvent::MapReady);
        }
        handle_gestures(ui, &response, rect, viewport, events);

        response
    }

    fn draw_marker(
        &mut self,
        ui: &Ui,
        painter: &Painter,
        marker: &Marker,
        rect: Rect,
        glyph_source: MarkerGlyphSource,
    ) {
        if glyph_source == MarkerGlyphSource::ImageAsset {
            if let Some(texture) = self.icons.texture(ui.ctx(), marker.category()) {
                painter.image(
                    texture.id(),
                    rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
                return;
            }
        }

        let style = &self.style.markers;
        painter.circle_filled(rect.center(), style.size * 0.6, style.halo_color);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            marker.category().glyph,
            style.glyph_font.clone(),
            Color32::BLACK,
        );
    }
}

fn viewport_for(screen: &MapScreen, rect: Rect) -> Viewport {
    let view = screen.camera_view();
    let camera = &screen.options().camera;
    let mut viewport = Viewport::new(
        view.center,
        view.zoom,
        Point::new(rect.width() as f64, rect.height() as f64),
    );
    viewport.set_zoom_limits(camera.min_zoom, camera.max_zoom);
    viewport
}

fn draw_graticule(painter: &Painter, rect: Rect, viewport: &Viewport, style: &ScreenStyle) {
    let top_left = viewport.pixel_to_coordinate(&Point::new(0.0, 0.0));
    let bottom_right =
        viewport.pixel_to_coordinate(&Point::new(rect.width() as f64, rect.height() as f64));

    let degrees_per_pixel =
        (bottom_right.longitude - top_left.longitude).abs() / rect.width().max(1.0) as f64;
    let step = grid_step(degrees_per_pixel);

    let stroke = style.graticule_stroke;
    let mut longitude = (top_left.longitude / step).floor() * step;
    while longitude <= bottom_right.longitude {
        let pixel = viewport.coordinate_to_pixel(&Coordinate::new(longitude, viewport.center.latitude));
        let x = to_screen(rect, pixel).x;
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        longitude += step;
    }

    let mut latitude = (bottom_right.latitude / step).floor() * step;
    while latitude <= top_left.latitude {
        let pixel = viewport.coordinate_to_pixel(&Coordinate::new(viewport.center.longitude, latitude));
        let y = to_screen(rect, pixel).y;
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        latitude += step;
    }
}

/// Finest step that keeps grid lines at least [`MIN_GRID_SPACING`] pixels apart
fn grid_step(degrees_per_pixel: f64) -> f64 {
    GRID_STEPS
        .iter()
        .copied()
        .filter(|step| step / degrees_per_pixel >= MIN_GRID_SPACING)
        .last()
        .unwrap_or(GRID_STEPS[0])
}

fn draw_puck(painter: &Painter, rect: Rect, viewport: &Viewport, fix: Coordinate, style: &ScreenStyle) {
    let puck = &style.puck;
    let center = to_screen(rect, viewport.coordinate_to_pixel(&fix));
    painter.circle_filled(center, puck.radius * 2.5, puck.ring_color);
    painter.circle_filled(center, puck.radius, puck.fill_color);
    painter.circle_stroke(center, puck.radius, puck.border_stroke);
}

/// Topmost marker whose hit box contains `pos`
fn marker_at<'m>(hits: &[(Rect, &'m Marker)], pos: Pos2) -> Option<&'m Marker> {
    hits.iter()
        .rev()
        .find(|(rect, _)| rect.contains(pos))
        .map(|(_, marker)| *marker)
}

/// Marker under a right click, or under a touch held on it past [`LONG_PRESS_MS`].
///
/// A hold fires once; the latch clears when the pointer is released.
fn long_pressed_marker<'m>(
    ui: &Ui,
    response: &Response,
    hits: &[(Rect, &'m Marker)],
) -> Option<&'m Marker> {
    if response.secondary_clicked() {
        return marker_at(hits, response.interact_pointer_pos()?);
    }

    let latch = response.id.with("long_press");
    let (down, origin, latest, started, now) = ui.input(|i| {
        (
            i.pointer.primary_down(),
            i.pointer.press_origin(),
            i.pointer.latest_pos(),
            i.pointer.press_start_time(),
            i.time,
        )
    });
    if !down {
        ui.data_mut(|d| d.remove::<bool>(latch));
        return None;
    }
    if !response.is_pointer_button_down_on() {
        return None;
    }
    if ui.data(|d| d.get_temp::<bool>(latch)).unwrap_or(false) {
        return None;
    }

    let marker = marker_at(hits, origin?)?;
    // Sliding off the marker turns the hold into a pan
    if !marker_at(hits, latest?).is_some_and(|under| under.id() == marker.id()) {
        return None;
    }
    // No input arrives while the finger rests, keep frames coming
    ui.ctx().request_repaint();
    if now - started? < LONG_PRESS_MS as f64 / 1000.0 {
        return None;
    }
    ui.data_mut(|d| d.insert_temp(latch, true));
    Some(marker)
}

fn handle_gestures(
    ui: &Ui,
    response: &Response,
    rect: Rect,
    mut viewport: Viewport,
    events: &mut Vec<ScreenEvent>,
) {
    let pressed = ui.input(|i| i.pointer.any_pressed());
    if pressed && response.is_pointer_button_down_on() {
        events.push(ScreenEvent::MapTouchStart);
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let pixel = to_local(rect, pos);
            events.push(ScreenEvent::MapTapped(viewport.pixel_to_coordinate(&pixel)));
        }
    }

    let mut moved = false;
    if response.dragged() {
        let delta = response.drag_delta();
        if delta.length_sq() > 0.0 {
            viewport.pan(Point::new(delta.x as f64, delta.y as f64));
            moved = true;
        }
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll.abs() > 0.1 {
            let focus = ui.input(|i| i.pointer.hover_pos()).map(|pos| to_local(rect, pos));
            let zoom = viewport.zoom + scroll as f64 * SCROLL_ZOOM_RATE;
            viewport.zoom_around(zoom, focus);
            moved = true;
        }
    }

    if moved {
        events.push(ScreenEvent::ViewChanged(CameraView {
            center: viewport.center,
            zoom: viewport.zoom,
        }));
    }
}

fn to_screen(rect: Rect, pixel: Point) -> Pos2 {
    rect.min + Vec2::new(pixel.x as f32, pixel.y as f32)
}

fn to_local(rect: Rect, pos: Pos2) -> Point {
    Point::new((pos.x - rect.left()) as f64, (pos.y - rect.top()) as f64)
}
