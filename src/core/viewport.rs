use crate::core::constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use crate::core::geo::{Coordinate, Point, EARTH_RADIUS, MAX_LATITUDE};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: Coordinate,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: Coordinate, zoom: f64, size: Point) -> Self {
        Self {
            center: Self::clamp_center(center),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    /// Sets the center of the viewport, clamped to the projectable world
    pub fn set_center(&mut self, center: Coordinate) {
        self.center = Self::clamp_center(center);
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the zoom limits; a reversed pair is swapped
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = min_zoom.max(max_zoom);
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Projects a coordinate to world pixel coordinates at the given zoom level (EPSG:3857)
    pub fn project(&self, coordinate: &Coordinate, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE * 2_f64.powf(z);
        let world = 2.0 * PI * EARTH_RADIUS;

        let mercator = Coordinate::new(
            coordinate.longitude,
            Coordinate::clamp_lat(coordinate.latitude),
        )
        .to_mercator();

        Point::new(
            (mercator.x + PI * EARTH_RADIUS) / world * scale,
            (-mercator.y + PI * EARTH_RADIUS) / world * scale,
        )
    }

    /// Unprojects world pixel coordinates back to a coordinate at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> Coordinate {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE * 2_f64.powf(z);
        let world = 2.0 * PI * EARTH_RADIUS;

        let x = (pixel.x / scale) * world - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * world;

        Coordinate::from_mercator(Point::new(x, y))
    }

    /// Converts a geographical coordinate to screen pixel coordinates (container relative)
    pub fn coordinate_to_pixel(&self, coordinate: &Coordinate) -> Point {
        let offset = self
            .project(coordinate, None)
            .subtract(&self.project(&self.center, None));
        Point::new(offset.x + self.size.x / 2.0, offset.y + self.size.y / 2.0)
    }

    /// Converts screen pixel coordinates back to geographical coordinates
    pub fn pixel_to_coordinate(&self, pixel: &Point) -> Coordinate {
        let offset = Point::new(pixel.x - self.size.x / 2.0, pixel.y - self.size.y / 2.0);
        let world_point = self.project(&self.center, None).add(&offset);
        self.unproject(&world_point, None)
    }

    /// Pans the viewport by the given pixel offset (drag delta)
    pub fn pan(&mut self, delta: Point) {
        let center_point = self.project(&self.center, None);
        let new_center = self.unproject(&center_point.subtract(&delta), None);
        self.set_center(new_center);
    }

    /// Zooms to a level while keeping `focus_point` (screen pixels) stationary
    pub fn zoom_around(&mut self, zoom: f64, focus_point: Option<Point>) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < 0.001 {
            return;
        }

        match focus_point {
            Some(focus_screen) => {
                let focus_coordinate = self.pixel_to_coordinate(&focus_screen);
                self.zoom = new_zoom;
                let drifted = self.coordinate_to_pixel(&focus_coordinate);
                self.pan(focus_screen.subtract(&drifted));
            }
            None => self.zoom = new_zoom,
        }
    }

    /// Returns true when the coordinate falls inside the visible area
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        let pixel = self.coordinate_to_pixel(coordinate);
        (0.0..=self.size.x).contains(&pixel.x) && (0.0..=self.size.y).contains(&pixel.y)
    }

    fn clamp_center(center: Coordinate) -> Coordinate {
        Coordinate::new(
            center.longitude.clamp(-180.0, 180.0),
            center.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Coordinate::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(
            Coordinate::new(34.78, 32.08),
            10.0,
            Point::new(800.0, 600.0),
        );

        assert_eq!(viewport.zoom, 10.0);
        assert_eq!(viewport.center.latitude, 32.08);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_center_pixel_maps_to_center() {
        let viewport = Viewport::new(Coordinate::new(34.78, 32.08), 12.0, Point::new(512.0, 512.0));

        let center = viewport.pixel_to_coordinate(&Point::new(256.0, 256.0));
        assert!((center.longitude - 34.78).abs() < 1e-6);
        assert!((center.latitude - 32.08).abs() < 1e-6);

        let pixel = viewport.coordinate_to_pixel(&Coordinate::new(34.78, 32.08));
        assert!((pixel.x - 256.0).abs() < 1e-6);
        assert!((pixel.y - 256.0).abs() < 1e-6);
    }

    #[test]
    fn test_east_is_right_north_is_up() {
        let viewport = Viewport::new(Coordinate::new(34.78, 32.08), 12.0, Point::new(512.0, 512.0));
        let east = viewport.coordinate_to_pixel(&Coordinate::new(34.80, 32.08));
        let north = viewport.coordinate_to_pixel(&Coordinate::new(34.78, 32.10));
        assert!(east.x > 256.0);
        assert!(north.y < 256.0);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_reversed_zoom_limits_are_swapped() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(15.0, 2.0);

        assert_eq!(viewport.min_zoom, 2.0);
        assert_eq!(viewport.max_zoom, 15.0);
        viewport.set_zoom(18.0);
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_pan() {
        let mut viewport = Viewport::new(Coordinate::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let original_center = viewport.center;
        viewport.pan(Point::new(10.0, 10.0));

        // Dragging right and down moves the center west and north
        assert_ne!(viewport.center, original_center);
        assert!(viewport.center.longitude < 0.0);
        assert!(viewport.center.latitude > 0.0);
    }

    #[test]
    fn test_zoom_around_keeps_focus_stationary() {
        let mut viewport = Viewport::new(Coordinate::new(34.78, 32.08), 10.0, Point::new(800.0, 600.0));
        let focus = Point::new(600.0, 150.0);
        let before = viewport.pixel_to_coordinate(&focus);

        viewport.zoom_around(12.0, Some(focus));

        let after = viewport.pixel_to_coordinate(&focus);
        assert_eq!(viewport.zoom, 12.0);
        assert!((before.longitude - after.longitude).abs() < 1e-6);
        assert!((before.latitude - after.latitude).abs() < 1e-6);
    }
}
