use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator projection constants
pub(crate) const EARTH_RADIUS: f64 = 6378137.0;
pub(crate) const MAX_LATITUDE: f64 = 85.0511287798;

/// A geographical position in WGS84 degrees.
///
/// The constructor and the serialized form are both `(longitude, latitude)`,
/// the order used by the geocoding API (`center: [lon, lat]`) and by the map
/// surface. Never build one from a `(lat, lon)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate from longitude and latitude
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Calculates the distance in meters to another coordinate using the Haversine formula
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lng = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }

    /// Clamps latitude to the range Web Mercator can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Converts to Web Mercator projection (EPSG:3857)
    pub fn to_mercator(&self) -> Point {
        let x = self.longitude.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + self.latitude.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;
        Point::new(x, y)
    }

    /// Creates a coordinate from Web Mercator coordinates
    pub fn from_mercator(point: Point) -> Self {
        let lng = (point.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Self::new(lng, lat)
    }

    /// Parses a `"lon,lat"` pair, as accepted on the command line and in env vars
    pub fn parse_lon_lat(text: &str) -> Option<Self> {
        let (lon, lat) = text.split_once(',')?;
        let coordinate = Self::new(lon.trim().parse().ok()?, lat.trim().parse().ok()?);
        coordinate.is_valid().then_some(coordinate)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.longitude, coordinate.latitude]
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.longitude, self.latitude)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation_keeps_lon_lat_order() {
        let coord = Coordinate::new(34.78, 32.08);
        assert_eq!(coord.longitude, 34.78);
        assert_eq!(coord.latitude, 32.08);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_coordinate_serializes_as_lon_lat_array() {
        let coord = Coordinate::new(34.78, 32.08);
        let json = serde_json::to_value(coord).unwrap();
        assert_eq!(json, serde_json::json!([34.78, 32.08]));

        let back: Coordinate = serde_json::from_str("[35.21, 31.77]").unwrap();
        assert_eq!(back, Coordinate::new(35.21, 31.77));
    }

    #[test]
    fn test_coordinate_distance() {
        let tel_aviv = Coordinate::new(34.7818, 32.0853);
        let jerusalem = Coordinate::new(35.2137, 31.7683);
        let distance = tel_aviv.distance_to(&jerusalem);

        // Roughly 54 km apart
        assert!((distance - 54_000.0).abs() < 3_000.0);
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(!Coordinate::new(200.0, 10.0).is_valid());
        assert!(!Coordinate::new(10.0, -91.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_parse_lon_lat() {
        assert_eq!(
            Coordinate::parse_lon_lat("34.78, 32.08"),
            Some(Coordinate::new(34.78, 32.08))
        );
        assert_eq!(Coordinate::parse_lon_lat("34.78"), None);
        assert_eq!(Coordinate::parse_lon_lat("abc,1"), None);
        assert_eq!(Coordinate::parse_lon_lat("10,95"), None);
    }

    #[test]
    fn test_mercator_round_trip_stays_close() {
        let coord = Coordinate::new(34.78, 32.08);
        let back = Coordinate::from_mercator(coord.to_mercator());
        assert!((back.longitude - coord.longitude).abs() < 1e-9);
        assert!((back.latitude - coord.latitude).abs() < 1e-9);
    }
}
