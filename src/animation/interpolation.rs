use crate::core::geo::Coordinate;
use std::f64::consts::PI;

/// Interpolation trait for values that can be smoothly transitioned
pub trait Interpolatable {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

/// Easing functions used by camera transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingFunction {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInOutSine,
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseInOutSine => -(((PI * t).cos() - 1.0) / 2.0),
        }
    }
}

/// Main interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two f64 values
    pub fn linear(start: f64, end: f64, t: f64) -> f64 {
        start + (end - start) * t
    }

    /// Interpolate between two coordinates
    pub fn coordinate(start: &Coordinate, end: &Coordinate, t: f64) -> Coordinate {
        start.lerp(end, t)
    }

    /// Spherical interpolation for geographical coordinates (great circle path)
    pub fn slerp_coordinate(start: &Coordinate, end: &Coordinate, t: f64) -> Coordinate {
        let start_rad = (start.latitude.to_radians(), start.longitude.to_radians());
        let end_rad = (end.latitude.to_radians(), end.longitude.to_radians());

        let start_cart = (
            start_rad.0.cos() * start_rad.1.cos(),
            start_rad.0.cos() * start_rad.1.sin(),
            start_rad.0.sin(),
        );
        let end_cart = (
            end_rad.0.cos() * end_rad.1.cos(),
            end_rad.0.cos() * end_rad.1.sin(),
            end_rad.0.sin(),
        );

        let dot = start_cart.0 * end_cart.0 + start_cart.1 * end_cart.1 + start_cart.2 * end_cart.2;
        let theta = dot.clamp(-1.0, 1.0).acos();

        if theta.abs() < 1e-6 {
            // Points are very close, use linear interpolation
            return Self::coordinate(start, end, t);
        }

        let sin_theta = theta.sin();
        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;

        let result_cart = (
            a * start_cart.0 + b * end_cart.0,
            a * start_cart.1 + b * end_cart.1,
            a * start_cart.2 + b * end_cart.2,
        );

        let lat = result_cart.2.asin().to_degrees();
        let lng = result_cart.1.atan2(result_cart.0).to_degrees();

        Coordinate::new(lng, lat)
    }
}

impl Interpolatable for Coordinate {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Coordinate::new(
            Interpolation::linear(self.longitude, other.longitude, t),
            Interpolation::linear(self.latitude, other.latitude, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_interpolation() {
        assert_eq!(Interpolation::linear(0.0, 10.0, 0.5), 5.0);
        assert_eq!(Interpolation::linear(0.0, 10.0, 0.0), 0.0);
        assert_eq!(Interpolation::linear(0.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_easing_functions() {
        assert_eq!(EasingFunction::Linear.apply(0.5), 0.5);
        assert!(EasingFunction::EaseInQuad.apply(0.5) < 0.5);
        assert!(EasingFunction::EaseOutQuad.apply(0.5) > 0.5);
        for easing in [
            EasingFunction::EaseInOutQuad,
            EasingFunction::EaseOutCubic,
            EasingFunction::EaseInOutCubic,
            EasingFunction::EaseInOutSine,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-9);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_slerp_endpoints() {
        let start = Coordinate::new(34.78, 32.08);
        let end = Coordinate::new(35.21, 31.77);

        let at_start = Interpolation::slerp_coordinate(&start, &end, 0.0);
        let at_end = Interpolation::slerp_coordinate(&start, &end, 1.0);

        assert!((at_start.longitude - start.longitude).abs() < 1e-9);
        assert!((at_end.latitude - end.latitude).abs() < 1e-9);
    }
}
