//! Unit conversions and angle helpers.
//!
//! Reference values for the robot are authored in inches and rotations
//! because that is how the mechanism drawings and encoder tools report them.
//! Everything downstream works in meters and radians.

use std::f64::consts::TAU;

/// Meters per inch (exact by definition).
pub const METERS_PER_INCH: f64 = 0.0254;

/// Convert inches to meters.
///
/// # Example
/// ```
/// use chakra_drive::math::inches_to_meters;
///
/// assert!((inches_to_meters(22.5) - 0.5715).abs() < 1e-12);
/// ```
#[inline]
pub fn inches_to_meters(inches: f64) -> f64 {
    inches * METERS_PER_INCH
}

/// Convert full rotations to radians.
#[inline]
pub fn rotations_to_radians(rotations: f64) -> f64 {
    rotations * TAU
}

/// Convert radians to full rotations.
#[inline]
pub fn radians_to_rotations(radians: f64) -> f64 {
    radians / TAU
}

/// Wrap angle to [0, 2π).
///
/// # Example
/// ```
/// use chakra_drive::math::wrap_two_pi;
/// use std::f64::consts::PI;
///
/// assert!((wrap_two_pi(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
/// ```
#[inline]
pub fn wrap_two_pi(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_inches_to_meters() {
        assert_relative_eq!(inches_to_meters(2.0), 0.0508, epsilon = 1e-12);
        assert_relative_eq!(inches_to_meters(38.5), 0.9779, epsilon = 1e-12);
    }

    #[test]
    fn test_rotations_to_radians() {
        assert_relative_eq!(rotations_to_radians(0.5), PI);
        assert_relative_eq!(rotations_to_radians(-0.25), -PI / 2.0);
        assert_relative_eq!(radians_to_rotations(TAU), 1.0);
    }

    #[test]
    fn test_wrap_two_pi() {
        assert_relative_eq!(wrap_two_pi(0.0), 0.0);
        assert_relative_eq!(wrap_two_pi(TAU), 0.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_two_pi(3.0 * PI), PI, epsilon = 1e-12);
        assert_relative_eq!(wrap_two_pi(-0.25 * TAU), 0.75 * TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_two_pi_tiny_negative() {
        let a = wrap_two_pi(-1e-18);
        assert!((0.0..TAU).contains(&a));
    }
}
