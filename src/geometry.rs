//! Drivebase geometry and module placement.
//!
//! All coordinates are robot-relative, measured from the geometric center in
//! a right-handed north-west-up frame:
//! - **X axis**: forward
//! - **Y axis**: left
//!
//! Module-indexed arrays everywhere in this crate use the [`ModuleCorner`]
//! order: front-left, front-right, back-left, back-right.

use crate::error::{ensure_positive, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of swerve modules on the drivebase.
pub const MODULE_COUNT: usize = 4;

/// A 2D point in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters (forward)
    pub x: f64,
    /// Y coordinate in meters (left)
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Distance from the robot center.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Physical position of a module. The discriminant is its array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleCorner {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl ModuleCorner {
    /// All corners in index order.
    pub const ALL: [ModuleCorner; MODULE_COUNT] = [
        ModuleCorner::FrontLeft,
        ModuleCorner::FrontRight,
        ModuleCorner::BackLeft,
        ModuleCorner::BackRight,
    ];

    /// Index into module-indexed arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Corner for an array index, `None` if out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// +1 for front modules, -1 for back modules.
    #[inline]
    pub const fn x_sign(self) -> f64 {
        match self {
            ModuleCorner::FrontLeft | ModuleCorner::FrontRight => 1.0,
            ModuleCorner::BackLeft | ModuleCorner::BackRight => -1.0,
        }
    }

    /// +1 for left modules, -1 for right modules.
    #[inline]
    pub const fn y_sign(self) -> f64 {
        match self {
            ModuleCorner::FrontLeft | ModuleCorner::BackLeft => 1.0,
            ModuleCorner::FrontRight | ModuleCorner::BackRight => -1.0,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            ModuleCorner::FrontLeft => "fl",
            ModuleCorner::FrontRight => "fr",
            ModuleCorner::BackLeft => "bl",
            ModuleCorner::BackRight => "br",
        }
    }
}

impl fmt::Display for ModuleCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ModuleCorner::FrontLeft => "front-left",
            ModuleCorner::FrontRight => "front-right",
            ModuleCorner::BackLeft => "back-left",
            ModuleCorner::BackRight => "back-right",
        })
    }
}

/// Physical dimensions of the drivebase.
///
/// Lengths in meters, velocities in m/s and rad/s. The footprint is square:
/// track width is the same front-to-back and side-to-side.
///
/// Construction validates every field; an instance that exists is physically
/// possible. There are no setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivebaseConfig {
    wheel_radius: f64,
    track_width: f64,
    bumper_width_x: f64,
    bumper_width_y: f64,
    max_linear_velocity: f64,
    max_angular_velocity: f64,
}

impl DrivebaseConfig {
    /// Validate and build a drivebase.
    ///
    /// Fails with a configuration error naming the first field that is not
    /// finite and strictly positive.
    pub fn new(
        wheel_radius: f64,
        track_width: f64,
        bumper_width_x: f64,
        bumper_width_y: f64,
        max_linear_velocity: f64,
        max_angular_velocity: f64,
    ) -> Result<Self> {
        ensure_positive("drivebase.wheel_radius", wheel_radius)?;
        ensure_positive("drivebase.track_width", track_width)?;
        ensure_positive("drivebase.bumper_width_x", bumper_width_x)?;
        ensure_positive("drivebase.bumper_width_y", bumper_width_y)?;
        ensure_positive("drivebase.max_linear_velocity", max_linear_velocity)?;
        ensure_positive("drivebase.max_angular_velocity", max_angular_velocity)?;

        Ok(Self {
            wheel_radius,
            track_width,
            bumper_width_x,
            bumper_width_y,
            max_linear_velocity,
            max_angular_velocity,
        })
    }

    /// Wheel radius (m)
    #[inline]
    pub fn wheel_radius(&self) -> f64 {
        self.wheel_radius
    }

    /// Module center-to-center distance (m)
    #[inline]
    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    /// Bumper extent along X (m)
    #[inline]
    pub fn bumper_width_x(&self) -> f64 {
        self.bumper_width_x
    }

    /// Bumper extent along Y (m)
    #[inline]
    pub fn bumper_width_y(&self) -> f64 {
        self.bumper_width_y
    }

    /// Maximum linear velocity (m/s)
    #[inline]
    pub fn max_linear_velocity(&self) -> f64 {
        self.max_linear_velocity
    }

    /// Maximum angular velocity (rad/s)
    #[inline]
    pub fn max_angular_velocity(&self) -> f64 {
        self.max_angular_velocity
    }

    /// Half the bumper extents, as a corner point of the bumper rectangle.
    pub fn bumper_half_extents(&self) -> Point2D {
        Point2D::new(self.bumper_width_x / 2.0, self.bumper_width_y / 2.0)
    }

    /// Distance from the robot center to each module (m).
    ///
    /// Converts between chassis angular speed and module tangential speed.
    pub fn drive_base_radius(&self) -> f64 {
        std::f64::consts::FRAC_1_SQRT_2 * self.track_width
    }

    /// Module mounting positions, see [`derive_placements`].
    pub fn module_placements(&self) -> [Point2D; MODULE_COUNT] {
        derive_placements(self)
    }
}

/// Place the four modules at the corners of a square of side `track_width`
/// centered on the origin, in [`ModuleCorner`] order.
pub fn derive_placements(config: &DrivebaseConfig) -> [Point2D; MODULE_COUNT] {
    let half = config.track_width() / 2.0;
    ModuleCorner::ALL.map(|corner| Point2D::new(corner.x_sign() * half, corner.y_sign() * half))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn drivebase(track_width: f64) -> DrivebaseConfig {
        DrivebaseConfig::new(0.0508, track_width, 0.9779, 0.8382, 5.4764, 6.7759).unwrap()
    }

    #[test]
    fn test_reference_placements() {
        let placements = derive_placements(&drivebase(0.5715));
        let expected = [
            (0.28575, 0.28575),
            (0.28575, -0.28575),
            (-0.28575, 0.28575),
            (-0.28575, -0.28575),
        ];
        for (p, (x, y)) in placements.iter().zip(expected) {
            assert_relative_eq!(p.x, x, epsilon = 1e-12);
            assert_relative_eq!(p.y, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_placements_form_centered_square() {
        for track_width in [0.1, 0.5715, 1.0, 3.7] {
            let p = derive_placements(&drivebase(track_width));

            // Centroid at origin
            let cx: f64 = p.iter().map(|q| q.x).sum::<f64>() / 4.0;
            let cy: f64 = p.iter().map(|q| q.y).sum::<f64>() / 4.0;
            assert_relative_eq!(cx, 0.0, epsilon = 1e-12);
            assert_relative_eq!(cy, 0.0, epsilon = 1e-12);

            // Sides are track_width, diagonals are track_width * sqrt(2)
            let fl = ModuleCorner::FrontLeft.index();
            let fr = ModuleCorner::FrontRight.index();
            let bl = ModuleCorner::BackLeft.index();
            let br = ModuleCorner::BackRight.index();
            assert_relative_eq!(p[fl].distance(&p[fr]), track_width, epsilon = 1e-12);
            assert_relative_eq!(p[fl].distance(&p[bl]), track_width, epsilon = 1e-12);
            assert_relative_eq!(p[br].distance(&p[fr]), track_width, epsilon = 1e-12);
            assert_relative_eq!(p[br].distance(&p[bl]), track_width, epsilon = 1e-12);
            assert_relative_eq!(
                p[fl].distance(&p[br]),
                track_width * std::f64::consts::SQRT_2,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_placement_quadrants_follow_corner_order() {
        let p = derive_placements(&drivebase(0.6));
        for corner in ModuleCorner::ALL {
            let q = p[corner.index()];
            assert_eq!(q.x.signum(), corner.x_sign());
            assert_eq!(q.y.signum(), corner.y_sign());
        }
        // Front is +X, left is +Y
        assert!(p[0].x > 0.0 && p[0].y > 0.0);
        assert!(p[1].x > 0.0 && p[1].y < 0.0);
        assert!(p[2].x < 0.0 && p[2].y > 0.0);
        assert!(p[3].x < 0.0 && p[3].y < 0.0);
    }

    #[test]
    fn test_placements_are_bit_identical() {
        let config = drivebase(0.5715);
        let a = derive_placements(&config);
        let b = derive_placements(&config);
        for (p, q) in a.iter().zip(b.iter()) {
            assert_eq!(p.x.to_bits(), q.x.to_bits());
            assert_eq!(p.y.to_bits(), q.y.to_bits());
        }
        assert_eq!(config.module_placements(), a);
    }

    #[test]
    fn test_zero_wheel_radius_rejected() {
        let err = DrivebaseConfig::new(0.0, 0.5715, 0.9779, 0.8382, 5.4764, 6.7759).unwrap_err();
        assert!(err.is_config());
        assert_eq!(err.field(), Some("drivebase.wheel_radius"));
    }

    #[test]
    fn test_negative_angular_velocity_rejected() {
        let err = DrivebaseConfig::new(0.0508, 0.5715, 0.9779, 0.8382, 5.4764, -1.0).unwrap_err();
        assert!(err.is_config());
        assert_eq!(err.field(), Some("drivebase.max_angular_velocity"));
    }

    #[test]
    fn test_every_field_validated() {
        let good = [0.0508, 0.5715, 0.9779, 0.8382, 5.4764, 6.7759];
        for i in 0..good.len() {
            for bad in [0.0, -0.5, f64::NAN, f64::INFINITY] {
                let mut v = good;
                v[i] = bad;
                let result = DrivebaseConfig::new(v[0], v[1], v[2], v[3], v[4], v[5]);
                assert!(result.is_err(), "field {} accepted {}", i, bad);
            }
        }
    }

    #[test]
    fn test_accessors() {
        let config = drivebase(0.5715);
        assert_eq!(config.wheel_radius(), 0.0508);
        assert_eq!(config.track_width(), 0.5715);
        assert_eq!(config.bumper_width_x(), 0.9779);
        assert_eq!(config.bumper_width_y(), 0.8382);
        assert_eq!(config.max_linear_velocity(), 5.4764);
        assert_eq!(config.max_angular_velocity(), 6.7759);

        let half = config.bumper_half_extents();
        assert_relative_eq!(half.x, 0.48895);
        assert_relative_eq!(half.y, 0.4191);
    }

    #[test]
    fn test_drive_base_radius_matches_placement_norm() {
        let config = drivebase(0.5715);
        for p in config.module_placements() {
            assert_relative_eq!(p.norm(), config.drive_base_radius(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_corner_index_roundtrip() {
        for (i, corner) in ModuleCorner::ALL.iter().enumerate() {
            assert_eq!(corner.index(), i);
            assert_eq!(ModuleCorner::from_index(i), Some(*corner));
        }
        assert_eq!(ModuleCorner::from_index(4), None);
    }
}
