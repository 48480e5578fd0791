//! Reference constants for the competition swerve robot.
//!
//! Centralizes the compiled-in values that [`SwerveConfig::reference`] is
//! built from. Geometry is authored in inches, encoder offsets in rotations,
//! both as read off the CAD and the encoder calibration tool.
//!
//! Module arrays are ordered front-left, front-right, back-left, back-right.
//!
//! [`SwerveConfig::reference`]: crate::swerve::SwerveConfig::reference

use crate::hardware::DeviceId;
use crate::mode::RobotType;
use crate::reductions::GearReduction;
use crate::tuning::MotorGains;

/// Robot this build is deployed to.
pub const ROBOT_TYPE: RobotType = RobotType::Competition;

// ============================================================================
// Drivebase geometry
// ============================================================================

/// Wheel radius (4" wheel).
pub const WHEEL_RADIUS_INCHES: f64 = 2.0;

/// Module center-to-center distance, both axes.
pub const TRACK_WIDTH_INCHES: f64 = 22.5;

/// Bumper extent front-to-back.
pub const BUMPER_WIDTH_X_INCHES: f64 = 38.5;

/// Bumper extent side-to-side.
pub const BUMPER_WIDTH_Y_INCHES: f64 = 33.0;

/// Free-speed estimate, m/s. Not yet measured on carpet.
pub const MAX_LINEAR_VELOCITY: f64 = 5.4764;

/// rad/s
pub const MAX_ANGULAR_VELOCITY: f64 = 6.7759;

// ============================================================================
// Hardware map
// ============================================================================

pub const GYRO_ID: DeviceId = 0;

/// (drive ID, steer ID, encoder ID, encoder offset in rotations)
pub const MODULES: [(DeviceId, DeviceId, DeviceId, f64); 4] = [
    (2, 1, 27, 0.316650390625),
    (13, 12, 26, 0.225341796875),
    (4, 3, 24, 0.41943359375),
    (11, 10, 25, -0.39990234375),
];

// ============================================================================
// Module tuning
// ============================================================================

pub const STEER_GAINS: MotorGains = MotorGains::new(0.4, 0.6, 0.0, 11.0, 0.0);

pub const DRIVE_GAINS: MotorGains = MotorGains::new(0.32, 0.11, 0.0, 3.0, 0.0);

// Older tuning carried a bare 5.357142857142857 here; no MK4i stage set gives it.
/// Drive gearing fitted to the modules.
pub const DRIVE_GEARING: GearReduction = GearReduction::Mk4iL3;

pub const STEER_GEARING: GearReduction = GearReduction::Steer;
