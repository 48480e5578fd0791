//! Validated swerve drivebase configuration.
//!
//! [`SwerveConfig`] bundles everything the control loop reads: drivebase
//! geometry, the module placements derived from it, hardware addressing and
//! module tuning. It is built once at startup and shared read-only; nothing
//! in it can change after construction.

use crate::constants;
use crate::error::Result;
use crate::geometry::{DrivebaseConfig, ModuleCorner, Point2D, MODULE_COUNT};
use crate::hardware::{ModuleHardware, ModuleHardwareMap};
use crate::math::inches_to_meters;
use crate::tuning::ModuleTuningSet;

/// Complete drivebase configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SwerveConfig {
    drivebase: DrivebaseConfig,
    placements: [Point2D; MODULE_COUNT],
    hardware: ModuleHardwareMap,
    tuning: ModuleTuningSet,
}

impl SwerveConfig {
    /// Bundle validated parts and derive module placements.
    pub fn new(
        drivebase: DrivebaseConfig,
        hardware: ModuleHardwareMap,
        tuning: ModuleTuningSet,
    ) -> Self {
        let placements = drivebase.module_placements();

        log::info!(
            "Swerve drivebase: track {:.4} m, wheel radius {:.4} m, max {:.3} m/s / {:.3} rad/s",
            drivebase.track_width(),
            drivebase.wheel_radius(),
            drivebase.max_linear_velocity(),
            drivebase.max_angular_velocity()
        );
        for (corner, module) in hardware.iter() {
            let p = placements[corner.index()];
            log::debug!(
                "  {:<11} at ({:+.5}, {:+.5}) drive={} steer={} encoder={} offset={:.4} rad",
                corner,
                p.x,
                p.y,
                module.drive_id,
                module.steer_id,
                module.encoder_id,
                module.normalized_offset()
            );
        }
        log::debug!(
            "  reductions: drive {:.4}:1, steer {:.4}:1",
            tuning.drive_reduction(),
            tuning.steer_reduction()
        );

        Self {
            drivebase,
            placements,
            hardware,
            tuning,
        }
    }

    /// The compiled-in competition robot.
    pub fn reference() -> Result<Self> {
        let drivebase = DrivebaseConfig::new(
            inches_to_meters(constants::WHEEL_RADIUS_INCHES),
            inches_to_meters(constants::TRACK_WIDTH_INCHES),
            inches_to_meters(constants::BUMPER_WIDTH_X_INCHES),
            inches_to_meters(constants::BUMPER_WIDTH_Y_INCHES),
            constants::MAX_LINEAR_VELOCITY,
            constants::MAX_ANGULAR_VELOCITY,
        )?;

        let modules = constants::MODULES.map(|(drive, steer, encoder, offset)| {
            ModuleHardware::with_offset_rotations(drive, steer, encoder, offset)
        });
        let hardware = ModuleHardwareMap::new(modules, constants::GYRO_ID)?;

        let tuning = ModuleTuningSet::new(
            constants::STEER_GAINS,
            constants::DRIVE_GAINS,
            constants::DRIVE_GEARING.ratio(),
            constants::STEER_GEARING.ratio(),
        )?;

        Ok(Self::new(drivebase, hardware, tuning))
    }

    #[inline]
    pub fn drivebase(&self) -> &DrivebaseConfig {
        &self.drivebase
    }

    /// Module positions relative to the robot center, in corner order.
    #[inline]
    pub fn placements(&self) -> &[Point2D; MODULE_COUNT] {
        &self.placements
    }

    #[inline]
    pub fn placement(&self, corner: ModuleCorner) -> Point2D {
        self.placements[corner.index()]
    }

    #[inline]
    pub fn hardware(&self) -> &ModuleHardwareMap {
        &self.hardware
    }

    #[inline]
    pub fn tuning(&self) -> &ModuleTuningSet {
        &self.tuning
    }

    /// Maximum module wheel speed in drive motor rotations per second.
    pub fn max_drive_motor_rps(&self) -> f64 {
        self.drivebase.max_linear_velocity()
            / self
                .tuning
                .meters_per_drive_rotation(self.drivebase.wheel_radius())
    }
}
