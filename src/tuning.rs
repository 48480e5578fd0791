//! Per-module control gains and mechanical reductions.
//!
//! All four modules share one tuning set. Gains follow the usual
//! feedforward + PD layout:
//!
//! ```text
//! output = kS * sign(v) + kV * v + kT * torque + kP * error + kD * d(error)/dt
//! ```

use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, Result};

/// Feedforward and feedback gains for one motor loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotorGains {
    /// Static friction feedforward
    pub ks: f64,
    /// Velocity feedforward
    pub kv: f64,
    /// Torque feedforward
    pub kt: f64,
    /// Proportional gain
    pub kp: f64,
    /// Derivative gain
    pub kd: f64,
}

impl MotorGains {
    pub const fn new(ks: f64, kv: f64, kt: f64, kp: f64, kd: f64) -> Self {
        Self { ks, kv, kt, kp, kd }
    }

    /// Feedforwards must be finite; kP and kD must be finite and >= 0.
    fn validate(&self, prefix: &str) -> Result<()> {
        ensure_finite(&format!("{prefix}.ks"), self.ks)?;
        ensure_finite(&format!("{prefix}.kv"), self.kv)?;
        ensure_finite(&format!("{prefix}.kt"), self.kt)?;
        ensure_non_negative(&format!("{prefix}.kp"), self.kp)?;
        ensure_non_negative(&format!("{prefix}.kd"), self.kd)?;
        Ok(())
    }
}

/// Tuning shared by every swerve module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleTuningSet {
    steer: MotorGains,
    drive: MotorGains,
    drive_reduction: f64,
    steer_reduction: f64,
}

impl ModuleTuningSet {
    /// Validate and build a tuning set.
    ///
    /// Reductions must be finite and > 0 (motor rotations per output
    /// rotation).
    pub fn new(
        steer: MotorGains,
        drive: MotorGains,
        drive_reduction: f64,
        steer_reduction: f64,
    ) -> Result<Self> {
        steer.validate("tuning.steer")?;
        drive.validate("tuning.drive")?;
        ensure_positive("tuning.drive_reduction", drive_reduction)?;
        ensure_positive("tuning.steer_reduction", steer_reduction)?;

        Ok(Self {
            steer,
            drive,
            drive_reduction,
            steer_reduction,
        })
    }

    #[inline]
    pub fn steer(&self) -> &MotorGains {
        &self.steer
    }

    #[inline]
    pub fn drive(&self) -> &MotorGains {
        &self.drive
    }

    /// Drive motor rotations per wheel rotation
    #[inline]
    pub fn drive_reduction(&self) -> f64 {
        self.drive_reduction
    }

    /// Steer motor rotations per pivot rotation
    #[inline]
    pub fn steer_reduction(&self) -> f64 {
        self.steer_reduction
    }

    /// Wheel surface travel per drive motor rotation (m).
    pub fn meters_per_drive_rotation(&self, wheel_radius: f64) -> f64 {
        std::f64::consts::TAU * wheel_radius / self.drive_reduction
    }

    /// Pivot angle per steer motor rotation (rad).
    pub fn radians_per_steer_rotation(&self) -> f64 {
        std::f64::consts::TAU / self.steer_reduction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reductions::GearReduction;
    use approx::assert_relative_eq;

    fn steer() -> MotorGains {
        MotorGains::new(0.4, 0.6, 0.0, 11.0, 0.0)
    }

    fn drive() -> MotorGains {
        MotorGains::new(0.32, 0.11, 0.0, 3.0, 0.0)
    }

    #[test]
    fn test_valid_tuning() {
        let tuning = ModuleTuningSet::new(
            steer(),
            drive(),
            GearReduction::Mk4iL3.ratio(),
            GearReduction::Steer.ratio(),
        )
        .unwrap();
        assert_eq!(tuning.steer().kp, 11.0);
        assert_eq!(tuning.drive().kv, 0.11);
        assert_relative_eq!(tuning.steer_reduction(), 150.0 / 7.0);
    }

    #[test]
    fn test_non_positive_reduction_rejected() {
        let err = ModuleTuningSet::new(steer(), drive(), 0.0, 21.4).unwrap_err();
        assert_eq!(err.field(), Some("tuning.drive_reduction"));

        let err = ModuleTuningSet::new(steer(), drive(), 6.1, -21.4).unwrap_err();
        assert_eq!(err.field(), Some("tuning.steer_reduction"));
    }

    #[test]
    fn test_negative_feedback_gain_rejected() {
        let mut bad = steer();
        bad.kp = -1.0;
        let err = ModuleTuningSet::new(bad, drive(), 6.1, 21.4).unwrap_err();
        assert!(err.is_config());
        assert_eq!(err.field(), Some("tuning.steer.kp"));

        let mut bad = drive();
        bad.kd = -0.01;
        let err = ModuleTuningSet::new(steer(), bad, 6.1, 21.4).unwrap_err();
        assert_eq!(err.field(), Some("tuning.drive.kd"));
    }

    #[test]
    fn test_feedforward_may_be_negative_but_finite() {
        let mut gains = drive();
        gains.ks = -0.05;
        assert!(ModuleTuningSet::new(steer(), gains, 6.1, 21.4).is_ok());

        gains.kv = f64::NAN;
        let err = ModuleTuningSet::new(steer(), gains, 6.1, 21.4).unwrap_err();
        assert_eq!(err.field(), Some("tuning.drive.kv"));
    }

    #[test]
    fn test_unit_conversions() {
        let tuning = ModuleTuningSet::new(steer(), drive(), 6.0, 20.0).unwrap();
        assert_relative_eq!(
            tuning.meters_per_drive_rotation(0.05),
            std::f64::consts::TAU * 0.05 / 6.0
        );
        assert_relative_eq!(tuning.radians_per_steer_rotation(), std::f64::consts::TAU / 20.0);
    }
}
