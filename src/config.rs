//! TOML robot profiles.
//!
//! A profile is an optional override of the compiled-in reference robot,
//! used for bench setups and spare drivebases. Every field defaults to the
//! reference value, so an empty file describes the competition robot.
//!
//! ```toml
//! robot_type = "development"
//! gyro_id = 0
//!
//! [drivebase]
//! wheel_radius = 0.0508        # meters
//! track_width = 0.5715
//! max_linear_velocity = 4.5    # m/s
//!
//! [[modules]]                  # fl, fr, bl, br
//! drive_id = 2
//! steer_id = 1
//! encoder_id = 27
//! offset_rotations = 0.3167
//! # ... three more
//!
//! [tuning]
//! drive_reduction = "mk4i_l2"  # catalog name or a number
//! steer_reduction = 21.428571428571427
//!
//! [tuning.steer]
//! kp = 11.0
//! ```
//!
//! Parsing never validates; [`RobotProfile::build`] does, and fails with a
//! configuration error naming the offending field.

use crate::constants;
use crate::error::{Error, Result};
use crate::geometry::{DrivebaseConfig, MODULE_COUNT};
use crate::hardware::{DeviceId, ModuleHardware, ModuleHardwareMap};
use crate::math::inches_to_meters;
use crate::mode::{RobotContext, RobotType};
use crate::reductions::GearReduction;
use crate::swerve::SwerveConfig;
use crate::tuning::{ModuleTuningSet, MotorGains};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level robot profile
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RobotProfile {
    /// Robot this profile describes
    #[serde(default = "default_robot_type")]
    pub robot_type: RobotType,

    /// Gyro bus ID
    #[serde(default = "default_gyro_id")]
    pub gyro_id: DeviceId,

    #[serde(default)]
    pub logging: LoggingSection,

    #[serde(default)]
    pub drivebase: DrivebaseSection,

    /// Exactly four entries: front-left, front-right, back-left, back-right
    #[serde(default = "default_modules")]
    pub modules: Vec<ModuleSection>,

    #[serde(default)]
    pub tuning: TuningSection,
}

/// Drivebase dimensions, meters and m/s / rad/s
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DrivebaseSection {
    #[serde(default = "default_wheel_radius")]
    pub wheel_radius: f64,
    #[serde(default = "default_track_width")]
    pub track_width: f64,
    #[serde(default = "default_bumper_width_x")]
    pub bumper_width_x: f64,
    #[serde(default = "default_bumper_width_y")]
    pub bumper_width_y: f64,
    #[serde(default = "default_max_linear_velocity")]
    pub max_linear_velocity: f64,
    #[serde(default = "default_max_angular_velocity")]
    pub max_angular_velocity: f64,
}

impl Default for DrivebaseSection {
    fn default() -> Self {
        Self {
            wheel_radius: default_wheel_radius(),
            track_width: default_track_width(),
            bumper_width_x: default_bumper_width_x(),
            bumper_width_y: default_bumper_width_y(),
            max_linear_velocity: default_max_linear_velocity(),
            max_angular_velocity: default_max_angular_velocity(),
        }
    }
}

impl DrivebaseSection {
    pub fn to_drivebase_config(&self) -> Result<DrivebaseConfig> {
        DrivebaseConfig::new(
            self.wheel_radius,
            self.track_width,
            self.bumper_width_x,
            self.bumper_width_y,
            self.max_linear_velocity,
            self.max_angular_velocity,
        )
    }
}

/// One module's hardware addressing
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ModuleSection {
    pub drive_id: DeviceId,
    pub steer_id: DeviceId,
    pub encoder_id: DeviceId,
    /// Absolute encoder zero offset in rotations
    #[serde(default)]
    pub offset_rotations: f64,
}

impl ModuleSection {
    pub fn to_module_hardware(&self) -> ModuleHardware {
        ModuleHardware::with_offset_rotations(
            self.drive_id,
            self.steer_id,
            self.encoder_id,
            self.offset_rotations,
        )
    }
}

/// A reduction given either by catalog name or as a raw ratio
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ReductionSpec {
    Ratio(f64),
    Named(String),
}

impl ReductionSpec {
    fn resolve(&self, field: &str) -> Result<f64> {
        match self {
            ReductionSpec::Ratio(ratio) => Ok(*ratio),
            ReductionSpec::Named(name) => GearReduction::from_name(name)
                .map(GearReduction::ratio)
                .ok_or_else(|| Error::config(field, name, "unknown gear reduction")),
        }
    }
}

impl From<GearReduction> for ReductionSpec {
    fn from(reduction: GearReduction) -> Self {
        ReductionSpec::Named(reduction.name().to_string())
    }
}

/// Module tuning shared by all four modules
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TuningSection {
    #[serde(default = "default_drive_reduction")]
    pub drive_reduction: ReductionSpec,
    #[serde(default = "default_steer_reduction")]
    pub steer_reduction: ReductionSpec,
    #[serde(default = "default_steer_gains")]
    pub steer: GainsSection,
    #[serde(default = "default_drive_gains")]
    pub drive: GainsSection,
}

/// Gains for one motor loop; omitted terms keep the reference value
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct GainsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ks: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kv: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kd: Option<f64>,
}

impl GainsSection {
    /// Gains with every term set explicitly
    pub fn from_gains(gains: MotorGains) -> Self {
        Self {
            ks: Some(gains.ks),
            kv: Some(gains.kv),
            kt: Some(gains.kt),
            kp: Some(gains.kp),
            kd: Some(gains.kd),
        }
    }

    /// Overlay the terms set here onto `base`
    pub fn over(&self, base: MotorGains) -> MotorGains {
        MotorGains {
            ks: self.ks.unwrap_or(base.ks),
            kv: self.kv.unwrap_or(base.kv),
            kt: self.kt.unwrap_or(base.kt),
            kp: self.kp.unwrap_or(base.kp),
            kd: self.kd.unwrap_or(base.kd),
        }
    }
}

impl Default for TuningSection {
    fn default() -> Self {
        Self {
            drive_reduction: default_drive_reduction(),
            steer_reduction: default_steer_reduction(),
            steer: default_steer_gains(),
            drive: default_drive_gains(),
        }
    }
}

impl TuningSection {
    pub fn to_tuning_set(&self) -> Result<ModuleTuningSet> {
        ModuleTuningSet::new(
            self.steer.over(constants::STEER_GAINS),
            self.drive.over(constants::DRIVE_GAINS),
            self.drive_reduction.resolve("tuning.drive_reduction")?,
            self.steer_reduction.resolve("tuning.steer_reduction")?,
        )
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingSection {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl RobotProfile {
    /// Load a profile from a TOML file
    ///
    /// # Example
    /// ```no_run
    /// use chakra_drive::config::RobotProfile;
    ///
    /// let profile = RobotProfile::from_file("robot.toml")?;
    /// let swerve = profile.build()?;
    /// # Ok::<(), chakra_drive::Error>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse a profile from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save profile to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Startup context for this profile's robot type
    pub fn context(&self) -> RobotContext {
        RobotContext::new(self.robot_type)
    }

    /// Validate every section and build the drivebase configuration.
    pub fn build(&self) -> Result<SwerveConfig> {
        if self.modules.len() != MODULE_COUNT {
            return Err(Error::config(
                "modules",
                self.modules.len(),
                "exactly 4 modules required",
            ));
        }

        let drivebase = self.drivebase.to_drivebase_config()?;
        let modules: [ModuleHardware; MODULE_COUNT] =
            std::array::from_fn(|i| self.modules[i].to_module_hardware());
        let hardware = ModuleHardwareMap::new(modules, self.gyro_id)?;
        let tuning = self.tuning.to_tuning_set()?;

        Ok(SwerveConfig::new(drivebase, hardware, tuning))
    }
}

impl Default for RobotProfile {
    fn default() -> Self {
        Self {
            robot_type: default_robot_type(),
            gyro_id: default_gyro_id(),
            logging: LoggingSection::default(),
            drivebase: DrivebaseSection::default(),
            modules: default_modules(),
            tuning: TuningSection::default(),
        }
    }
}

// Default value functions
fn default_robot_type() -> RobotType {
    constants::ROBOT_TYPE
}
fn default_gyro_id() -> DeviceId {
    constants::GYRO_ID
}
fn default_wheel_radius() -> f64 {
    inches_to_meters(constants::WHEEL_RADIUS_INCHES)
}
fn default_track_width() -> f64 {
    inches_to_meters(constants::TRACK_WIDTH_INCHES)
}
fn default_bumper_width_x() -> f64 {
    inches_to_meters(constants::BUMPER_WIDTH_X_INCHES)
}
fn default_bumper_width_y() -> f64 {
    inches_to_meters(constants::BUMPER_WIDTH_Y_INCHES)
}
fn default_max_linear_velocity() -> f64 {
    constants::MAX_LINEAR_VELOCITY
}
fn default_max_angular_velocity() -> f64 {
    constants::MAX_ANGULAR_VELOCITY
}
fn default_modules() -> Vec<ModuleSection> {
    constants::MODULES
        .iter()
        .map(|&(drive_id, steer_id, encoder_id, offset_rotations)| ModuleSection {
            drive_id,
            steer_id,
            encoder_id,
            offset_rotations,
        })
        .collect()
}
fn default_drive_reduction() -> ReductionSpec {
    constants::DRIVE_GEARING.into()
}
fn default_steer_reduction() -> ReductionSpec {
    constants::STEER_GEARING.into()
}
fn default_steer_gains() -> GainsSection {
    GainsSection::from_gains(constants::STEER_GAINS)
}
fn default_drive_gains() -> GainsSection {
    GainsSection::from_gains(constants::DRIVE_GAINS)
}
fn default_log_level() -> String {
    "info".to_string()
}
