//! Robot type selection and runtime mode resolution.
//!
//! The robot type is chosen once when the process starts and is carried in a
//! [`RobotContext`] that nothing can mutate afterwards. The runtime [`Mode`] is
//! never stored: it is resolved from the robot type and the hardware-presence
//! signal every time it is asked for.
//!
//! | Robot type | Hardware present | Mode |
//! |------------|------------------|------|
//! | Competition | yes | Real |
//! | Competition | no | Replay |
//! | Development | yes | Real |
//! | Development | no | Replay |
//! | Simulation | either | Simulated |

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable marking the process as running on robot hardware.
pub const HARDWARE_ENV_VAR: &str = "CHAKRA_HARDWARE";

/// Which robot this build is deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RobotType {
    /// Competition robot
    #[serde(alias = "comp")]
    Competition,
    /// Development (practice) robot
    #[serde(alias = "dev")]
    Development,
    /// Physics simulation, no robot at all
    #[serde(alias = "sim")]
    Simulation,
}

impl RobotType {
    /// All robot types.
    pub const ALL: [RobotType; 3] = [
        RobotType::Competition,
        RobotType::Development,
        RobotType::Simulation,
    ];

    /// Lowercase name used in profiles and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            RobotType::Competition => "competition",
            RobotType::Development => "development",
            RobotType::Simulation => "simulation",
        }
    }
}

impl fmt::Display for RobotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for RobotType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "competition" | "comp" => Ok(RobotType::Competition),
            "development" | "dev" => Ok(RobotType::Development),
            "simulation" | "sim" => Ok(RobotType::Simulation),
            _ => Err(Error::UnknownRobotType(s.to_string())),
        }
    }
}

/// Runtime mode consumed by the logging/replay layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Running on a real robot.
    Real,
    /// Running a physics simulator.
    Simulated,
    /// Replaying from a log file. No actuation, telemetry comes from the log.
    Replay,
}

impl Mode {
    /// True when live sensors and actuators may be touched.
    pub fn is_live_hardware(self) -> bool {
        self == Mode::Real
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Mode::Real => "real",
            Mode::Simulated => "simulated",
            Mode::Replay => "replay",
        })
    }
}

/// Resolve the runtime mode. Total and pure.
#[inline]
pub fn resolve_mode(robot_type: RobotType, hardware_present: bool) -> Mode {
    match robot_type {
        RobotType::Competition | RobotType::Development => {
            if hardware_present {
                Mode::Real
            } else {
                Mode::Replay
            }
        }
        RobotType::Simulation => Mode::Simulated,
    }
}

/// Read the hardware-presence signal from the environment.
///
/// `1`, `true` and `yes` (any case) mean present; anything else, or an unset
/// variable, means not present.
pub fn hardware_present_from_env() -> bool {
    std::env::var(HARDWARE_ENV_VAR)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Immutable startup context.
///
/// Built once in `main` and handed by reference to everything that needs to
/// know which robot it is running on. There is no setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotContext {
    robot_type: RobotType,
}

impl RobotContext {
    /// Create the context for `robot_type`.
    pub const fn new(robot_type: RobotType) -> Self {
        Self { robot_type }
    }

    /// Robot type selected at startup.
    pub fn robot_type(&self) -> RobotType {
        self.robot_type
    }

    /// Mode for an explicit hardware-presence signal.
    pub fn mode(&self, hardware_present: bool) -> Mode {
        resolve_mode(self.robot_type, hardware_present)
    }

    /// Mode using the environment's hardware-presence signal, read now.
    pub fn current_mode(&self) -> Mode {
        self.mode(hardware_present_from_env())
    }
}

impl Default for RobotContext {
    fn default() -> Self {
        Self::new(crate::constants::ROBOT_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_always_simulated() {
        assert_eq!(resolve_mode(RobotType::Simulation, true), Mode::Simulated);
        assert_eq!(resolve_mode(RobotType::Simulation, false), Mode::Simulated);
    }

    #[test]
    fn test_physical_robots() {
        assert_eq!(resolve_mode(RobotType::Competition, true), Mode::Real);
        assert_eq!(resolve_mode(RobotType::Competition, false), Mode::Replay);
        assert_eq!(resolve_mode(RobotType::Development, true), Mode::Real);
        assert_eq!(resolve_mode(RobotType::Development, false), Mode::Replay);
    }

    #[test]
    fn test_only_real_is_live() {
        for robot_type in RobotType::ALL {
            for present in [true, false] {
                let mode = resolve_mode(robot_type, present);
                assert_eq!(mode.is_live_hardware(), mode == Mode::Real);
            }
        }
    }

    #[test]
    fn test_context_reevaluates_each_call() {
        let ctx = RobotContext::new(RobotType::Development);
        assert_eq!(ctx.mode(true), Mode::Real);
        assert_eq!(ctx.mode(false), Mode::Replay);
        assert_eq!(ctx.mode(true), Mode::Real);
        assert_eq!(ctx.robot_type(), RobotType::Development);
    }

    #[test]
    fn test_robot_type_from_str() {
        assert_eq!("comp".parse::<RobotType>().unwrap(), RobotType::Competition);
        assert_eq!("DEV".parse::<RobotType>().unwrap(), RobotType::Development);
        assert_eq!(" simulation ".parse::<RobotType>().unwrap(), RobotType::Simulation);
        assert!(matches!(
            "tank".parse::<RobotType>(),
            Err(Error::UnknownRobotType(_))
        ));
    }

    #[test]
    fn test_robot_type_name_roundtrip() {
        for robot_type in RobotType::ALL {
            assert_eq!(robot_type.name().parse::<RobotType>().unwrap(), robot_type);
        }
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("no"));
    }
}
