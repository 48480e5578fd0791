//! ChakraDrive - Swerve drivebase configuration
//!
//! Static configuration for a four-wheel swerve robot: which robot this build
//! runs on, the drivebase geometry, where each module sits, how each module is
//! addressed on the bus, and how its control loops are tuned.
//!
//! Everything here is built once at startup and is read-only afterwards. The
//! kinematics transform, control loop, simulator and replay layer that consume
//! it live elsewhere.
//!
//! ## Module order
//!
//! Every module-indexed array uses the same order, see [`ModuleCorner`]:
//!
//! | Index | Module | Position |
//! |-------|--------|----------|
//! | 0 | front-left | (+t/2, +t/2) |
//! | 1 | front-right | (+t/2, -t/2) |
//! | 2 | back-left | (-t/2, +t/2) |
//! | 3 | back-right | (-t/2, -t/2) |
//!
//! with `t` the track width, X forward and Y left.
//!
//! ## Quick Start
//!
//! ```rust
//! use chakra_drive::{Mode, RobotContext, RobotType, SwerveConfig};
//!
//! let swerve = SwerveConfig::reference()?;
//! let placements = swerve.placements();
//! assert!(placements[0].x > 0.0 && placements[0].y > 0.0);
//!
//! let ctx = RobotContext::new(RobotType::Simulation);
//! assert_eq!(ctx.mode(false), Mode::Simulated);
//! # Ok::<(), chakra_drive::Error>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod hardware;
pub mod math;
pub mod mode;
pub mod reductions;
pub mod swerve;
pub mod tuning;

// Re-export commonly used types
pub use config::RobotProfile;
pub use error::{Error, Result};
pub use geometry::{derive_placements, DrivebaseConfig, ModuleCorner, Point2D, MODULE_COUNT};
pub use hardware::{DeviceId, ModuleHardware, ModuleHardwareMap};
pub use mode::{resolve_mode, Mode, RobotContext, RobotType};
pub use reductions::GearReduction;
pub use swerve::SwerveConfig;
pub use tuning::{ModuleTuningSet, MotorGains};
