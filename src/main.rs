//! ChakraDrive - startup check for the swerve drivebase configuration
//!
//! Builds the drivebase configuration (compiled-in reference robot, or a TOML
//! profile), validates it, resolves the runtime mode and logs a summary.
//! Exits non-zero if the configuration is invalid, so a robot with bad
//! geometry or ambiguous hardware addressing never starts.
//!
//! ## Usage
//!
//! ```bash
//! chakra-drive                       # compiled-in reference robot
//! chakra-drive robot.toml            # profile (positional)
//! chakra-drive --config robot.toml   # profile (flag)
//! chakra-drive --robot sim           # override robot type
//! chakra-drive --real                # force hardware present
//! ```
//!
//! Hardware presence defaults to the `CHAKRA_HARDWARE` environment variable.

use chakra_drive::mode::hardware_present_from_env;
use chakra_drive::{Error, Result, RobotContext, RobotProfile, RobotType};
use std::env;

#[derive(Debug, Default)]
struct Args {
    config_path: Option<String>,
    robot_type: Option<RobotType>,
    hardware_present: Option<bool>,
}

/// Parse command line arguments (without the program name).
///
/// Supports:
/// - `chakra-drive <path>` (positional)
/// - `chakra-drive --config <path>` / `-c <path>`
/// - `--robot <type>`, `--real`, `--no-real`
///
/// A flag missing its value, an unknown flag or a second positional path is
/// an error.
fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter.next().ok_or_else(|| missing_value(arg))?;
                parsed.config_path = Some(path.clone());
            }
            "--robot" | "-r" => {
                let name = iter.next().ok_or_else(|| missing_value(arg))?;
                parsed.robot_type = Some(name.parse()?);
            }
            "--real" => parsed.hardware_present = Some(true),
            "--no-real" => parsed.hardware_present = Some(false),
            path if !path.starts_with('-') && parsed.config_path.is_none() => {
                parsed.config_path = Some(path.to_string());
            }
            other => {
                return Err(Error::InvalidArgument(format!(
                    "unexpected argument '{}'",
                    other
                )))
            }
        }
    }

    Ok(parsed)
}

fn missing_value(flag: &str) -> Error {
    Error::InvalidArgument(format!("{} requires a value", flag))
}

fn main() -> Result<()> {
    let argv: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&argv)?;

    let mut profile = match &args.config_path {
        Some(path) => RobotProfile::from_file(path)?,
        None => RobotProfile::default(),
    };
    if let Some(robot_type) = args.robot_type {
        profile.robot_type = robot_type;
    }

    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&profile.logging.level))
        .init();

    log::info!("ChakraDrive v{} starting...", env!("CARGO_PKG_VERSION"));
    match &args.config_path {
        Some(path) => log::info!("Using profile: {}", path),
        None => log::info!("Using compiled-in reference robot"),
    }

    // Robot type is fixed from here on
    let ctx: RobotContext = profile.context();

    let swerve = profile.build().inspect_err(|e| {
        log::error!("Invalid drivebase configuration: {}", e);
    })?;

    let hardware_present = args
        .hardware_present
        .unwrap_or_else(hardware_present_from_env);
    let mode = ctx.mode(hardware_present);
    log::info!(
        "Robot: {} (hardware present: {}) -> mode {}",
        ctx.robot_type(),
        hardware_present,
        mode
    );
    if !mode.is_live_hardware() {
        log::info!("Live sensor reads and actuation disabled in {} mode", mode);
    }

    for (corner, module) in swerve.hardware().iter() {
        let p = swerve.placement(corner);
        log::info!(
            "  {} ({:+.4}, {:+.4}) m  drive {:>2}  steer {:>2}  encoder {:>2}",
            corner.short_name(),
            p.x,
            p.y,
            module.drive_id,
            module.steer_id,
            module.encoder_id
        );
    }
    log::info!(
        "Max drive motor speed: {:.1} rot/s",
        swerve.max_drive_motor_rps()
    );

    Ok(())
}
