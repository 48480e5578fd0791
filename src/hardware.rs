//! Per-module hardware identifiers and steering encoder calibration.
//!
//! Each module has a drive motor controller, a steer motor controller and an
//! absolute encoder on the steering pivot, all addressed by bus ID. Entries
//! are stored in [`ModuleCorner`] order.

use crate::error::{ensure_finite, Error, Result};
use crate::geometry::{ModuleCorner, MODULE_COUNT};
use crate::math::{radians_to_rotations, rotations_to_radians, wrap_two_pi};

/// Bus identifier of a motor controller, encoder or gyro.
pub type DeviceId = u32;

/// Hardware addressing for one swerve module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleHardware {
    /// Drive motor controller ID
    pub drive_id: DeviceId,
    /// Steer motor controller ID
    pub steer_id: DeviceId,
    /// Absolute steering encoder ID
    pub encoder_id: DeviceId,
    /// Encoder zero offset in radians.
    ///
    /// Subtracted from the raw encoder reading so that zero points the wheel
    /// forward. May lie outside [0, 2π); see [`Self::normalized_offset`].
    pub absolute_encoder_offset: f64,
}

impl ModuleHardware {
    /// Module with its encoder offset given in rotations.
    pub fn with_offset_rotations(
        drive_id: DeviceId,
        steer_id: DeviceId,
        encoder_id: DeviceId,
        offset_rotations: f64,
    ) -> Self {
        Self {
            drive_id,
            steer_id,
            encoder_id,
            absolute_encoder_offset: rotations_to_radians(offset_rotations),
        }
    }

    /// Offset wrapped into [0, 2π).
    pub fn normalized_offset(&self) -> f64 {
        wrap_two_pi(self.absolute_encoder_offset)
    }

    /// Offset in rotations, unwrapped.
    pub fn offset_rotations(&self) -> f64 {
        radians_to_rotations(self.absolute_encoder_offset)
    }

    /// Steering angle (rad, [0, 2π)) for a raw absolute encoder reading.
    pub fn steer_angle(&self, raw_encoder_radians: f64) -> f64 {
        wrap_two_pi(raw_encoder_radians - self.absolute_encoder_offset)
    }
}

/// Hardware addressing for all four modules plus the gyro.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleHardwareMap {
    modules: [ModuleHardware; MODULE_COUNT],
    gyro_id: DeviceId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdKind {
    Drive,
    Steer,
    Encoder,
}

impl IdKind {
    const ALL: [IdKind; 3] = [IdKind::Drive, IdKind::Steer, IdKind::Encoder];

    fn field(self) -> &'static str {
        match self {
            IdKind::Drive => "drive_id",
            IdKind::Steer => "steer_id",
            IdKind::Encoder => "encoder_id",
        }
    }

    fn of(self, module: &ModuleHardware) -> DeviceId {
        match self {
            IdKind::Drive => module.drive_id,
            IdKind::Steer => module.steer_id,
            IdKind::Encoder => module.encoder_id,
        }
    }
}

/// Every pair of module slots holding the same ID, in scan order.
fn cross_category_overlaps(
    modules: &[ModuleHardware; MODULE_COUNT],
) -> Vec<((DeviceId, usize, IdKind), (usize, IdKind))> {
    let entries: Vec<(DeviceId, usize, IdKind)> = modules
        .iter()
        .enumerate()
        .flat_map(|(i, m)| IdKind::ALL.map(|k| (k.of(m), i, k)))
        .collect();

    let mut overlaps = Vec::new();
    for (n, &(id, i, ka)) in entries.iter().enumerate() {
        for &(other, j, kb) in &entries[n + 1..] {
            if id == other {
                overlaps.push(((id, i, ka), (j, kb)));
            }
        }
    }
    overlaps
}

impl ModuleHardwareMap {
    /// Validate and build the hardware map.
    ///
    /// Fails if two modules share a drive, steer or encoder ID, if the gyro
    /// shares an ID with a motor controller, or if an offset is not finite.
    /// IDs shared across categories on different modules (e.g. a steer ID
    /// equal to another module's encoder ID) are allowed but logged.
    pub fn new(modules: [ModuleHardware; MODULE_COUNT], gyro_id: DeviceId) -> Result<Self> {
        for (i, module) in modules.iter().enumerate() {
            ensure_finite(
                &format!("modules[{i}].absolute_encoder_offset"),
                module.absolute_encoder_offset,
            )?;
        }

        // Within a category every ID must be unique
        for kind in IdKind::ALL {
            for j in 1..MODULE_COUNT {
                let id = kind.of(&modules[j]);
                if let Some(i) = (0..j).find(|&i| kind.of(&modules[i]) == id) {
                    log::error!(
                        "Module {} and module {} share {} {}",
                        i,
                        j,
                        kind.field(),
                        id
                    );
                    return Err(Error::config(
                        format!("modules[{j}].{}", kind.field()),
                        id,
                        "duplicate identifier",
                    ));
                }
            }
        }

        // Gyro and motor controllers share one bus namespace
        for (i, module) in modules.iter().enumerate() {
            for kind in [IdKind::Drive, IdKind::Steer] {
                if kind.of(module) == gyro_id {
                    return Err(Error::config(
                        "gyro_id",
                        gyro_id,
                        "collides with a motor controller identifier",
                    ));
                }
            }
            log::trace!("Module {} hardware: {:?}", i, module);
        }

        // Duplicates left at this point are across categories: legal, but unusual
        for ((id, i, ka), (j, kb)) in cross_category_overlaps(&modules) {
            log::warn!(
                "ID {} used as modules[{}].{} and modules[{}].{}",
                id,
                i,
                ka.field(),
                j,
                kb.field()
            );
        }

        Ok(Self { modules, gyro_id })
    }

    /// Hardware for the module at `index`, `None` past the last module.
    #[inline]
    pub fn hardware_for(&self, index: usize) -> Option<&ModuleHardware> {
        self.modules.get(index)
    }

    /// Hardware for the module at `corner`.
    #[inline]
    pub fn module(&self, corner: ModuleCorner) -> &ModuleHardware {
        &self.modules[corner.index()]
    }

    /// All modules in corner order.
    #[inline]
    pub fn modules(&self) -> &[ModuleHardware; MODULE_COUNT] {
        &self.modules
    }

    #[inline]
    pub fn gyro_id(&self) -> DeviceId {
        self.gyro_id
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModuleCorner, &ModuleHardware)> + '_ {
        ModuleCorner::ALL.into_iter().zip(self.modules.iter())
    }
}
