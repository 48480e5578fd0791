//! Gear reduction catalog for the SDS MK4i swerve module.
//!
//! A reduction is motor rotations per output rotation. Drive ratios are the
//! product of the three gear stages between motor and wheel; the steer ratio
//! is a single compound stage. All arithmetic is floating point.
//!
//! Adding a mechanism means adding a variant and its stages here, nothing else.

use std::fmt;

/// Named mechanism reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GearReduction {
    /// Drive, L1 gearing (~8.14:1)
    Mk4iL1,
    /// Drive, L2 gearing (~6.75:1)
    Mk4iL2,
    /// Drive, L3 gearing (~6.12:1)
    Mk4iL3,
    /// Steering pivot (150/7:1)
    Steer,
}

impl GearReduction {
    /// Every catalog entry.
    pub const ALL: [GearReduction; 4] = [
        GearReduction::Mk4iL1,
        GearReduction::Mk4iL2,
        GearReduction::Mk4iL3,
        GearReduction::Steer,
    ];

    /// Motor rotations per output rotation.
    pub fn ratio(self) -> f64 {
        match self {
            GearReduction::Mk4iL1 => (50.0 / 14.0) * (19.0 / 25.0) * (45.0 / 15.0),
            GearReduction::Mk4iL2 => (50.0 / 14.0) * (17.0 / 27.0) * (45.0 / 15.0),
            GearReduction::Mk4iL3 => (50.0 / 14.0) * (16.0 / 28.0) * (45.0 / 15.0),
            GearReduction::Steer => 150.0 / 7.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GearReduction::Mk4iL1 => "mk4i_l1",
            GearReduction::Mk4iL2 => "mk4i_l2",
            GearReduction::Mk4iL3 => "mk4i_l3",
            GearReduction::Steer => "mk4i_steer",
        }
    }

    /// Look up an entry by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl fmt::Display for GearReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4}:1)", self.name(), self.ratio())
    }
}
