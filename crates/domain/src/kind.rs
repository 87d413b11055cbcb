//! Device kind — the closed set of device categories the kernel knows.

use serde::{Deserialize, Serialize};

/// Category of a controllable device.
///
/// Control policies branch on kind through the capability queries on
/// [`SmartDevice`](crate::device::SmartDevice) rather than matching on
/// this enum directly, so adding a kind does not ripple through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Light,
    Thermostat,
    Speaker,
    Fan,
    Group,
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Thermostat => f.write_str("thermostat"),
            Self::Speaker => f.write_str("speaker"),
            Self::Fan => f.write_str("fan"),
            Self::Group => f.write_str("group"),
        }
    }
}
