//! Error types shared across the workspace.
//!
//! Nothing here is fatal: validation failures leave the target device
//! unchanged and the caller may retry with a corrected value.

/// Top-level error for the domo kernel.
#[derive(Debug, thiserror::Error)]
pub enum DomoError {
    /// An input value was outside its allowed range. State is unchanged.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The device factory was asked for a type tag it does not know.
    #[error("unknown device type")]
    UnknownDeviceType(#[from] UnknownDeviceTypeError),

    /// An operation targeted a device that lacks the required capability.
    #[error("device {device} does not support {capability}")]
    Unsupported {
        /// Name of the device that rejected the operation.
        device: String,
        /// The missing capability (e.g. `"brightness"`).
        capability: &'static str,
    },
}

/// An out-of-range input value. Recoverable; state is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Brightness must be within 0–100 percent.
    #[error("brightness must be between 0 and 100, got {value}")]
    Brightness {
        /// The rejected value.
        value: u8,
    },

    /// Volume must be within 0–100 percent.
    #[error("volume must be between 0 and 100, got {value}")]
    Volume {
        /// The rejected value.
        value: u8,
    },

    /// Target temperature must be within 50–90 °F.
    #[error("target temperature must be between 50 and 90 °F, got {value}")]
    TargetTemp {
        /// The rejected value.
        value: f64,
    },
}

/// The factory received a type tag it cannot build.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device type: {kind} (valid types: light, thermostat, speaker)")]
pub struct UnknownDeviceTypeError {
    /// The unrecognized type tag, as received.
    pub kind: String,
}
