//! Capabilities — narrow traits for the kind-specific side of a device.
//!
//! Policies and commands never downcast to a concrete device type.
//! Instead they ask a [`SmartDevice`](crate::device::SmartDevice) for a
//! capability (`as_dimmable_mut`, `as_climate_mut`, …) and get `None`
//! when the device cannot do the operation.

use crate::error::ValidationError;

/// A device whose light output can be adjusted (0–100 percent).
pub trait Dimmable {
    /// Current brightness in percent.
    fn brightness(&self) -> u8;

    /// Set the brightness. Any value above zero also powers the device on;
    /// zero leaves it off.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Brightness`] when `brightness` exceeds
    /// 100; state is unchanged.
    fn set_brightness(&mut self, brightness: u8) -> Result<(), ValidationError>;
}

/// A device that regulates temperature toward a target.
pub trait ClimateControlled {
    /// The measured room temperature in °F.
    fn current_temp(&self) -> f64;

    /// The configured target temperature in °F.
    fn target_temp(&self) -> f64;

    /// Set the target temperature.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TargetTemp`] when `target` is outside
    /// 50–90 °F; state is unchanged.
    fn set_target_temp(&mut self, target: f64) -> Result<(), ValidationError>;
}

/// A device that plays audio content.
pub trait AudioPlayer {
    /// Current volume in percent.
    fn volume(&self) -> u8;

    /// Set the volume. Any value above zero also powers the device on.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Volume`] when `volume` exceeds 100;
    /// state is unchanged.
    fn set_volume(&mut self, volume: u8) -> Result<(), ValidationError>;

    /// Start playing the given content, powering the device on if needed.
    fn play(&mut self, content: &str);

    /// Stop playback, leaving the device powered.
    fn stop(&mut self);

    /// What is currently playing, if anything.
    fn now_playing(&self) -> Option<&str>;
}

/// A device with a small discrete speed range (fans: 0–3).
pub trait SpeedControlled {
    /// Current speed step.
    fn speed(&self) -> u8;

    /// Set the speed step. Out-of-range values are rejected and logged;
    /// returns `false` and leaves state unchanged.
    fn set_speed(&mut self, speed: u8) -> bool;
}
