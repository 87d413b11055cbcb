//! Concrete device kinds.

pub mod fan;
pub mod light;
pub mod speaker;
pub mod thermostat;

pub use fan::{FanAdapter, LegacyFan};
pub use light::Light;
pub use speaker::Speaker;
pub use thermostat::{Thermostat, ThermostatMode};
