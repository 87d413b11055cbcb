//! Concrete commands — the reversible operations the controller logs.

pub mod adjust_brightness;
pub mod adjust_temperature;
pub mod turn_off;
pub mod turn_on;

pub use adjust_brightness::AdjustBrightness;
pub use adjust_temperature::AdjustTemperature;
pub use turn_off::TurnOff;
pub use turn_on::TurnOn;
