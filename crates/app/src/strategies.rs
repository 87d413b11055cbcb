//! Control policies — the concrete [`ControlStrategy`](crate::strategy::ControlStrategy) implementations.

pub mod automated;
pub mod manual;
pub mod scheduled;

pub use automated::AutomatedControl;
pub use manual::ManualControl;
pub use scheduled::ScheduledControl;
