//! Decorators — cross-cutting behavior layered around a device.
//!
//! A decorator wraps exactly one [`DeviceHandle`](crate::device::DeviceHandle)
//! (which may itself be a decorator or a group) and forwards the core
//! operations to it. Decorators compose by nesting; the outermost
//! decorator's side effects fire before the call is delegated inward.

pub mod energy;
pub mod voice;

pub use energy::EnergyMonitor;
pub use voice::VoiceControl;
