//! # domo-domain
//!
//! Device model for the domo control kernel.
//!
//! ## Responsibilities
//! - Define the [`device::SmartDevice`] trait and the shared
//!   [`device::DeviceHandle`] used everywhere a device is referenced
//! - Define the concrete device kinds (lights, thermostats, speakers,
//!   and the adapted legacy fan)
//! - Define **capabilities** ([`capability`]) — narrow traits such as
//!   `Dimmable` that replace runtime type dispatch
//! - Define **observers** ([`observer`]) — synchronous subscribers
//!   notified after every state-mutating operation
//! - Define **groups** ([`group`]) — ordered composites controlled as one
//! - Define **decorators** ([`decorator`]) — energy accounting and voice
//!   framing layered around any device
//! - Contain all range validation and invariant enforcement
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and no IO or async code.
//! The application layer (`domo-app`) builds on it; never the reverse.

pub mod capability;
pub mod decorator;
pub mod device;
pub mod devices;
pub mod error;
pub mod factory;
pub mod group;
pub mod kind;
pub mod observer;
pub mod time;
