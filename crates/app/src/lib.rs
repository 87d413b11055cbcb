//! # domo-app
//!
//! Application layer for the domo control kernel.
//!
//! ## Responsibilities
//! - Own the [`controller::Controller`]: device registry, change log
//!   subscription, and linear undo/redo history
//! - Define the reversible [`command::Command`]s ([`commands`])
//! - Define the swappable control policies ([`strategy`],
//!   [`strategies`]): manual, time-scheduled, and sensor-driven
//!   automation with its cancellable background loop
//!
//! ## Dependency rule
//! Builds on `domo-domain` only. All async code in the workspace lives
//! here, in the automated policy's background loop.

pub mod command;
pub mod commands;
pub mod controller;
pub mod strategies;
pub mod strategy;

pub use command::Command;
pub use controller::Controller;
pub use strategy::ControlStrategy;
