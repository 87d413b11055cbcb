//! The [`Controller`] — device registry, command history, and the active
//! control policy.
//!
//! ## Responsibilities
//! - Own the insertion-ordered device registry and subscribe its change
//!   log to every added device
//! - Execute commands and keep linear undo/redo history (a new command
//!   clears the redo stack)
//! - Hold and activate the current [`ControlStrategy`]
//!
//! There is no global instance: embedders construct a controller and
//! pass it to their collaborators.

use std::sync::Arc;

use domo_domain::device::{DeviceHandle, lock, same_device};
use domo_domain::error::DomoError;
use domo_domain::observer::ChangeLog;

use crate::command::Command;
use crate::strategy::ControlStrategy;

/// Central coordination point for a set of devices.
#[derive(Default)]
pub struct Controller {
    devices: Vec<DeviceHandle>,
    done: Vec<Box<dyn Command>>,
    undone: Vec<Box<dyn Command>>,
    strategy: Option<Box<dyn ControlStrategy>>,
    change_log: Arc<ChangeLog>,
}

impl Controller {
    /// Create a controller with no devices, empty history, and no
    /// active strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device and subscribe the controller's change log to
    /// it, so every subsequent mutation is recorded without polling.
    pub fn add_device(&mut self, device: DeviceHandle) {
        {
            let mut guard = lock(&device);
            tracing::info!(device = %guard.name(), kind = %guard.kind(), "device registered");
            guard.add_observer(self.change_log.clone());
        }
        self.devices.push(device);
    }

    /// Unregister a device. Returns `false` when it was not registered.
    /// The device itself is untouched; other holders of the handle keep
    /// using it.
    pub fn remove_device(&mut self, device: &DeviceHandle) -> bool {
        let Some(index) = self.devices.iter().position(|d| same_device(d, device)) else {
            return false;
        };
        let removed = self.devices.remove(index);
        tracing::info!(device = %lock(&removed).name(), "device unregistered");
        true
    }

    /// Look up a device by name, case-insensitively. First match wins
    /// when names collide.
    #[must_use]
    pub fn get_device(&self, name: &str) -> Option<DeviceHandle> {
        self.devices
            .iter()
            .find(|d| lock(d).name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Snapshot copy of the registry, in registration order.
    #[must_use]
    pub fn all_devices(&self) -> Vec<DeviceHandle> {
        self.devices.clone()
    }

    /// Number of registered devices.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// The change log recording every observed device mutation.
    #[must_use]
    pub fn change_log(&self) -> Arc<ChangeLog> {
        self.change_log.clone()
    }

    /// Turn every registered device on, in registration order. Not
    /// logged to history; not undoable.
    pub fn turn_on_all(&self) {
        tracing::info!(devices = self.devices.len(), "turning all devices on");
        for device in &self.devices {
            lock(device).turn_on();
        }
    }

    /// Turn every registered device off, in registration order. Not
    /// logged to history; not undoable.
    pub fn turn_off_all(&self) {
        tracing::info!(devices = self.devices.len(), "turning all devices off");
        for device in &self.devices {
            lock(device).turn_off();
        }
    }

    /// Execute a command and log it. On success the command lands on the
    /// undo stack and any pending redo history is discarded; on failure
    /// history is untouched.
    ///
    /// # Errors
    ///
    /// Propagates the command's own failure, leaving the target and the
    /// history unchanged.
    pub fn execute_command(&mut self, mut command: Box<dyn Command>) -> Result<(), DomoError> {
        tracing::info!(command = %command.description(), "executing command");
        command.execute()?;
        self.done.push(command);
        self.undone.clear();
        Ok(())
    }

    /// Undo the most recent command. Returns `false` on empty history.
    pub fn undo_last_command(&mut self) -> bool {
        let Some(mut command) = self.done.pop() else {
            tracing::info!("nothing to undo");
            return false;
        };
        tracing::info!(command = %command.description(), "undoing command");
        if let Err(err) = command.undo() {
            tracing::warn!(%err, command = %command.description(), "undo failed");
            self.done.push(command);
            return false;
        }
        self.undone.push(command);
        true
    }

    /// Re-apply the most recently undone command. Returns `false` when
    /// there is nothing to redo.
    pub fn redo_last_command(&mut self) -> bool {
        let Some(mut command) = self.undone.pop() else {
            tracing::info!("nothing to redo");
            return false;
        };
        tracing::info!(command = %command.description(), "redoing command");
        if let Err(err) = command.execute() {
            tracing::warn!(%err, command = %command.description(), "redo failed");
            self.undone.push(command);
            return false;
        }
        self.done.push(command);
        true
    }

    /// Number of commands available to undo.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.done.len()
    }

    /// Discard both the undo and redo stacks. Device state is untouched.
    pub fn clear_history(&mut self) {
        self.done.clear();
        self.undone.clear();
        tracing::info!("command history cleared");
    }

    /// Install (or replace) the active control strategy.
    pub fn set_control_strategy(&mut self, strategy: Box<dyn ControlStrategy>) {
        tracing::info!(strategy = strategy.name(), "control strategy set");
        self.strategy = Some(strategy);
    }

    /// Name of the active strategy, if one is set.
    #[must_use]
    pub fn strategy_name(&self) -> Option<&'static str> {
        self.strategy.as_deref().map(ControlStrategy::name)
    }

    /// Run the active strategy over the registered devices. Returns
    /// `false` (after a warning) when no strategy is set.
    pub fn activate_control_strategy(&mut self) -> bool {
        let Some(strategy) = self.strategy.as_mut() else {
            tracing::warn!("no control strategy set");
            return false;
        };
        tracing::info!(strategy = strategy.name(), "activating control strategy");
        strategy.control_devices(&self.devices);
        true
    }
}
