//! The [`ControlStrategy`] trait — a swappable control policy.

use domo_domain::device::DeviceHandle;

/// A pluggable rule set applied to the whole device registry on demand.
///
/// The controller holds at most one strategy at a time and invokes it
/// with a snapshot of the registered devices. A strategy is stateless
/// across activations, with the exception of policies that own a
/// background task.
pub trait ControlStrategy: Send {
    /// Short identifier, e.g. `"manual"`.
    fn name(&self) -> &'static str;

    /// One-line summary of what activating the policy does.
    fn description(&self) -> &'static str;

    /// Inspect and mutate the device set according to the policy's rule.
    fn control_devices(&mut self, devices: &[DeviceHandle]);
}
