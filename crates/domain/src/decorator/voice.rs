//! Voice control decorator — frames power commands as assistant requests.

use crate::device::{DeviceHandle, SmartDevice, lock};
use crate::kind::DeviceKind;
use crate::observer::SharedObserver;

/// Assistant used when none is specified.
pub const DEFAULT_ASSISTANT: &str = "Alexa";

/// Adds simulated voice-assistant framing to any device.
///
/// While enabled, `turn_on` / `turn_off` emit the assistant
/// acknowledgment first, then delegate to the wrapped device. Disabling
/// voice control leaves the device fully operable; only the framing is
/// suppressed.
pub struct VoiceControl {
    inner: DeviceHandle,
    name: String,
    kind: DeviceKind,
    assistant: String,
    enabled: bool,
}

impl VoiceControl {
    /// Wrap a device with the default assistant.
    #[must_use]
    pub fn new(inner: DeviceHandle) -> Self {
        Self::with_assistant(inner, DEFAULT_ASSISTANT)
    }

    /// Wrap a device with a specific assistant name.
    pub fn with_assistant(inner: DeviceHandle, assistant: impl Into<String>) -> Self {
        let (name, kind) = {
            let guard = lock(&inner);
            (guard.name().to_owned(), guard.kind())
        };
        let assistant = assistant.into();
        tracing::debug!(device = %name, assistant = %assistant, "voice control attached");
        Self {
            inner,
            name,
            kind,
            assistant,
            enabled: true,
        }
    }

    /// Handle to the wrapped device.
    #[must_use]
    pub fn inner(&self) -> DeviceHandle {
        self.inner.clone()
    }

    /// The configured assistant name.
    #[must_use]
    pub fn assistant(&self) -> &str {
        &self.assistant
    }

    /// Whether voice framing is active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Re-enable voice framing.
    pub fn enable(&mut self) {
        self.enabled = true;
        tracing::debug!(device = %self.name, "voice control enabled");
    }

    /// Suppress voice framing without affecting the device.
    pub fn disable(&mut self) {
        self.enabled = false;
        tracing::debug!(device = %self.name, "voice control disabled");
    }

    fn acknowledge(&self, request: &str) {
        if self.enabled {
            tracing::info!(
                assistant = %self.assistant,
                device = %self.name,
                request,
                "voice command recognized"
            );
        }
    }
}

impl SmartDevice for VoiceControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        self.kind
    }

    fn is_on(&self) -> bool {
        lock(&self.inner).is_on()
    }

    fn turn_on(&mut self) {
        self.acknowledge("turn on");
        lock(&self.inner).turn_on();
    }

    fn turn_off(&mut self) {
        self.acknowledge("turn off");
        lock(&self.inner).turn_off();
    }

    fn status(&self) -> String {
        let voice = if self.enabled {
            self.assistant.as_str()
        } else {
            "disabled"
        };
        format!("{} | Voice: {}", lock(&self.inner).status(), voice)
    }

    fn add_observer(&mut self, observer: SharedObserver) {
        lock(&self.inner).add_observer(observer);
    }

    fn notify_observers(&self) {
        lock(&self.inner).notify_observers();
    }
}
