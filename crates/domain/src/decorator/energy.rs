//! Energy monitoring decorator — session-based kWh accounting.

use crate::device::{DeviceHandle, SmartDevice, lock};
use crate::kind::DeviceKind;
use crate::observer::SharedObserver;
use crate::time::{self, Timestamp, hours_between};

/// Assumed average device power draw, in kilowatts (60 W).
pub const ASSUMED_DRAW_KW: f64 = 0.06;

/// Default electricity cost per kWh.
pub const DEFAULT_RATE_PER_KWH: f64 = 0.12;

/// Energy used by one session at the assumed draw.
#[must_use]
pub fn session_kwh(start: Timestamp, end: Timestamp) -> f64 {
    ASSUMED_DRAW_KW * hours_between(start, end)
}

/// Adds session-based energy accounting to any device.
///
/// A session opens on the first `turn_on` and closes on the next
/// `turn_off`; at most one session is open at a time. Energy accrues
/// only while a session is open, at the assumed fixed draw.
pub struct EnergyMonitor {
    inner: DeviceHandle,
    name: String,
    kind: DeviceKind,
    rate_per_kwh: f64,
    total_kwh: f64,
    session_started: Option<Timestamp>,
}

impl EnergyMonitor {
    /// Wrap a device with the default cost rate.
    #[must_use]
    pub fn new(inner: DeviceHandle) -> Self {
        Self::with_rate(inner, DEFAULT_RATE_PER_KWH)
    }

    /// Wrap a device with a custom cost rate per kWh.
    #[must_use]
    pub fn with_rate(inner: DeviceHandle, rate_per_kwh: f64) -> Self {
        let (name, kind) = {
            let guard = lock(&inner);
            (guard.name().to_owned(), guard.kind())
        };
        tracing::debug!(device = %name, rate_per_kwh, "energy monitoring attached");
        Self {
            inner,
            name,
            kind,
            rate_per_kwh,
            total_kwh: 0.0,
            session_started: None,
        }
    }

    /// Handle to the wrapped device.
    #[must_use]
    pub fn inner(&self) -> DeviceHandle {
        self.inner.clone()
    }

    /// Energy accrued over all closed sessions, in kWh.
    #[must_use]
    pub fn total_kwh(&self) -> f64 {
        self.total_kwh
    }

    /// Accrued cost: total kWh times the configured rate.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.total_kwh * self.rate_per_kwh
    }

    /// The configured cost rate per kWh.
    #[must_use]
    pub fn rate_per_kwh(&self) -> f64 {
        self.rate_per_kwh
    }

    /// Change the cost rate used for future [`cost`](Self::cost) queries.
    pub fn set_rate_per_kwh(&mut self, rate: f64) {
        self.rate_per_kwh = rate;
    }

    /// Whether a session is currently open.
    #[must_use]
    pub fn has_open_session(&self) -> bool {
        self.session_started.is_some()
    }

    /// Drop all accrued energy and close any open session without
    /// accounting for it.
    pub fn reset_tracking(&mut self) {
        self.total_kwh = 0.0;
        self.session_started = None;
        tracing::debug!(device = %self.name, "energy tracking reset");
    }

    fn open_session(&mut self) {
        if self.session_started.is_none() {
            self.session_started = Some(time::now());
            tracing::debug!(device = %self.name, "energy session opened");
        }
    }

    fn close_session(&mut self) {
        if let Some(start) = self.session_started.take() {
            let used = session_kwh(start, time::now());
            self.total_kwh += used;
            tracing::debug!(device = %self.name, session_kwh = used, "energy session closed");
        }
    }
}

impl SmartDevice for EnergyMonitor {
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
        lock(&self.inner).turn_on();
        self.open_session();
    }

    fn turn_off(&mut self) {
        lock(&self.inner).turn_off();
        self.close_session();
    }

    fn status(&self) -> String {
        format!(
            "{} | Energy: {:.3} kWh | Cost: ${:.2}",
            lock(&self.inner).status(),
            self.total_kwh,
            self.cost()
        )
    }

    fn add_observer(&mut self, observer: SharedObserver) {
        lock(&self.inner).add_observer(observer);
    }

    fn notify_observers(&self) {
        lock(&self.inner).notify_observers();
    }
}
