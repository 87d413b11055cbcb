//! Automated policy — simulated-sensor rules plus a cancellable
//! background loop that toggles a random device at a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, Timelike};
use domo_domain::device::{DeviceHandle, lock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::strategy::ControlStrategy;

/// How long the background loop sleeps between toggles.
pub const TOGGLE_INTERVAL: Duration = Duration::from_secs(5);

/// How long [`AutomatedControl::stop_random_automation`] waits for the
/// loop to exit before aborting it.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(2);

const LOW_OCCUPANCY: u8 = 20;
const HIGH_OCCUPANCY: u8 = 80;
const COMFORT_BRIGHTNESS: u8 = 80;
const COMFORT_TARGET: f64 = 72.0;
const NIGHT_START_HOUR: u32 = 22;
const NIGHT_END_HOUR: u32 = 6;
const ECO_BRIGHTNESS: u8 = 30;
const ECO_TARGET: f64 = 68.0;
const PREDICTIVE_LIMIT: usize = 2;

/// Invoked after the background loop toggles a device, with the device
/// name and its new power state.
pub type ToggleCallback = Arc<dyn Fn(&str, bool) + Send + Sync>;

/// One snapshot of the simulated sensors.
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    /// Occupancy level, 0–100.
    pub occupancy: u8,
    /// Outside temperature in °F.
    pub outside_temp: i32,
}

impl Environment {
    /// Draw a fresh sensor snapshot.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self {
            occupancy: rng.random_range(0..=100),
            outside_temp: rng.random_range(60..100),
        }
    }
}

/// Run one automated sweep over the devices.
///
/// Three independent rules apply: low occupancy powers off a random
/// subset of running devices, high occupancy optimizes for comfort, and
/// late or early hours shift everything into energy saving. A bounded
/// predictive pass then considers at most two devices without touching
/// them. Individual adjustment failures are logged and skipped.
pub fn apply_rules<R: Rng>(rng: &mut R, env: Environment, hour: u32, devices: &[DeviceHandle]) {
    if env.occupancy < LOW_OCCUPANCY {
        for device in devices {
            let mut guard = lock(device);
            if guard.is_on() && rng.random_bool(0.5) {
                guard.turn_off();
                tracing::info!(device = %guard.name(), "low occupancy, powered off");
            }
        }
    } else if env.occupancy > HIGH_OCCUPANCY {
        for device in devices {
            let mut guard = lock(device);
            if let Some(dimmable) = guard.as_dimmable_mut() {
                if let Err(err) = dimmable.set_brightness(COMFORT_BRIGHTNESS) {
                    tracing::warn!(%err, device = %guard.name(), "comfort brightness skipped");
                }
                continue;
            }
            if guard.as_climate_mut().is_some() {
                guard.turn_on();
                if let Some(climate) = guard.as_climate_mut()
                    && let Err(err) = climate.set_target_temp(COMFORT_TARGET)
                {
                    tracing::warn!(%err, device = %guard.name(), "comfort temperature skipped");
                }
            }
        }
    }

    if hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR {
        for device in devices {
            let mut guard = lock(device);
            if let Some(dimmable) = guard.as_dimmable_mut() {
                if dimmable.brightness() > ECO_BRIGHTNESS
                    && let Err(err) = dimmable.set_brightness(ECO_BRIGHTNESS)
                {
                    tracing::warn!(%err, device = %guard.name(), "eco brightness skipped");
                }
                continue;
            }
            if let Some(climate) = guard.as_climate_mut()
                && let Err(err) = climate.set_target_temp(ECO_TARGET)
            {
                tracing::warn!(%err, device = %guard.name(), "eco temperature skipped");
            }
        }
    }

    for device in devices.iter().take(PREDICTIVE_LIMIT) {
        let guard = lock(device);
        tracing::info!(
            device = %guard.name(),
            outside_temp = env.outside_temp,
            "predictive pass considered device"
        );
    }
}

fn toggle_random_device<R: Rng>(
    rng: &mut R,
    devices: &[DeviceHandle],
    on_toggle: Option<&ToggleCallback>,
) {
    let index = rng.random_range(0..devices.len());
    let (name, now_on) = {
        let mut guard = lock(&devices[index]);
        if guard.is_on() {
            guard.turn_off();
        } else {
            guard.turn_on();
        }
        (guard.name().to_owned(), guard.is_on())
    };
    tracing::info!(device = %name, on = now_on, "automation toggled device");
    if let Some(callback) = on_toggle {
        callback(&name, now_on);
    }
}

/// Policy that reacts to simulated sensors and can additionally run a
/// background random-toggle loop.
///
/// At most one loop runs per instance; starting is idempotent-guarded
/// and stopping waits (bounded) for the task to exit, so no toggle is in
/// flight once [`stop_random_automation`](Self::stop_random_automation)
/// returns.
pub struct AutomatedControl {
    task: Option<JoinHandle<()>>,
    stop_tx: Option<watch::Sender<bool>>,
    on_toggle: Option<ToggleCallback>,
    interval: Duration,
}

impl Default for AutomatedControl {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomatedControl {
    /// Create the policy with the default toggle interval.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(TOGGLE_INTERVAL)
    }

    /// Create the policy with a custom toggle interval.
    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            task: None,
            stop_tx: None,
            on_toggle: None,
            interval,
        }
    }

    /// Register a callback invoked after every background toggle.
    pub fn set_toggle_callback(&mut self, callback: ToggleCallback) {
        self.on_toggle = Some(callback);
    }

    /// Whether the background loop is currently alive.
    #[must_use]
    pub fn is_automation_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start the background random-toggle loop over the given devices.
    ///
    /// Returns `false` without starting anything when a loop is already
    /// running on this instance or when there are no devices to toggle.
    pub fn start_random_automation(&mut self, devices: Vec<DeviceHandle>) -> bool {
        if self.is_automation_running() {
            tracing::warn!("random automation already running");
            return false;
        }
        if devices.is_empty() {
            tracing::warn!("no devices to automate");
            return false;
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let callback = self.on_toggle.clone();
        let interval = self.interval;
        let task = tokio::spawn(async move {
            let mut rng = StdRng::from_os_rng();
            loop {
                tokio::select! {
                    _ = stop_rx.changed() => break,
                    () = tokio::time::sleep(interval) => {
                        toggle_random_device(&mut rng, &devices, callback.as_ref());
                    }
                }
            }
            tracing::debug!("random automation loop exited");
        });

        tracing::info!(interval_secs = interval.as_secs(), "random automation started");
        self.stop_tx = Some(stop_tx);
        self.task = Some(task);
        true
    }

    /// Signal the background loop to stop and wait for it to exit.
    ///
    /// Waits at most [`STOP_TIMEOUT`]; a loop that fails to exit in time
    /// is aborted. Returns `false` when no loop was running. Once this
    /// returns, no further toggle is in flight.
    pub async fn stop_random_automation(&mut self) -> bool {
        let (Some(stop_tx), Some(task)) = (self.stop_tx.take(), self.task.take()) else {
            tracing::info!("random automation not running");
            return false;
        };

        // Even if every receiver is gone the loop is already dead, so a
        // send failure is not an error here.
        let _ = stop_tx.send(true);

        let abort = task.abort_handle();
        match tokio::time::timeout(STOP_TIMEOUT, task).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::warn!(%err, "random automation loop failed"),
            Err(_) => {
                tracing::warn!("random automation loop did not stop in time, aborting");
                abort.abort();
            }
        }
        tracing::info!("random automation stopped");
        true
    }
}

impl ControlStrategy for AutomatedControl {
    fn name(&self) -> &'static str {
        "automated"
    }

    fn description(&self) -> &'static str {
        "adjusts devices from simulated occupancy and temperature readings"
    }

    fn control_devices(&mut self, devices: &[DeviceHandle]) {
        let mut rng = rand::rng();
        let env = Environment::sample(&mut rng);
        let hour = Local::now().hour();
        tracing::info!(
            occupancy = env.occupancy,
            outside_temp = env.outside_temp,
            hour,
            "automated sweep"
        );
        apply_rules(&mut rng, env, hour, devices);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use domo_domain::device::share;
    use domo_domain::devices::{Light, Speaker, Thermostat};

    use super::*;

    fn brightness_of(device: &DeviceHandle) -> u8 {
        lock(device).as_dimmable_mut().unwrap().brightness()
    }

    fn target_of(device: &DeviceHandle) -> f64 {
        lock(device).as_climate_mut().unwrap().target_temp()
    }

    #[test]
    fn should_sample_environment_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let env = Environment::sample(&mut rng);
            assert!(env.occupancy <= 100);
            assert!((60..100).contains(&env.outside_temp));
        }
    }

    #[test]
    fn should_never_power_devices_on_under_low_occupancy() {
        let lamp = share(Light::new("Lamp"));
        let speaker = share(Speaker::new("Speaker"));

        let env = Environment {
            occupancy: 0,
            outside_temp: 70,
        };
        let mut rng = StdRng::seed_from_u64(1);
        apply_rules(&mut rng, env, 12, &[lamp.clone(), speaker.clone()]);

        assert!(!lock(&lamp).is_on());
        assert!(!lock(&speaker).is_on());
    }

    #[test]
    fn should_optimize_comfort_under_high_occupancy() {
        let lamp = share(Light::new("Lamp"));
        let thermostat = share(Thermostat::new("Main", 70.0));

        let env = Environment {
            occupancy: 95,
            outside_temp: 70,
        };
        let mut rng = StdRng::seed_from_u64(1);
        apply_rules(&mut rng, env, 12, &[lamp.clone(), thermostat.clone()]);

        assert_eq!(brightness_of(&lamp), 80);
        assert!(lock(&lamp).is_on());
        assert!(lock(&thermostat).is_on());
        assert!((target_of(&thermostat) - 72.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_shift_to_energy_saving_late_at_night() {
        let bright = share(Light::new("Bright"));
        let dim = share(Light::new("Dim"));
        let thermostat = share(Thermostat::new("Main", 70.0));
        lock(&bright).as_dimmable_mut().unwrap().set_brightness(100).unwrap();
        lock(&dim).as_dimmable_mut().unwrap().set_brightness(20).unwrap();

        let env = Environment {
            occupancy: 50,
            outside_temp: 70,
        };
        let mut rng = StdRng::seed_from_u64(1);
        apply_rules(
            &mut rng,
            env,
            23,
            &[bright.clone(), dim.clone(), thermostat.clone()],
        );

        assert_eq!(brightness_of(&bright), 30);
        assert_eq!(brightness_of(&dim), 20);
        assert!((target_of(&thermostat) - 68.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_leave_devices_alone_at_midday_with_moderate_occupancy() {
        let lamp = share(Light::new("Lamp"));
        lock(&lamp).as_dimmable_mut().unwrap().set_brightness(55).unwrap();

        let env = Environment {
            occupancy: 50,
            outside_temp: 70,
        };
        let mut rng = StdRng::seed_from_u64(1);
        apply_rules(&mut rng, env, 12, &[lamp.clone()]);

        assert_eq!(brightness_of(&lamp), 55);
    }

    #[test]
    fn should_toggle_device_and_report_through_callback() {
        let lamp = share(Light::new("Lamp"));
        let seen: Arc<Mutex<Vec<(String, bool)>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let callback: ToggleCallback = Arc::new(move |name, on| {
            sink.lock().unwrap().push((name.to_owned(), on));
        });

        let mut rng = StdRng::seed_from_u64(1);
        toggle_random_device(&mut rng, &[lamp.clone()], Some(&callback));
        assert!(lock(&lamp).is_on());

        toggle_random_device(&mut rng, &[lamp.clone()], Some(&callback));
        assert!(!lock(&lamp).is_on());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.as_slice(), [("Lamp".to_owned(), true), ("Lamp".to_owned(), false)]);
    }

    #[tokio::test]
    async fn should_guard_against_double_start() {
        let mut policy = AutomatedControl::new();
        let devices = vec![share(Light::new("Lamp"))];

        assert!(policy.start_random_automation(devices.clone()));
        assert!(policy.is_automation_running());
        assert!(!policy.start_random_automation(devices));

        assert!(policy.stop_random_automation().await);
    }

    #[tokio::test]
    async fn should_refuse_to_start_with_no_devices() {
        let mut policy = AutomatedControl::new();
        assert!(!policy.start_random_automation(Vec::new()));
        assert!(!policy.is_automation_running());
    }

    #[tokio::test]
    async fn should_report_stop_when_idle_as_noop() {
        let mut policy = AutomatedControl::new();
        assert!(!policy.stop_random_automation().await);
    }

    #[tokio::test]
    async fn should_leave_device_states_stable_after_stop() {
        let lamp = share(Light::new("Lamp"));
        let mut policy = AutomatedControl::new();

        assert!(policy.start_random_automation(vec![lamp.clone()]));
        assert!(policy.stop_random_automation().await);
        assert!(!policy.is_automation_running());

        // stopped before the first 5s wake; no toggle may have happened
        assert!(!lock(&lamp).is_on());
    }

    #[tokio::test]
    async fn should_allow_restart_after_stop() {
        let mut policy = AutomatedControl::new();
        let devices = vec![share(Light::new("Lamp"))];

        assert!(policy.start_random_automation(devices.clone()));
        assert!(policy.stop_random_automation().await);
        assert!(policy.start_random_automation(devices));
        assert!(policy.stop_random_automation().await);
    }
}
