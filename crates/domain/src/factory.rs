//! Device factory — builds devices from a string type tag.

use crate::device::{DeviceHandle, share};
use crate::devices::{Light, Speaker, Thermostat};
use crate::error::{DomoError, UnknownDeviceTypeError};

/// Room temperature assumed when none is given.
pub const DEFAULT_CURRENT_TEMP: f64 = 70.0;

/// Create a device from a case-insensitive type tag.
///
/// Valid tags are `"light"`, `"thermostat"`, and `"speaker"`. A
/// thermostat is created with the default 70 °F room temperature; use
/// [`create_thermostat`] to pick one.
///
/// # Errors
///
/// Returns [`DomoError::UnknownDeviceType`] for any other tag.
pub fn create_device(kind: &str, name: impl Into<String>) -> Result<DeviceHandle, DomoError> {
    let name = name.into();
    let tag = kind.to_ascii_lowercase();
    tracing::debug!(kind = %tag, name = %name, "creating device");
    match tag.as_str() {
        "light" => Ok(share(Light::new(name))),
        "thermostat" => Ok(share(Thermostat::new(name, DEFAULT_CURRENT_TEMP))),
        "speaker" => Ok(share(Speaker::new(name))),
        _ => Err(UnknownDeviceTypeError { kind: tag }.into()),
    }
}

/// Create a thermostat with a specific current room temperature.
pub fn create_thermostat(name: impl Into<String>, current_temp: f64) -> DeviceHandle {
    share(Thermostat::new(name, current_temp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::lock;
    use crate::kind::DeviceKind;

    #[test]
    fn should_create_light_from_tag() {
        let handle = create_device("light", "Desk Lamp").unwrap();
        let guard = lock(&handle);
        assert_eq!(guard.kind(), DeviceKind::Light);
        assert_eq!(guard.name(), "Desk Lamp");
        assert!(!guard.is_on());
    }

    #[test]
    fn should_create_thermostat_from_tag_with_default_temp() {
        let handle = create_device("thermostat", "Main").unwrap();
        let mut guard = lock(&handle);
        assert_eq!(guard.kind(), DeviceKind::Thermostat);
        let climate = guard.as_climate_mut().unwrap();
        assert!((climate.current_temp() - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_create_speaker_from_tag() {
        let handle = create_device("speaker", "Kitchen Speaker").unwrap();
        assert_eq!(lock(&handle).kind(), DeviceKind::Speaker);
    }

    #[test]
    fn should_match_tag_case_insensitively() {
        assert!(create_device("LIGHT", "A").is_ok());
        assert!(create_device("Thermostat", "B").is_ok());
        assert!(create_device("SpEaKeR", "C").is_ok());
    }

    #[test]
    fn should_reject_unknown_type_tag() {
        let result = create_device("toaster", "Breakfast");
        assert!(matches!(result, Err(DomoError::UnknownDeviceType(_))));
    }

    #[test]
    fn should_create_thermostat_with_given_temp() {
        let handle = create_thermostat("Main", 65.5);
        let mut guard = lock(&handle);
        let climate = guard.as_climate_mut().unwrap();
        assert!((climate.current_temp() - 65.5).abs() < f64::EPSILON);
    }
}
