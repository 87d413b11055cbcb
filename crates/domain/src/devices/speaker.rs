//! Speaker — plays audio content at a 0–100 percent volume.

use crate::capability::AudioPlayer;
use crate::device::SmartDevice;
use crate::error::ValidationError;
use crate::kind::DeviceKind;
use crate::observer::{ObserverRegistry, SharedObserver};

/// Volume applied when a speaker is turned on without a value.
pub const ON_DEFAULT_VOLUME: u8 = 50;

/// A smart speaker. Starts off, silent, playing nothing.
pub struct Speaker {
    name: String,
    is_on: bool,
    volume: u8,
    now_playing: Option<String>,
    observers: ObserverRegistry,
}

impl Speaker {
    /// Create a speaker in the off state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_on: false,
            volume: 0,
            now_playing: None,
            observers: ObserverRegistry::new(),
        }
    }
}

impl AudioPlayer for Speaker {
    fn volume(&self) -> u8 {
        self.volume
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), ValidationError> {
        if volume > 100 {
            return Err(ValidationError::Volume { value: volume });
        }
        self.volume = volume;
        if volume > 0 {
            self.is_on = true;
        }
        tracing::debug!(name = %self.name, volume, "volume set");
        self.observers.notify(self);
        Ok(())
    }

    fn play(&mut self, content: &str) {
        if !self.is_on {
            self.is_on = true;
            self.volume = ON_DEFAULT_VOLUME;
        }
        self.now_playing = Some(content.to_owned());
        tracing::debug!(name = %self.name, content, "playback started");
        self.observers.notify(self);
    }

    fn stop(&mut self) {
        self.now_playing = None;
        tracing::debug!(name = %self.name, "playback stopped");
        self.observers.notify(self);
    }

    fn now_playing(&self) -> Option<&str> {
        self.now_playing.as_deref()
    }
}

impl SmartDevice for Speaker {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Speaker
    }

    fn is_on(&self) -> bool {
        self.is_on
    }

    fn turn_on(&mut self) {
        self.is_on = true;
        self.volume = ON_DEFAULT_VOLUME;
        tracing::debug!(name = %self.name, "speaker turned on");
        self.observers.notify(self);
    }

    fn turn_off(&mut self) {
        self.is_on = false;
        self.volume = 0;
        self.now_playing = None;
        tracing::debug!(name = %self.name, "speaker turned off");
        self.observers.notify(self);
    }

    fn status(&self) -> String {
        format!(
            "{} is {}, Volume: {}%, Playing: {}",
            self.name,
            if self.is_on { "ON" } else { "OFF" },
            self.volume,
            self.now_playing.as_deref().unwrap_or("Nothing")
        )
    }

    fn add_observer(&mut self, observer: SharedObserver) {
        self.observers.add(observer);
    }

    fn notify_observers(&self) {
        self.observers.notify(self);
    }

    fn as_audio_mut(&mut self) -> Option<&mut dyn AudioPlayer> {
        Some(self)
    }
}
