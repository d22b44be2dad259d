//! Defines the driver configuration. Builder methods offer a declarative way to override the
//! breakout defaults before the display is constructed.

use core::time::Duration;

use crate::command::consts::*;

/// How often the scheduler should tick the controller unless told otherwise.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

/// A configuration for the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) address: u8,
    pub(crate) brightness: u8,
    pub(crate) update_interval: Duration,
}

impl Config {
    /// Create a configuration for a breakout at the default address, at default brightness,
    /// refreshed once per second.
    pub fn new() -> Self {
        Config {
            address: DEFAULT_ADDRESS,
            brightness: DEFAULT_BRIGHTNESS,
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }

    /// Extend this `Config` with the 7-bit I2C address of the driver. The breakout jumpers select
    /// `consts::DEFAULT_ADDRESS` or one of the two alternates.
    pub fn address(self, address: u8) -> Self {
        Self { address, ..self }
    }

    /// Extend this `Config` with the brightness written during init. Values above
    /// `consts::MAX_BRIGHTNESS` are clamped.
    pub fn brightness(self, brightness: u8) -> Self {
        Self {
            brightness: brightness.min(MAX_BRIGHTNESS),
            ..self
        }
    }

    /// Extend this `Config` with the interval at which `Pollable::update` should be driven.
    pub fn update_interval(self, update_interval: Duration) -> Self {
        Self {
            update_interval,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.address, 0x61);
        assert_eq!(cfg.brightness, 64);
        assert_eq!(cfg.update_interval, Duration::from_secs(1));
    }

    #[test]
    fn builder_overrides() {
        let cfg = Config::new()
            .address(ALTERNATE_ADDRESS_2)
            .brightness(10)
            .update_interval(Duration::from_millis(250));
        assert_eq!(cfg.address, 0x63);
        assert_eq!(cfg.brightness, 10);
        assert_eq!(cfg.update_interval, Duration::from_millis(250));
    }

    #[test]
    fn brightness_clamped() {
        assert_eq!(Config::new().brightness(200).brightness, 127);
        assert_eq!(Config::new().brightness(127).brightness, 127);
    }
}
