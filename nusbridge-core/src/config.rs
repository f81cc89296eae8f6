//! Bridge configuration
//!
//! Values are fixed at build time; the firmware build script checks the same
//! rules against `bridge.toml` and the firmware validates the resulting
//! [`BridgeConfig`] once at startup.

use nusbridge_protocol::{l2cap_mtu_for_frame, DEFAULT_FRAME_SIZE, MAX_NOTIFY_PAYLOAD};

/// Longest local name that fits a legacy advertising packet next to the
/// flags (3 bytes) and the 128-bit service UUID (18 bytes)
pub const MAX_DEVICE_NAME_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Device name is empty
    EmptyDeviceName,
    /// Device name does not fit the advertising packet
    DeviceNameTooLong,
    /// Frame size is zero or exceeds the largest notification payload
    InvalidFrameSize,
    /// A period or interval is zero
    ZeroInterval,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyDeviceName => f.write_str("device name is empty"),
            ConfigError::DeviceNameTooLong => write!(
                f,
                "device name longer than {} bytes",
                MAX_DEVICE_NAME_LEN
            ),
            ConfigError::InvalidFrameSize => write!(
                f,
                "frame size must be in 1..={}",
                MAX_NOTIFY_PAYLOAD
            ),
            ConfigError::ZeroInterval => f.write_str("intervals must be non-zero"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    /// Advertised local name
    pub device_name: &'static str,
    /// Largest notification payload in bytes
    pub max_frame_size: usize,
    /// Pause between drain iterations
    pub drain_interval_ms: u64,
    /// Telemetry publishing period
    pub telemetry_period_ms: u64,
    /// Button sampling period
    pub debounce_interval_ms: u64,
    /// Delay before radio bring-up
    pub startup_delay_ms: u64,
}

impl BridgeConfig {
    pub const DEFAULT: Self = Self {
        device_name: "NUS",
        max_frame_size: DEFAULT_FRAME_SIZE,
        drain_interval_ms: crate::drain::DRAIN_INTERVAL_MS,
        telemetry_period_ms: crate::telemetry::TELEMETRY_PERIOD_MS,
        debounce_interval_ms: crate::debounce::DEBOUNCE_INTERVAL_MS,
        startup_delay_ms: 3000,
    };

    /// L2CAP MTU the radio controller must be configured with so that a
    /// full `max_frame_size` frame goes out as one notification
    pub const fn l2cap_mtu(&self) -> u16 {
        l2cap_mtu_for_frame(self.max_frame_size) as u16
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_name.is_empty() {
            return Err(ConfigError::EmptyDeviceName);
        }
        if self.device_name.len() > MAX_DEVICE_NAME_LEN {
            return Err(ConfigError::DeviceNameTooLong);
        }
        if !(1..=MAX_NOTIFY_PAYLOAD).contains(&self.max_frame_size) {
            return Err(ConfigError::InvalidFrameSize);
        }
        if self.drain_interval_ms == 0
            || self.telemetry_period_ms == 0
            || self.debounce_interval_ms == 0
        {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.device_name, "NUS");
        assert_eq!(config.max_frame_size, 20);
        assert_eq!(config.drain_interval_ms, 1);
        assert_eq!(config.telemetry_period_ms, 1000);
        assert_eq!(config.debounce_interval_ms, 1);
        assert_eq!(config.startup_delay_ms, 3000);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_frame_size_bounds() {
        let mut config = BridgeConfig::default();
        config.max_frame_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFrameSize));
        config.max_frame_size = MAX_NOTIFY_PAYLOAD;
        assert_eq!(config.validate(), Ok(()));
        config.max_frame_size = MAX_NOTIFY_PAYLOAD + 1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFrameSize));
    }

    #[test]
    fn test_l2cap_mtu_follows_frame_size() {
        assert_eq!(BridgeConfig::default().l2cap_mtu(), 27);

        let config = BridgeConfig {
            max_frame_size: 100,
            ..BridgeConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.l2cap_mtu(), 107);

        let config = BridgeConfig {
            max_frame_size: MAX_NOTIFY_PAYLOAD,
            ..BridgeConfig::default()
        };
        assert_eq!(config.l2cap_mtu(), 251);
    }

    #[test]
    fn test_device_name_rules() {
        let mut config = BridgeConfig::default();
        config.device_name = "";
        assert_eq!(config.validate(), Err(ConfigError::EmptyDeviceName));
        config.device_name = "LongBridge";
        assert_eq!(config.validate(), Err(ConfigError::DeviceNameTooLong));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = BridgeConfig {
            telemetry_period_ms: 0,
            ..BridgeConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }
}
