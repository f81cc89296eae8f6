//! SAADC battery monitor
//!
//! The battery is measured through a divide-by-two resistor network on an
//! analog input. The channel uses gain 1/4 against the VDD/4 reference, so
//! full scale equals VDD (3.3 V) and a 12-bit result maps onto the
//! conversion in `nusbridge_core::telemetry`.

use core::convert::Infallible;

use embassy_nrf::saadc::{ChannelConfig, Config, Gain, Reference, Resolution, Saadc};
use nusbridge_hal::analog::SAMPLE_MAX;
use nusbridge_hal::AnalogSource;

/// SAADC configuration for 12-bit battery readings
pub fn saadc_config() -> Config {
    let mut config = Config::default();
    config.resolution = Resolution::_12BIT;
    config
}

/// Apply the battery channel gain and reference to a channel config
pub fn configure_channel(channel: &mut ChannelConfig<'_>) {
    channel.gain = Gain::GAIN1_4;
    channel.reference = Reference::VDD1_4;
}

/// Single-channel SAADC reading the battery divider
pub struct BatteryMonitor<'d> {
    saadc: Saadc<'d, 1>,
}

impl<'d> BatteryMonitor<'d> {
    /// Wrap a configured single-channel SAADC
    pub fn new(saadc: Saadc<'d, 1>) -> Self {
        Self { saadc }
    }

    /// Run the offset calibration, recommended once after power-up
    pub async fn calibrate(&self) {
        self.saadc.calibrate().await;
    }
}

impl AnalogSource for BatteryMonitor<'_> {
    type Error = Infallible;

    async fn sample(&mut self) -> Result<u16, Self::Error> {
        let mut buf = [0i16; 1];
        self.saadc.sample(&mut buf).await;
        // Single-ended results can dip slightly below zero near ground
        Ok(buf[0].clamp(0, SAMPLE_MAX as i16) as u16)
    }
}
