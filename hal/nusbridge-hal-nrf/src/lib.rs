//! nRF52840 HAL for the NUS bridge firmware
//!
//! Implements the `nusbridge-hal` traits over `embassy-nrf` peripherals:
//!
//! - [`analog::BatteryMonitor`] - SAADC battery divider as an `AnalogSource`
//! - [`gpio::Button`] - GPIO input as an `InputPin`
//! - [`uart`] - Mapping from `SerialConfig` to UARTE configuration
//!
//! The firmware owns peripheral construction and interrupt binding; this
//! crate only wraps already-initialized drivers.

#![no_std]

pub mod analog;
pub mod gpio;
pub mod uart;

pub use analog::BatteryMonitor;
pub use gpio::Button;
