//! UARTE configuration for the local console
//!
//! Maps the chip-independent `SerialConfig` onto `embassy-nrf` UARTE
//! settings. The console runs on `BufferedUarte`, which implements the
//! `embedded-io-async` traits the bridge core consumes directly.

use embassy_nrf::uarte::{self, Baudrate};
use nusbridge_hal::uart::{Parity, SerialConfig};

/// Serial settings the UARTE cannot provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartConfigError {
    /// Baud rate not in the UARTE rate table
    UnsupportedBaudrate(u32),
    /// RTS/CTS requested but the console is wired without handshake lines
    FlowControlUnavailable,
}

/// Look up the UARTE rate for a baud rate
pub fn baudrate(rate: u32) -> Option<Baudrate> {
    let baud = match rate {
        1200 => Baudrate::BAUD1200,
        2400 => Baudrate::BAUD2400,
        4800 => Baudrate::BAUD4800,
        9600 => Baudrate::BAUD9600,
        14400 => Baudrate::BAUD14400,
        19200 => Baudrate::BAUD19200,
        28800 => Baudrate::BAUD28800,
        38400 => Baudrate::BAUD38400,
        57600 => Baudrate::BAUD57600,
        76800 => Baudrate::BAUD76800,
        115200 => Baudrate::BAUD115200,
        230400 => Baudrate::BAUD230400,
        250000 => Baudrate::BAUD250000,
        460800 => Baudrate::BAUD460800,
        921600 => Baudrate::BAUD921600,
        1_000_000 => Baudrate::BAUD1M,
        _ => return None,
    };
    Some(baud)
}

/// Build a UARTE config from serial settings
pub fn uarte_config(serial: &SerialConfig) -> Result<uarte::Config, UartConfigError> {
    if serial.flow_control {
        return Err(UartConfigError::FlowControlUnavailable);
    }

    let mut config = uarte::Config::default();
    config.baudrate =
        baudrate(serial.baudrate).ok_or(UartConfigError::UnsupportedBaudrate(serial.baudrate))?;
    config.parity = match serial.parity {
        Parity::None => uarte::Parity::EXCLUDED,
        Parity::Even => uarte::Parity::INCLUDED,
    };
    Ok(config)
}
