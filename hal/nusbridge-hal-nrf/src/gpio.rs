//! GPIO inputs for nRF52840

use embassy_nrf::gpio::Input;
use nusbridge_hal::InputPin;

/// User button on a GPIO input
///
/// The board button pulls the pin to ground; configure the input with
/// `Pull::Up` and wrap it in `ActiveLow`.
pub struct Button<'d> {
    input: Input<'d>,
}

impl<'d> Button<'d> {
    pub fn new(input: Input<'d>) -> Self {
        Self { input }
    }
}

impl InputPin for Button<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
