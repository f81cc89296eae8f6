//! Shift-register button debouncer
//!
//! Each sample shifts one bit into an 8-bit history (1 = asserted). The
//! button is considered pressed after eight consecutive asserted samples
//! and released after eight consecutive idle ones. At the default 1 ms
//! sample period that is an 8 ms settling window.

use nusbridge_hal::gpio::{ActiveLow, InputPin};

/// Default sample period
pub const DEBOUNCE_INTERVAL_MS: u64 = 1;

const ALL_ASSERTED: u8 = 0xFF;
const ALL_IDLE: u8 = 0x00;

/// Debounced button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

/// Debounced transition, reported once per change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    history: u8,
    state: ButtonState,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            history: ALL_IDLE,
            state: ButtonState::Released,
        }
    }

    /// Feed one raw sample
    pub fn sample(&mut self, asserted: bool) -> Option<ButtonEvent> {
        self.history = (self.history << 1) | asserted as u8;

        match self.state {
            ButtonState::Released if self.history == ALL_ASSERTED => {
                self.state = ButtonState::Pressed;
                Some(ButtonEvent::Pressed)
            }
            ButtonState::Pressed if self.history == ALL_IDLE => {
                self.state = ButtonState::Released;
                Some(ButtonEvent::Released)
            }
            _ => None,
        }
    }

    /// Sample an active-low input
    pub fn poll<P: InputPin>(&mut self, pin: &ActiveLow<P>) -> Option<ButtonEvent> {
        self.sample(pin.is_active())
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }
}
