//! GPIO pin abstractions
//!
//! Provides the digital input trait used for buttons. Only inputs are
//! needed by the bridge.

/// Digital input sampled by polling
///
/// Reads must be cheap and side-effect free; the debouncer calls this once
/// per millisecond.
pub trait InputPin {
    /// Current electrical level
    fn is_high(&self) -> bool;

    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}

/// Input that is asserted when the pin reads low
///
/// Buttons wired to ground with a pull-up read low while pressed.
pub struct ActiveLow<P>(pub P);

impl<P: InputPin> ActiveLow<P> {
    /// Check if the input is asserted
    pub fn is_active(&self) -> bool {
        self.0.is_low()
    }
}
