//! Analog sampling abstractions

/// Source of raw analog samples
///
/// Implementations return a right-aligned 12-bit conversion result
/// (0..=4095) regardless of the converter's native resolution.
///
/// Takes `&mut self` because ADC reads typically require mutable access.
#[allow(async_fn_in_trait)]
pub trait AnalogSource {
    /// Error type for conversions
    type Error;

    /// Take one sample
    async fn sample(&mut self) -> Result<u16, Self::Error>;
}

/// Full-scale value of a 12-bit sample
pub const SAMPLE_MAX: u16 = 0x0FFF;
