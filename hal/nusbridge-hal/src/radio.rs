//! Radio link abstractions
//!
//! The bridge only ever talks to one peer through one notify characteristic,
//! so the whole outbound side of the radio stack collapses into a single
//! trait with a single method.

/// Failure of an outbound notification write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// No peer is connected (or it has not subscribed to notifications)
    NotConnected,
    /// The frame does not fit in one notification
    FrameTooLarge,
    /// The radio stack rejected or failed the write
    Transport,
}

impl core::fmt::Display for LinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinkError::NotConnected => f.write_str("no peer connected"),
            LinkError::FrameTooLarge => f.write_str("frame exceeds notification payload"),
            LinkError::Transport => f.write_str("radio transport error"),
        }
    }
}

/// Outbound notification writer
///
/// One call is one notification on the TX characteristic. Implementations
/// must not retry internally and must return promptly when no peer is
/// connected.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Error type for notification writes
    type Error;

    /// Write a single frame as one notification
    async fn notify(&mut self, frame: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    type Error = T::Error;

    async fn notify(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        (**self).notify(frame).await
    }
}
