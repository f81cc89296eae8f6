//! Radio write event adapter
//!
//! The radio stack delivers writes to the RX characteristic as a callback
//! with an arbitrary payload and no way to push back. The bridge models this
//! as a single method that accepts the payload and returns nothing.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::ring::SharedRing;

/// Receiver of RX characteristic writes
///
/// Implementations must return quickly and must never block; data that
/// cannot be accepted is dropped.
pub trait WriteEventHandler {
    /// Handle one write from the connected peer
    fn on_write(&self, data: &[u8]);
}

impl<M: RawMutex, const N: usize> WriteEventHandler for SharedRing<M, N> {
    fn on_write(&self, data: &[u8]) {
        // Overflow is accounted for in the ring's drop counter
        let _ = self.extend(data);
    }
}

impl<T: WriteEventHandler + ?Sized> WriteEventHandler for &T {
    fn on_write(&self, data: &[u8]) {
        (**self).on_write(data)
    }
}
