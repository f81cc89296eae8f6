//! Ring buffer shared between the radio event context and the drain loop

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::RingBuffer;

/// Ring buffer shared by exactly one producer and one consumer
///
/// Every operation takes the lock for a bounded amount of work and never
/// waits for data, so neither side can block the other. With
/// `CriticalSectionRawMutex` this is safe to call from interrupt handlers;
/// with `NoopRawMutex` it is limited to a single executor.
///
/// Constructed once (typically in a `static`) and passed by reference to
/// both the write event handler and the drain task.
pub struct SharedRing<M: RawMutex, const N: usize> {
    inner: Mutex<M, RefCell<RingBuffer<N>>>,
}

impl<M: RawMutex, const N: usize> SharedRing<M, N> {
    /// Create an empty shared ring
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(RingBuffer::new())),
        }
    }

    /// Producer side: append one byte, `false` if it was dropped
    pub fn put(&self, byte: u8) -> bool {
        self.inner.lock(|ring| ring.borrow_mut().put(byte))
    }

    /// Producer side: append a payload, returning how many bytes were accepted
    ///
    /// Bytes past the free capacity are dropped; the accepted bytes are
    /// always a prefix of `data`.
    pub fn extend(&self, data: &[u8]) -> usize {
        self.inner.lock(|ring| {
            let mut ring = ring.borrow_mut();
            let mut accepted = 0;
            for &byte in data {
                if ring.put(byte) {
                    accepted += 1;
                }
            }
            accepted
        })
    }

    /// Consumer side: remove the oldest byte
    pub fn get(&self) -> Option<u8> {
        self.inner.lock(|ring| ring.borrow_mut().get())
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.inner.lock(|ring| ring.borrow().len())
    }

    /// `true` when no bytes are buffered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total bytes dropped on overflow
    pub fn dropped(&self) -> u32 {
        self.inner.lock(|ring| ring.borrow().dropped())
    }

    /// Fixed capacity in bytes
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<M: RawMutex, const N: usize> Default for SharedRing<M, N> {
    fn default() -> Self {
        Self::new()
    }
}
