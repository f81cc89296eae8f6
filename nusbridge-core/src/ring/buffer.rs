//! Fixed-capacity byte ring buffer

/// A fixed-capacity FIFO of bytes
///
/// Capacity is set at compile time via the const generic `N`, which must be
/// a non-zero power of two. The backing store lives inline, so the buffer
/// can sit in a `static` without a runtime initialiser.
///
/// This type is not shared by itself; wrap it in a
/// [`SharedRing`](super::SharedRing) to hand it to two execution contexts.
#[derive(Debug, Clone)]
pub struct RingBuffer<const N: usize> {
    buf: [u8; N],
    /// Index of the next slot to read from
    head: usize,
    /// Index of the next slot to write to
    tail: usize,
    /// Number of bytes currently held
    count: usize,
    /// Bytes rejected because the buffer was full
    dropped: u32,
}

impl<const N: usize> RingBuffer<N> {
    const MASK: usize = {
        assert!(
            N != 0 && N.is_power_of_two(),
            "ring buffer capacity must be a non-zero power of two"
        );
        N - 1
    };

    /// Create a new, empty ring buffer
    pub const fn new() -> Self {
        let _ = Self::MASK;
        Self {
            buf: [0u8; N],
            head: 0,
            tail: 0,
            count: 0,
            dropped: 0,
        }
    }

    /// Append a byte
    ///
    /// Returns `false` and drops the byte when the buffer is full.
    pub fn put(&mut self, byte: u8) -> bool {
        if self.count == N {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        self.buf[self.tail] = byte;
        self.tail = (self.tail + 1) & Self::MASK;
        self.count += 1;
        true
    }

    /// Remove the oldest byte, or `None` when empty
    pub fn get(&mut self) -> Option<u8> {
        if self.count == 0 {
            return None;
        }
        let byte = self.buf[self.head];
        self.head = (self.head + 1) & Self::MASK;
        self.count -= 1;
        Some(byte)
    }

    /// Number of bytes available to read
    pub fn len(&self) -> usize {
        self.count
    }

    /// `true` when no bytes are buffered
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `true` when the next `put` will be rejected
    pub fn is_full(&self) -> bool {
        self.count == N
    }

    /// Maximum number of bytes the buffer can hold
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Total bytes rejected since creation (saturating)
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
