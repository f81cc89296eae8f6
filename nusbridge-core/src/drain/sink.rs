//! Buffered local sink
//!
//! Inbound bytes are handed over one at a time; writing each byte straight
//! to the UART would cost one DMA transfer per byte. The sink batches bytes
//! and only touches the inner writer when the batch is full or on flush.

use embedded_io_async::Write;
use heapless::Vec;

/// Default batch size for the local sink
pub const SINK_BUFFER_SIZE: usize = 64;

/// Byte-oriented buffered writer over an `embedded_io_async::Write`
pub struct BufferedSink<W, const N: usize = SINK_BUFFER_SIZE> {
    inner: W,
    pending: Vec<u8, N>,
}

impl<W: Write, const N: usize> BufferedSink<W, N> {
    const NON_EMPTY: () = assert!(N > 0, "sink buffer must hold at least one byte");

    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        let () = Self::NON_EMPTY;
        Self {
            inner,
            pending: Vec::new(),
        }
    }

    /// Buffer one byte, writing the batch through first if it is full
    pub async fn write_byte(&mut self, byte: u8) -> Result<(), W::Error> {
        if self.pending.is_full() {
            self.write_pending().await?;
        }
        // Cannot fail: the batch was emptied above if it was full
        let _ = self.pending.push(byte);
        Ok(())
    }

    /// Write pending bytes and flush the inner writer
    pub async fn flush(&mut self) -> Result<(), W::Error> {
        if !self.pending.is_empty() {
            self.write_pending().await?;
        }
        self.inner.flush().await
    }

    /// Number of bytes buffered but not yet written
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Access the inner writer
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the inner writer, discarding unwritten bytes
    pub fn into_inner(self) -> W {
        self.inner
    }

    async fn write_pending(&mut self) -> Result<(), W::Error> {
        self.inner.write_all(&self.pending).await?;
        self.pending.clear();
        Ok(())
    }
}
