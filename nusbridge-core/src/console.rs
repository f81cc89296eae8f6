//! Local serial console
//!
//! Bytes typed on the local serial port are collected into lines. A
//! completed line, terminator included, is queued for the peer. `Ctrl-X`
//! discards the pending line.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_io_async::{Read, ReadReady};
use heapless::Vec;

use crate::drain::Console;
use crate::outbound::OutboundQueue;

/// Discards the pending line
pub const CANCEL_LINE: u8 = 0x18;

/// Default line capacity
pub const LINE_CAPACITY: usize = 64;

/// Bytes read from the port per console step
const READ_CHUNK: usize = 16;

/// One completed line
pub type Line<const N: usize> = Vec<u8, N>;

/// Line accumulator
///
/// `\r` is treated as a line end and a `\n` directly after it is swallowed,
/// so CR, LF and CRLF terminals all produce one `\n`-terminated line. A line
/// that fills the buffer is emitted without a terminator.
#[derive(Debug, Default)]
pub struct LineEditor<const N: usize = LINE_CAPACITY> {
    line: Vec<u8, N>,
    after_cr: bool,
}

impl<const N: usize> LineEditor<N> {
    const NON_EMPTY: () = assert!(N > 0, "line buffer must hold at least one byte");

    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            line: Vec::new(),
            after_cr: false,
        }
    }

    /// Feed one byte, returning a line when one completes
    pub fn push(&mut self, byte: u8) -> Option<Line<N>> {
        let after_cr = core::mem::replace(&mut self.after_cr, byte == b'\r');

        match byte {
            b'\n' if after_cr => None,
            b'\n' | b'\r' => {
                // Never full here: a full line is taken as soon as it fills
                let _ = self.line.push(b'\n');
                Some(self.take())
            }
            CANCEL_LINE => {
                self.line.clear();
                None
            }
            _ => {
                let _ = self.line.push(byte);
                self.line.is_full().then(|| self.take())
            }
        }
    }

    /// Bytes collected so far
    pub fn pending(&self) -> &[u8] {
        &self.line
    }

    fn take(&mut self) -> Line<N> {
        core::mem::take(&mut self.line)
    }
}

/// Console counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsoleStats {
    /// Lines queued for the peer
    pub submitted: u32,
    /// Lines lost to a full queue
    pub dropped: u32,
    /// Failed reads from the port
    pub read_errors: u32,
}

/// Console reading a serial port into the outbound queue
///
/// Each step consumes only the input that is already available, so the
/// drain loop never waits on local typing.
pub struct LineConsole<
    'a,
    R,
    M: RawMutex,
    const D: usize,
    const MSG: usize,
    const N: usize = LINE_CAPACITY,
> {
    rx: R,
    editor: LineEditor<N>,
    queue: &'a OutboundQueue<M, D, MSG>,
    stats: ConsoleStats,
}

impl<'a, R, M, const D: usize, const MSG: usize, const N: usize> LineConsole<'a, R, M, D, MSG, N>
where
    R: Read + ReadReady,
    M: RawMutex,
{
    pub fn new(rx: R, queue: &'a OutboundQueue<M, D, MSG>) -> Self {
        Self {
            rx,
            editor: LineEditor::new(),
            queue,
            stats: ConsoleStats::default(),
        }
    }

    pub fn stats(&self) -> ConsoleStats {
        self.stats
    }

    fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if let Some(line) = self.editor.push(byte) {
                match self.queue.try_submit(&line) {
                    Ok(()) => self.stats.submitted = self.stats.submitted.wrapping_add(1),
                    Err(_) => self.stats.dropped = self.stats.dropped.wrapping_add(1),
                }
            }
        }
    }
}

impl<'a, R, M, const D: usize, const MSG: usize, const N: usize> Console
    for LineConsole<'a, R, M, D, MSG, N>
where
    R: Read + ReadReady,
    M: RawMutex,
{
    async fn step(&mut self) {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.rx.read_ready() {
                Ok(true) => {}
                Ok(false) => return,
                Err(_) => {
                    self.stats.read_errors = self.stats.read_errors.wrapping_add(1);
                    return;
                }
            }
            match self.rx.read(&mut chunk).await {
                Ok(0) => return,
                Ok(n) => self.feed(&chunk[..n]),
                Err(_) => {
                    self.stats.read_errors = self.stats.read_errors.wrapping_add(1);
                    return;
                }
            }
        }
    }
}
