//! In-memory fakes for unit tests

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_io_async::{ErrorKind, ErrorType, Read, ReadReady, Write};
use nusbridge_hal::{AnalogSource, LinkError, Notifier};

use crate::drain::{Console, Pacer};

/// Local sink recording everything written through it
#[derive(Debug, Default)]
pub struct MockSink {
    pub written: Vec<u8>,
    pub writes: usize,
    pub flushes: usize,
    pub fail_flush: bool,
}

impl MockSink {
    pub fn failing_flush() -> Self {
        Self {
            fail_flush: true,
            ..Default::default()
        }
    }
}

impl ErrorType for MockSink {
    type Error = ErrorKind;
}

impl Write for MockSink {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.writes += 1;
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        if self.fail_flush {
            return Err(ErrorKind::BrokenPipe);
        }
        self.flushes += 1;
        Ok(())
    }
}

/// Notifier recording frames, optionally failing at a given frame index
#[derive(Debug, Default)]
pub struct MockNotifier {
    pub frames: Vec<Vec<u8>>,
    pub attempts: usize,
    pub fail_at: Option<usize>,
}

impl MockNotifier {
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Default::default()
        }
    }

    pub fn joined(&self) -> Vec<u8> {
        self.frames.concat()
    }
}

impl Notifier for MockNotifier {
    type Error = LinkError;

    async fn notify(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        let index = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(index) {
            return Err(LinkError::NotConnected);
        }
        self.frames.push(frame.to_vec());
        Ok(())
    }
}

/// Analog source replaying scripted samples
#[derive(Debug, Default)]
pub struct MockSource {
    pub samples: VecDeque<Result<u16, ()>>,
}

impl MockSource {
    pub fn new(samples: &[Result<u16, ()>]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
        }
    }
}

impl AnalogSource for MockSource {
    type Error = ();

    async fn sample(&mut self) -> Result<u16, Self::Error> {
        self.samples.pop_front().unwrap_or(Err(()))
    }
}

/// Serial receiver replaying a fixed input
#[derive(Debug, Default)]
pub struct MockRx {
    pub input: VecDeque<u8>,
}

impl MockRx {
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
        }
    }
}

impl ErrorType for MockRx {
    type Error = ErrorKind;
}

impl ReadReady for MockRx {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.input.is_empty())
    }
}

impl Read for MockRx {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut n = 0;
        while n < buf.len() {
            match self.input.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

/// Console counting its steps
#[derive(Debug, Default)]
pub struct CountingConsole {
    pub steps: usize,
}

impl Console for CountingConsole {
    async fn step(&mut self) {
        self.steps += 1;
    }
}

/// Pacer that returns immediately and counts pauses
#[derive(Debug, Default)]
pub struct CountingPacer {
    pub pauses: usize,
}

impl Pacer for CountingPacer {
    async fn pause(&mut self) {
        self.pauses += 1;
    }
}
