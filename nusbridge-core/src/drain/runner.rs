//! Drain loop
//!
//! One iteration:
//! 1. Move every buffered inbound byte into the local sink
//! 2. Flush the sink once the ring is observed empty
//! 3. Run one console step
//!
//! Between iterations the loop pauses for a fixed interval so an empty ring
//! is not polled at full CPU cost and other tasks get to run.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_io_async::Write;

use super::sink::BufferedSink;
use crate::cancel::Cancel;
use crate::ring::SharedRing;

/// One step of the local console/input subsystem
#[allow(async_fn_in_trait)]
pub trait Console {
    /// Process whatever local input is ready, without waiting for more
    async fn step(&mut self);
}

/// No console attached
impl Console for () {
    async fn step(&mut self) {}
}

/// Fixed-interval yield between loop iterations
///
/// Firmware implements this with a ticker; tests count calls.
#[allow(async_fn_in_trait)]
pub trait Pacer {
    /// Wait until the next iteration is due
    async fn pause(&mut self);
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    async fn pause(&mut self) {
        (**self).pause().await
    }
}

/// Fatal drain failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainError<E> {
    /// The local sink failed to write or flush
    Sink(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for DrainError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DrainError::Sink(e) => write!(f, "local sink failed: {:?}", e),
        }
    }
}

/// Outcome of one drain iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainReport {
    /// Bytes forwarded to the sink
    pub bytes: usize,
    /// Bytes dropped on overflow since the previous iteration
    pub newly_dropped: u32,
}

/// Consumer side of the ingress path
pub struct DrainLoop<'a, M: RawMutex, W, C, const N: usize, const B: usize> {
    ring: &'a SharedRing<M, N>,
    sink: BufferedSink<W, B>,
    console: C,
    seen_dropped: u32,
}

impl<'a, M, W, C, const N: usize, const B: usize> DrainLoop<'a, M, W, C, N, B>
where
    M: RawMutex,
    W: Write,
    C: Console,
{
    /// Create a drain loop over the shared ring
    pub fn new(ring: &'a SharedRing<M, N>, sink: BufferedSink<W, B>, console: C) -> Self {
        Self {
            ring,
            sink,
            seen_dropped: 0,
            console,
        }
    }

    /// Run one iteration
    ///
    /// With an empty ring this only flushes the sink and steps the console.
    pub async fn step(&mut self) -> Result<DrainReport, DrainError<W::Error>> {
        let mut bytes = 0;
        while let Some(byte) = self.ring.get() {
            self.sink.write_byte(byte).await.map_err(DrainError::Sink)?;
            bytes += 1;
        }
        self.sink.flush().await.map_err(DrainError::Sink)?;

        let dropped = self.ring.dropped();
        let newly_dropped = dropped.wrapping_sub(self.seen_dropped);
        self.seen_dropped = dropped;

        self.console.step().await;

        Ok(DrainReport {
            bytes,
            newly_dropped,
        })
    }

    /// Run until cancelled, pausing between iterations
    ///
    /// `observe` sees every report. Returns `Ok(())` only after
    /// cancellation; a sink failure ends the loop with an error.
    pub async fn run<P: Pacer>(
        &mut self,
        pacer: &mut P,
        cancel: &Cancel,
        mut observe: impl FnMut(&DrainReport),
    ) -> Result<(), DrainError<W::Error>> {
        while !cancel.is_cancelled() {
            let report = self.step().await?;
            observe(&report);
            pacer.pause().await;
        }
        Ok(())
    }

    /// Access the console
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Access the sink
    pub fn sink(&self) -> &BufferedSink<W, B> {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{CountingConsole, CountingPacer, MockSink};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_step_forwards_and_flushes() {
        let ring = SharedRing::<NoopRawMutex, 16>::new();
        ring.extend(b"hello");
        let sink: BufferedSink<_, 4> = BufferedSink::new(MockSink::default());
        let mut drain = DrainLoop::new(&ring, sink, CountingConsole::default());

        let report = block_on(drain.step()).unwrap();
        assert_eq!(report.bytes, 5);
        assert_eq!(report.newly_dropped, 0);
        assert_eq!(drain.sink().get_ref().written, b"hello");
        assert_eq!(drain.sink().get_ref().flushes, 1);
        assert_eq!(drain.console_mut().steps, 1);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_empty_step_only_flushes() {
        let ring = SharedRing::<NoopRawMutex, 16>::new();
        let sink: BufferedSink<_, 4> = BufferedSink::new(MockSink::default());
        let mut drain = DrainLoop::new(&ring, sink, ());

        for _ in 0..3 {
            assert_eq!(block_on(drain.step()), Ok(DrainReport::default()));
        }
        assert!(drain.sink().get_ref().written.is_empty());
        assert_eq!(drain.sink().get_ref().writes, 0);
        assert_eq!(drain.sink().get_ref().flushes, 3);
    }

    #[test]
    fn test_reports_drops_once() {
        let ring = SharedRing::<NoopRawMutex, 4>::new();
        let sink: BufferedSink<_, 4> = BufferedSink::new(MockSink::default());
        let mut drain = DrainLoop::new(&ring, sink, ());

        ring.extend(b"abcdef");
        assert_eq!(block_on(drain.step()).unwrap().newly_dropped, 2);
        assert_eq!(block_on(drain.step()).unwrap().newly_dropped, 0);
    }

    #[test]
    fn test_reports_drops_before_first_step() {
        let ring = SharedRing::<NoopRawMutex, 4>::new();
        ring.extend(b"abcde");

        let sink: BufferedSink<_, 4> = BufferedSink::new(MockSink::default());
        let mut drain = DrainLoop::new(&ring, sink, ());

        let report = block_on(drain.step()).unwrap();
        assert_eq!(report.bytes, 4);
        assert_eq!(report.newly_dropped, 1);
        assert_eq!(block_on(drain.step()).unwrap().newly_dropped, 0);
    }

    #[test]
    fn test_sink_failure_is_fatal() {
        let ring = SharedRing::<NoopRawMutex, 4>::new();
        let sink: BufferedSink<_, 4> = BufferedSink::new(MockSink::failing_flush());
        let mut drain = DrainLoop::new(&ring, sink, ());
        let cancel = Cancel::new();
        let mut pacer = CountingPacer::default();

        let result = block_on(drain.run(&mut pacer, &cancel, |_| {}));
        assert!(matches!(result, Err(DrainError::Sink(_))));
        assert_eq!(pacer.pauses, 0);
    }

    #[test]
    fn test_run_stops_between_iterations() {
        let ring = SharedRing::<NoopRawMutex, 16>::new();
        let sink: BufferedSink<_, 4> = BufferedSink::new(MockSink::default());
        let mut drain = DrainLoop::new(&ring, sink, ());
        let cancel = Cancel::new();
        let mut pacer = CountingPacer::default();
        let mut iterations = 0;

        ring.extend(b"xy");
        let result = block_on(drain.run(&mut pacer, &cancel, |report| {
            iterations += 1;
            if iterations == 3 {
                cancel.cancel();
            }
            if iterations == 1 {
                assert_eq!(report.bytes, 2);
            }
        }));

        assert_eq!(result, Ok(()));
        assert_eq!(iterations, 3);
        assert_eq!(pacer.pauses, 3);
        assert_eq!(drain.sink().get_ref().written, b"xy");
    }
}
