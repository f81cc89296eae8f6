//! Telemetry publisher
//!
//! Samples the battery divider once per period and queues a status line for
//! the outbound writer. A full queue or a failed sample costs one line; the
//! loop keeps its schedule either way.

use embassy_sync::blocking_mutex::raw::RawMutex;
use nusbridge_hal::AnalogSource;
use nusbridge_protocol::StatusLine;
use portable_atomic::{AtomicBool, Ordering};

use crate::cancel::Cancel;
use crate::drain::Pacer;
use crate::outbound::{OutboundQueue, QueueError};

/// Default publishing period
pub const TELEMETRY_PERIOD_MS: u64 = 1000;

/// Convert a raw 12-bit sample to millivolts
///
/// Fixed-point form of `raw * 3300 / 4095` scaled for the on-board
/// divider.
pub const fn battery_millivolts(raw: u16) -> u32 {
    raw as u32 * 2000 / 1241
}

/// Runtime switch for publishing
///
/// Shared between the button task, which toggles it, and the telemetry
/// loop, which skips sampling while disabled.
pub struct TelemetryGate {
    enabled: AtomicBool,
}

impl TelemetryGate {
    /// Create a gate in the given state
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Flip the gate, returning the new state
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::AcqRel)
    }
}

impl Default for TelemetryGate {
    fn default() -> Self {
        Self::new(true)
    }
}

/// What happened in one telemetry period
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryEvent<E> {
    /// A line was queued
    Published(StatusLine),
    /// The line was encoded but not queued
    Dropped(QueueError),
    /// The analog source failed
    SampleFailed(E),
    /// Publishing is switched off
    Disabled,
}

/// Battery status line producer
pub struct TelemetryPublisher<A> {
    source: A,
}

impl<A: AnalogSource> TelemetryPublisher<A> {
    pub fn new(source: A) -> Self {
        Self { source }
    }

    /// Take one reading and encode it
    pub async fn sample(&mut self) -> Result<StatusLine, A::Error> {
        let raw = self.source.sample().await?;
        Ok(StatusLine::battery(battery_millivolts(raw)))
    }

    /// Run one period: sample, encode and queue without waiting
    pub async fn publish_once<M: RawMutex, const D: usize, const MSG: usize>(
        &mut self,
        queue: &OutboundQueue<M, D, MSG>,
        gate: &TelemetryGate,
    ) -> TelemetryEvent<A::Error> {
        if !gate.is_enabled() {
            return TelemetryEvent::Disabled;
        }
        match self.sample().await {
            Ok(line) => match queue.try_submit(line.as_bytes()) {
                Ok(()) => TelemetryEvent::Published(line),
                Err(e) => TelemetryEvent::Dropped(e),
            },
            Err(e) => TelemetryEvent::SampleFailed(e),
        }
    }

    /// Publish once per period until cancelled
    pub async fn run<M: RawMutex, P: Pacer, const D: usize, const MSG: usize>(
        &mut self,
        queue: &OutboundQueue<M, D, MSG>,
        gate: &TelemetryGate,
        pacer: &mut P,
        cancel: &Cancel,
        mut observe: impl FnMut(TelemetryEvent<A::Error>),
    ) {
        while !cancel.is_cancelled() {
            let event = self.publish_once(queue, gate).await;
            observe(event);
            pacer.pause().await;
        }
    }

    /// Unwrap the analog source
    pub fn into_inner(self) -> A {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{CountingPacer, MockSource};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use nusbridge_hal::analog::SAMPLE_MAX;

    #[test]
    fn test_conversion_formula() {
        assert_eq!(battery_millivolts(0), 0);
        assert_eq!(battery_millivolts(1241), 2000);
        assert_eq!(battery_millivolts(1861), 2999);
        assert_eq!(battery_millivolts(SAMPLE_MAX), 6599);
    }

    #[test]
    fn test_sample_encodes_line() {
        let mut publisher = TelemetryPublisher::new(MockSource::new(&[Ok(1862)]));
        let line = block_on(publisher.sample()).unwrap();
        assert_eq!(line.as_str(), "VBat: 3000\n");
        assert_eq!(line.len(), 11);
    }

    #[test]
    fn test_gate_toggle() {
        let gate = TelemetryGate::default();
        assert!(gate.is_enabled());
        assert!(!gate.toggle());
        assert!(!gate.is_enabled());
        assert!(gate.toggle());
        gate.set(false);
        assert!(!gate.is_enabled());
    }

    #[test]
    fn test_publish_once_outcomes() {
        let queue = OutboundQueue::<NoopRawMutex, 1, 32>::new();
        let gate = TelemetryGate::new(false);
        let mut publisher = TelemetryPublisher::new(MockSource::new(&[Ok(1862), Ok(1862), Err(())]));

        block_on(async {
            assert_eq!(publisher.publish_once(&queue, &gate).await, TelemetryEvent::Disabled);
            gate.set(true);
            assert!(matches!(
                publisher.publish_once(&queue, &gate).await,
                TelemetryEvent::Published(_)
            ));
            assert_eq!(
                publisher.publish_once(&queue, &gate).await,
                TelemetryEvent::Dropped(QueueError::Full)
            );
            queue.clear();
            assert_eq!(
                publisher.publish_once(&queue, &gate).await,
                TelemetryEvent::SampleFailed(())
            );
        });
    }

    #[test]
    fn test_run_keeps_schedule_and_stops() {
        let queue = OutboundQueue::<NoopRawMutex, 4, 32>::new();
        let gate = TelemetryGate::default();
        let cancel = Cancel::new();
        let mut pacer = CountingPacer::default();
        let mut publisher = TelemetryPublisher::new(MockSource::new(&[Ok(1241), Err(()), Ok(1241)]));
        let mut events = std::vec::Vec::new();

        block_on(publisher.run(&queue, &gate, &mut pacer, &cancel, |event| {
            events.push(event);
            if events.len() == 3 {
                cancel.cancel();
            }
        }));

        assert_eq!(pacer.pauses, 3);
        assert_eq!(events[1], TelemetryEvent::SampleFailed(()));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.try_receive().unwrap().as_slice(), b"VBat: 2000\n");
    }
}
