//! Shared state between tasks
//!
//! Process-lifetime statics connecting the radio, drain, telemetry and
//! button tasks. All are built on embassy-sync primitives with
//! `CriticalSectionRawMutex`, so radio event handlers may touch them too.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use nusbridge_core::outbound::{OUTBOUND_DEPTH, OUTBOUND_MESSAGE_SIZE};
use nusbridge_core::ring::INGRESS_CAPACITY;
use nusbridge_core::{Cancel, OutboundQueue, SharedRing, TelemetryGate};

/// Bytes written by the peer, waiting for the drain task
pub static INGRESS: SharedRing<CriticalSectionRawMutex, INGRESS_CAPACITY> = SharedRing::new();

/// Whole messages (telemetry, console lines) waiting for the link writer
pub static OUTBOUND: OutboundQueue<CriticalSectionRawMutex, OUTBOUND_DEPTH, OUTBOUND_MESSAGE_SIZE> =
    OutboundQueue::new();

/// Battery telemetry on/off, toggled by the button
pub static TELEMETRY_GATE: TelemetryGate = TelemetryGate::new(true);

/// Stops the drain and telemetry loops between iterations
pub static SHUTDOWN: Cancel = Cancel::new();
