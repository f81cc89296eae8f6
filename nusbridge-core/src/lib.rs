//! Board-agnostic core logic for the NUS serial bridge
//!
//! This crate contains all bridge logic that does not depend on a specific
//! radio stack or chip:
//!
//! - Ingress ring buffer fed by radio write events
//! - Drain loop forwarding inbound bytes to a buffered local sink
//! - Frame chunker and single-writer outbound queue
//! - Telemetry publisher (battery status lines)
//! - Button debouncer and console line editor
//! - Cooperative cancellation and typed configuration
//!
//! Data paths:
//!
//! ```text
//! radio write ─▶ SharedRing ─▶ DrainLoop ─▶ BufferedSink ─▶ UART
//! telemetry ─┐
//! console ───┴▶ OutboundQueue ─▶ chunker::send ─▶ Notifier (TX notify)
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod console;
pub mod debounce;
pub mod drain;
pub mod ingress;
pub mod outbound;
pub mod ring;
pub mod telemetry;

#[cfg(test)]
mod mocks;

pub use cancel::Cancel;
pub use config::{BridgeConfig, ConfigError};
pub use console::{LineConsole, LineEditor};
pub use debounce::{ButtonEvent, ButtonState, Debouncer};
pub use drain::{BufferedSink, Console, DrainError, DrainLoop, DrainReport, Pacer};
pub use ingress::WriteEventHandler;
pub use outbound::{send, write_next, OutboundQueue, QueueError, SendError};
pub use ring::{RingBuffer, SharedRing};
pub use telemetry::{battery_millivolts, TelemetryEvent, TelemetryGate, TelemetryPublisher};
