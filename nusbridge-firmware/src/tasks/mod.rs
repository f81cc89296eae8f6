//! Embassy async tasks
//!
//! Each task runs independently and communicates through the statics in
//! `channels`.

use embassy_time::{Duration, Ticker};
use nusbridge_core::Pacer;

pub mod button;
pub mod drain;
pub mod mpsl;
pub mod telemetry;

pub use button::button_task;
pub use drain::drain_task;
pub use mpsl::mpsl_task;
pub use telemetry::telemetry_task;

/// Fixed-rate pause backed by an embassy ticker
pub struct TickerPacer(Ticker);

impl TickerPacer {
    pub fn every_ms(ms: u64) -> Self {
        Self(Ticker::every(Duration::from_millis(ms)))
    }
}

impl Pacer for TickerPacer {
    async fn pause(&mut self) {
        self.0.next().await
    }
}
