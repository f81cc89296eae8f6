//! User button task
//!
//! Samples the button at a fixed rate through the debouncer. Each press
//! toggles battery telemetry.

use defmt::*;
use embassy_time::{Duration, Ticker};
use nusbridge_core::{ButtonEvent, Debouncer};
use nusbridge_hal::ActiveLow;
use nusbridge_hal_nrf::Button;

use crate::channels::TELEMETRY_GATE;

#[embassy_executor::task]
pub async fn button_task(button: Button<'static>, interval_ms: u64) {
    info!("Button task started");

    let button = ActiveLow(button);
    let mut debouncer = Debouncer::new();
    let mut ticker = Ticker::every(Duration::from_millis(interval_ms));

    loop {
        match debouncer.poll(&button) {
            Some(ButtonEvent::Pressed) => {
                let enabled = TELEMETRY_GATE.toggle();
                info!("Button pressed, telemetry {}", if enabled { "on" } else { "off" });
            }
            Some(ButtonEvent::Released) => debug!("Button released"),
            None => {}
        }

        ticker.next().await;
    }
}
