//! Battery telemetry task
//!
//! Samples the battery divider once per period, logs the reading locally and
//! queues the status line for the peer.

use defmt::*;
use nusbridge_core::{TelemetryEvent, TelemetryPublisher};
use nusbridge_hal_nrf::BatteryMonitor;

use crate::channels::{OUTBOUND, SHUTDOWN, TELEMETRY_GATE};
use crate::tasks::TickerPacer;

#[embassy_executor::task]
pub async fn telemetry_task(monitor: BatteryMonitor<'static>, period_ms: u64) {
    info!("Telemetry task started ({} ms period)", period_ms);

    monitor.calibrate().await;

    let mut publisher = TelemetryPublisher::new(monitor);
    let mut pacer = TickerPacer::every_ms(period_ms);

    publisher
        .run(&OUTBOUND, &TELEMETRY_GATE, &mut pacer, &SHUTDOWN, |event| match event {
            TelemetryEvent::Published(line) => info!("{=str}", line.as_str().trim_end()),
            TelemetryEvent::Dropped(e) => warn!("Telemetry line dropped: {}", e),
            TelemetryEvent::SampleFailed(e) => match e {},
            TelemetryEvent::Disabled => trace!("Telemetry disabled"),
        })
        .await;

    info!("Telemetry task stopped");
}
