//! Ingress drain task
//!
//! Forwards bytes written by the peer to the local serial port and runs the
//! local console, whose completed lines are queued for the peer.

use defmt::*;
use embassy_nrf::buffered_uarte::{BufferedUarteRx, BufferedUarteTx};
use nusbridge_core::console::LineConsole;
use nusbridge_core::outbound::{OUTBOUND_DEPTH, OUTBOUND_MESSAGE_SIZE};
use nusbridge_core::{BufferedSink, DrainLoop, DrainReport};

use crate::channels::{INGRESS, OUTBOUND, SHUTDOWN};
use crate::fatal::fatal;
use crate::tasks::TickerPacer;

/// Drain task - ring buffer to UART, UART console to outbound queue
#[embassy_executor::task]
pub async fn drain_task(
    tx: BufferedUarteTx<'static>,
    rx: BufferedUarteRx<'static>,
    interval_ms: u64,
) {
    info!("Drain task started ({} ms interval)", interval_ms);

    let console: LineConsole<'_, _, _, OUTBOUND_DEPTH, OUTBOUND_MESSAGE_SIZE> =
        LineConsole::new(rx, &OUTBOUND);
    let sink: BufferedSink<_> = BufferedSink::new(tx);
    let mut drain = DrainLoop::new(&INGRESS, sink, console);
    let mut pacer = TickerPacer::every_ms(interval_ms);

    let result = drain
        .run(&mut pacer, &SHUTDOWN, |report: &DrainReport| {
            if report.newly_dropped > 0 {
                warn!(
                    "Ingress overflow: {} bytes dropped ({} total)",
                    report.newly_dropped,
                    INGRESS.dropped()
                );
            }
            if report.bytes > 0 {
                trace!("Forwarded {} bytes", report.bytes);
            }
        })
        .await;

    let stats = drain.console_mut().stats();
    info!(
        "Console: {} lines sent, {} dropped, {} read errors",
        stats.submitted, stats.dropped, stats.read_errors
    );

    match result {
        Ok(()) => info!("Drain task stopped"),
        Err(e) => fatal("local sink failed", Debug2Format(&e)).await,
    }
}
