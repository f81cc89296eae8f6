//! Persistent error state
//!
//! Used for failures the bridge cannot continue past: radio bring-up and
//! local sink errors. The error is re-reported once per second so a probe
//! attached later still sees it.

use defmt::*;
use embassy_time::Timer;

/// Report `error` forever
pub async fn fatal(context: &str, error: impl Format) -> ! {
    loop {
        error!("FATAL: {}: {}", context, error);
        Timer::after_secs(1).await;
    }
}
