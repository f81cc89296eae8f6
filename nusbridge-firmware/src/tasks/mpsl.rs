//! Multiprotocol service layer task
//!
//! Services MPSL low-priority work for the SoftDevice Controller.

use nrf_sdc::mpsl::MultiprotocolServiceLayer;

#[embassy_executor::task]
pub async fn mpsl_task(mpsl: &'static MultiprotocolServiceLayer<'static>) -> ! {
    mpsl.run().await
}
