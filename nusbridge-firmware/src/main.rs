//! NUS Bridge - BLE serial bridge firmware
//!
//! Exposes the Nordic UART Service on an nRF52840. Bytes the peer writes are
//! forwarded to the local serial console; console lines and periodic battery
//! status lines are sent back as notifications.
//!
//! Task layout:
//!
//! - `mpsl_task` - multiprotocol service layer for the SoftDevice Controller
//! - `drain_task` - ingress ring to UART, UART console to outbound queue
//! - `telemetry_task` - battery status lines
//! - `button_task` - debounced button toggling telemetry
//! - main - BLE host: advertising, GATT events, outbound notifications

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_nrf::buffered_uarte::{self, BufferedUarte};
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::mode::Async;
use embassy_nrf::peripherals::RNG;
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::{bind_interrupts, rng};
use embassy_time::Timer;
use nrf_sdc::mpsl::MultiprotocolServiceLayer;
use nrf_sdc::{self as sdc, mpsl};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use nusbridge_hal_nrf::{analog, uart, BatteryMonitor, Button};

use crate::config::{BRIDGE, SERIAL};
use crate::fatal::fatal;

mod ble;
mod channels;
mod config;
mod fatal;
mod tasks;

bind_interrupts!(struct Irqs {
    UARTE0 => buffered_uarte::InterruptHandler<embassy_nrf::peripherals::UARTE0>;
    SAADC => saadc::InterruptHandler;
    RNG => rng::InterruptHandler<RNG>;
    EGU0_SWI0 => mpsl::LowPrioInterruptHandler;
    CLOCK_POWER => mpsl::ClockInterruptHandler;
    RADIO => mpsl::HighPrioInterruptHandler;
    TIMER0 => mpsl::HighPrioInterruptHandler;
    RTC0 => mpsl::HighPrioInterruptHandler;
});

/// Controller buffers sized so one `max_frame_size` notification fits
const L2CAP_MTU: u16 = BRIDGE.l2cap_mtu();
const L2CAP_TXQ: u8 = 3;
const L2CAP_RXQ: u8 = 3;

/// SoftDevice Controller memory, enough for one link at the largest MTU
const SDC_MEM_SIZE: usize = 6144;

/// UART buffer sizes
const UART_RX_BUF: usize = 256;
const UART_TX_BUF: usize = 256;

static UART_RX: StaticCell<[u8; UART_RX_BUF]> = StaticCell::new();
static UART_TX: StaticCell<[u8; UART_TX_BUF]> = StaticCell::new();
static MPSL: StaticCell<MultiprotocolServiceLayer> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Starts the RTC1 time driver; no timer may be awaited before this
    let p = embassy_nrf::init(Default::default());

    // Give a probe time to attach before the first log lines
    Timer::after_millis(BRIDGE.startup_delay_ms).await;
    info!("NUS bridge starting...");

    if let Err(e) = BRIDGE.validate() {
        fatal("invalid configuration", e).await;
    }

    // Radio: MPSL + SoftDevice Controller
    let mpsl_p = mpsl::Peripherals::new(p.RTC0, p.TIMER0, p.TEMP, p.PPI_CH19, p.PPI_CH30, p.PPI_CH31);
    let lfclk_cfg = mpsl::raw::mpsl_clock_lfclk_cfg_t {
        source: mpsl::raw::MPSL_CLOCK_LF_SRC_RC as u8,
        rc_ctiv: mpsl::raw::MPSL_RECOMMENDED_RC_CTIV as u8,
        rc_temp_ctiv: mpsl::raw::MPSL_RECOMMENDED_RC_TEMP_CTIV as u8,
        accuracy_ppm: mpsl::raw::MPSL_DEFAULT_CLOCK_ACCURACY_PPM as u16,
        skip_wait_lfclk_started: mpsl::raw::MPSL_DEFAULT_SKIP_WAIT_LFCLK_STARTED != 0,
    };
    let mpsl = match MultiprotocolServiceLayer::new(mpsl_p, Irqs, lfclk_cfg) {
        Ok(mpsl) => MPSL.init(mpsl),
        Err(e) => fatal("MPSL init", Debug2Format(&e)).await,
    };
    spawner.must_spawn(tasks::mpsl_task(&*mpsl));

    let sdc_p = sdc::Peripherals::new(
        p.PPI_CH17, p.PPI_CH18, p.PPI_CH20, p.PPI_CH21, p.PPI_CH22, p.PPI_CH23, p.PPI_CH24,
        p.PPI_CH25, p.PPI_CH26, p.PPI_CH27, p.PPI_CH28, p.PPI_CH29,
    );
    let mut rng = rng::Rng::new(p.RNG, Irqs);
    let mut sdc_mem = sdc::Mem::<SDC_MEM_SIZE>::new();
    let sdc = match build_sdc(sdc_p, &mut rng, mpsl, &mut sdc_mem) {
        Ok(sdc) => sdc,
        Err(e) => fatal("SoftDevice Controller init", Debug2Format(&e)).await,
    };
    info!("Radio initialized");

    // Local console on UARTE0
    let uart_config = match uart::uarte_config(&SERIAL) {
        Ok(config) => config,
        Err(e) => fatal("serial configuration", e).await,
    };
    let console = BufferedUarte::new(
        p.UARTE0,
        p.TIMER1,
        p.PPI_CH0,
        p.PPI_CH1,
        p.PPI_GROUP0,
        p.P0_24,
        p.P0_25,
        Irqs,
        uart_config,
        UART_RX.init([0; UART_RX_BUF]),
        UART_TX.init([0; UART_TX_BUF]),
    );
    let (console_rx, console_tx) = console.split();
    info!("Console UART initialized ({} baud)", SERIAL.baudrate);

    // Battery divider on AIN5 (P0.29)
    let mut channel = ChannelConfig::single_ended(p.P0_29);
    analog::configure_channel(&mut channel);
    let saadc = Saadc::new(p.SAADC, Irqs, analog::saadc_config(), [channel]);
    let monitor = BatteryMonitor::new(saadc);

    // User button, active low
    let button = Button::new(Input::new(p.P1_02, Pull::Up));

    spawner.must_spawn(tasks::drain_task(
        console_tx,
        console_rx,
        BRIDGE.drain_interval_ms,
    ));
    spawner.must_spawn(tasks::telemetry_task(monitor, BRIDGE.telemetry_period_ms));
    spawner.must_spawn(tasks::button_task(button, BRIDGE.debounce_interval_ms));
    info!("Tasks spawned");

    let address = device_address();
    info!(
        "Advertising as \"{=str}\" from {=[u8]:x}",
        BRIDGE.device_name,
        address[..]
    );
    ble::run(sdc, address, &BRIDGE).await
}

fn build_sdc<'d, const N: usize>(
    p: sdc::Peripherals<'d>,
    rng: &'d mut rng::Rng<Async>,
    mpsl: &'d MultiprotocolServiceLayer,
    mem: &'d mut sdc::Mem<N>,
) -> Result<sdc::SoftdeviceController<'d>, sdc::Error> {
    sdc::Builder::new()?
        .support_adv()?
        .support_peripheral()?
        .peripheral_count(1)?
        .buffer_cfg(L2CAP_MTU, L2CAP_MTU, L2CAP_TXQ, L2CAP_RXQ)?
        .build(p, rng, mpsl, mem)
}

/// Random static address derived from the factory device address
fn device_address() -> [u8; 6] {
    let ficr = embassy_nrf::pac::FICR;
    let low = ficr.deviceaddr(0).read().to_le_bytes();
    let high = ficr.deviceaddr(1).read().to_le_bytes();

    let mut address = [low[0], low[1], low[2], low[3], high[0], high[1]];
    // Static random addresses have the two most significant bits set
    address[5] |= 0xC0;
    address
}
