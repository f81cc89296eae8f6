//! BLE peripheral: Nordic UART Service over trouble-host
//!
//! Advertises the NUS service, accepts one connection at a time and wires
//! the two characteristics into the bridge:
//!
//! - RX writes go straight into the ingress ring (`WriteEventHandler`)
//! - A single writer per connection drains the outbound queue into TX
//!   notifications, one whole message at a time
//!
//! While no peer is connected, queued messages are discarded with a warning.

use defmt::*;
use embassy_futures::join::join;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;
use heapless::Vec;
use nusbridge_core::{write_next, BridgeConfig, WriteEventHandler};
use nusbridge_hal::{LinkError, Notifier};
use nusbridge_protocol::uuid::service_uuid_le;
use nusbridge_protocol::MAX_NOTIFY_PAYLOAD;
use trouble_host::prelude::*;
use trouble_host::Error;

use crate::channels::{INGRESS, OUTBOUND};
use crate::fatal::fatal;

/// Max number of connections
const CONNECTIONS_MAX: usize = 1;

/// Max number of L2CAP channels (signal + att)
const L2CAP_CHANNELS_MAX: usize = 2;

type Pool = DefaultPacketPool;

/// Service UUID as carried in advertising data
const NUS_SERVICE_LE: [u8; 16] = service_uuid_le();

// GATT Server definition
#[gatt_server]
struct Server {
    nus: NordicUartService,
}

/// Nordic UART Service
#[gatt_service(uuid = "6e400001-b5a3-f393-e0a9-e50e24dcca9e")]
struct NordicUartService {
    /// Central to peripheral
    #[characteristic(uuid = "6e400002-b5a3-f393-e0a9-e50e24dcca9e", write, write_without_response)]
    rx: Vec<u8, MAX_NOTIFY_PAYLOAD>,

    /// Peripheral to central
    #[characteristic(uuid = "6e400003-b5a3-f393-e0a9-e50e24dcca9e", read, notify)]
    tx: Vec<u8, MAX_NOTIFY_PAYLOAD>,
}

/// TX characteristic notifications on one connection
struct NusNotifier<'a, 'values, 'server> {
    tx: &'a Characteristic<Vec<u8, MAX_NOTIFY_PAYLOAD>>,
    conn: &'a GattConnection<'values, 'server, Pool>,
}

impl Notifier for NusNotifier<'_, '_, '_> {
    type Error = LinkError;

    async fn notify(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        let value = Vec::from_slice(frame).map_err(|_| LinkError::FrameTooLarge)?;
        match self.tx.notify(self.conn, &value).await {
            Ok(()) => Ok(()),
            Err(Error::Disconnected) => Err(LinkError::NotConnected),
            Err(e) => {
                debug!("[nus] notify error: {:?}", Debug2Format(&e));
                Err(LinkError::Transport)
            }
        }
    }
}

/// Run the BLE stack. Never returns.
pub async fn run<C>(controller: C, address: [u8; 6], config: &BridgeConfig) -> !
where
    C: Controller,
{
    info!("[adv] advertising task starting");

    let mut resources: HostResources<Pool, CONNECTIONS_MAX, L2CAP_CHANNELS_MAX> =
        HostResources::new();
    let stack = trouble_host::new(controller, &mut resources)
        .set_random_address(Address::random(address));

    let Host {
        mut peripheral,
        runner,
        ..
    } = stack.build();

    let server = match Server::new_with_config(GapConfig::Peripheral(PeripheralConfig {
        name: config.device_name,
        appearance: &appearance::power_device::GENERIC_POWER_DEVICE,
    })) {
        Ok(server) => server,
        Err(e) => fatal("GATT server setup", Debug2Format(&e)).await,
    };

    let (never, _) = join(ble_task(runner), async {
        let mut started = false;
        loop {
            let adv = advertise(config.device_name, &mut peripheral, &server);
            let conn = match select(adv, discard_while_disconnected()).await {
                Either::First(Ok(conn)) => conn,
                Either::First(Err(e)) if !started => {
                    fatal("start advertising", Debug2Format(&e)).await
                }
                Either::First(Err(e)) => {
                    warn!("[adv] error (will retry): {:?}", Debug2Format(&e));
                    Timer::after_millis(250).await;
                    continue;
                }
                Either::Second(never) => never,
            };
            started = true;

            info!("[adv] connection established");
            let mut notifier = NusNotifier {
                tx: &server.nus.tx,
                conn: &conn,
            };
            select(
                gatt_events_task(&server, &conn),
                link_writer(&mut notifier, config.max_frame_size),
            )
            .await;

            let stale = OUTBOUND.clear();
            if stale > 0 {
                warn!("[nus] dropped {} queued messages on disconnect", stale);
            }
            info!("[adv] disconnected, advertising again");
        }
    })
    .await;
    never
}

async fn ble_task<C: Controller, P: PacketPool>(mut runner: Runner<'_, C, P>) -> ! {
    loop {
        if let Err(e) = runner.run().await {
            let e = Debug2Format(&e);
            error!("[ble_task] error: {:?}", e);
        }
    }
}

/// Feed RX writes into the ingress ring until the peer disconnects
async fn gatt_events_task(server: &Server<'_>, conn: &GattConnection<'_, '_, Pool>) {
    let reason = loop {
        match conn.next().await {
            GattConnectionEvent::Disconnected { reason } => break reason,
            GattConnectionEvent::Gatt { event } => {
                if let GattEvent::Write(write) = &event {
                    if write.handle() == server.nus.rx.handle {
                        trace!("[gatt] {} bytes from peer", write.data().len());
                        INGRESS.on_write(write.data());
                    }
                }
                match event.accept() {
                    Ok(reply) => reply.send().await,
                    Err(e) => warn!("[gatt] error sending response: {:?}", Debug2Format(&e)),
                }
            }
            _ => {}
        }
    };
    info!("[gatt] disconnected: {:?}", Debug2Format(&reason));
}

/// Single outbound writer for the connection
async fn link_writer<N: Notifier<Error = LinkError>>(notifier: &mut N, max_frame: usize) -> ! {
    loop {
        match write_next(&OUTBOUND, notifier, max_frame).await {
            Ok(frames) => trace!("[nus] message sent in {} frames", frames),
            Err(e) => warn!("[nus] message abandoned: {}", e),
        }
    }
}

/// Drop queued messages while no peer can receive them
async fn discard_while_disconnected() -> ! {
    loop {
        let message = OUTBOUND.receive().await;
        warn!("[nus] not connected, discarding {} bytes", message.len());
    }
}

async fn advertise<'values, 'server, C: Controller>(
    name: &'values str,
    peripheral: &mut Peripheral<'values, C, Pool>,
    server: &'server Server<'values>,
) -> Result<GattConnection<'values, 'server, Pool>, BleHostError<C::Error>> {
    let mut advertiser_data = [0; 31];
    let adv_len = AdStructure::encode_slice(
        &[
            AdStructure::Flags(LE_GENERAL_DISCOVERABLE | BR_EDR_NOT_SUPPORTED),
            AdStructure::ServiceUuids128(&[NUS_SERVICE_LE]),
            AdStructure::CompleteLocalName(name.as_bytes()),
        ],
        &mut advertiser_data[..],
    )?;

    let advertiser = peripheral
        .advertise(
            &Default::default(),
            Advertisement::ConnectableScannableUndirected {
                adv_data: &advertiser_data[..adv_len],
                scan_data: &[],
            },
        )
        .await?;
    info!("[adv] advertising, waiting for connection");
    let conn = advertiser.accept().await?.with_attribute_server(server)?;
    Ok(conn)
}
