//! BLE link task
//!
//! Advertises the pendant, serves the motion-state GATT characteristic,
//! and delivers staged transitions to the connected peer. One connection
//! at a time; advertising resumes after disconnect. While no peer is
//! connected the newest staged transition is held, not discarded.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker, Timer};
use nrf_softdevice::ble::{gatt_server, peripheral, Connection};
use nrf_softdevice::Softdevice;

use vigil_protocol::{DEVICE_NAME, SERVICE_UUID_LE};

use crate::channels::{DROPPED_WINDOWS, MISSED_DEADLINES, PUBLISHER};

/// How often staged transitions are polled while a peer is connected
const LINK_POLL_INTERVAL_MS: u64 = 100;

// UUID literals mirror vigil_protocol::SERVICE_UUID and
// STATE_CHARACTERISTIC_UUID; the attribute macro needs them spelled out
#[nrf_softdevice::gatt_service(uuid = "c38a205a-5dc3-4126-86d1-487028603576")]
pub struct SenseService {
    #[characteristic(uuid = "c38a205a-5dc3-4126-86d1-487028603576", read, notify)]
    pub state: i32,
}

/// GATT server carrying the single motion-state service
#[nrf_softdevice::gatt_server]
pub struct VigilServer {
    pub sense: SenseService,
}

/// SoftDevice event loop; BLE stops without it
#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

const ADV_LEN: usize = 3 + 2 + SERVICE_UUID_LE.len() + 2 + DEVICE_NAME.len();
const SCAN_LEN: usize = 2 + DEVICE_NAME.len();

/// Advertising payload: flags, the service UUID, the complete local name
const fn adv_payload() -> [u8; ADV_LEN] {
    let mut data = [0u8; ADV_LEN];
    // Flags: LE general discoverable, BR/EDR unsupported
    data[0] = 0x02;
    data[1] = 0x01;
    data[2] = 0x06;
    // Complete list of 128-bit service UUIDs
    data[3] = (SERVICE_UUID_LE.len() + 1) as u8;
    data[4] = 0x07;
    let mut i = 0;
    while i < SERVICE_UUID_LE.len() {
        data[5 + i] = SERVICE_UUID_LE[i];
        i += 1;
    }
    // Complete local name
    let name = DEVICE_NAME.as_bytes();
    let base = 5 + SERVICE_UUID_LE.len();
    data[base] = (name.len() + 1) as u8;
    data[base + 1] = 0x09;
    let mut j = 0;
    while j < name.len() {
        data[base + 2 + j] = name[j];
        j += 1;
    }
    data
}

/// Scan-response payload: the name again, for scanners that only read this
const fn scan_payload() -> [u8; SCAN_LEN] {
    let mut data = [0u8; SCAN_LEN];
    let name = DEVICE_NAME.as_bytes();
    data[0] = (name.len() + 1) as u8;
    data[1] = 0x09;
    let mut i = 0;
    while i < name.len() {
        data[2 + i] = name[i];
        i += 1;
    }
    data
}

static ADV_DATA: [u8; ADV_LEN] = adv_payload();
static SCAN_DATA: [u8; SCAN_LEN] = scan_payload();

/// Advertise, serve one connection, repeat
#[embassy_executor::task]
pub async fn link_task(sd: &'static Softdevice, server: &'static VigilServer) {
    info!("Link task started, advertising as '{}'", DEVICE_NAME);

    let config = peripheral::Config::default();

    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };

        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("advertising failed: {:?}", e);
                Timer::after_secs(1).await;
                continue;
            }
        };

        info!(
            "peer connected: {:?} (missed deadlines: {}, dropped windows: {})",
            conn.peer_address(),
            MISSED_DEADLINES.load(Ordering::Relaxed),
            DROPPED_WINDOWS.load(Ordering::Relaxed),
        );

        let gatt = gatt_server::run(&conn, server, |e| match e {
            VigilServerEvent::Sense(SenseServiceEvent::StateCccdWrite { notifications }) => {
                info!(
                    "state notifications {}",
                    if notifications { "enabled" } else { "disabled" }
                );
            }
        });
        let deliver = deliver_states(server, &conn);

        match select(gatt, deliver).await {
            Either::First(e) => info!("peer disconnected: {:?}", e),
            Either::Second(()) => warn!("state delivery stopped"),
        }
    }
}

/// Poll for staged transitions and push them to the peer
///
/// The connected poll here is the only place a pending transition is
/// committed and cleared.
async fn deliver_states(server: &VigilServer, conn: &Connection) {
    let mut ticker = Ticker::every(Duration::from_millis(LINK_POLL_INTERVAL_MS));
    loop {
        ticker.next().await;

        let staged = PUBLISHER.lock(|p| p.borrow_mut().poll(true));
        if let Some(code) = staged {
            let value = code.to_wire();
            if let Err(e) = server.sense.state_set(&value) {
                warn!("state attribute write failed: {:?}", e);
            }
            // Best effort: the peer may not have notifications on yet, and
            // can still read the attribute
            match server.sense.state_notify(conn, &value) {
                Ok(()) => {
                    if code.is_alert() {
                        warn!("alert state announced: {:?} (wire {})", code, value);
                    } else {
                        info!("state announced: {:?} (wire {})", code, value);
                    }
                }
                Err(e) => info!("notify skipped: {:?}", e),
            }
        }
    }
}
