//! Vigil - Wearable Motion-State Firmware
//!
//! Main firmware binary for the nRF52840 pendant. Samples the on-board
//! LSM9DS1 accelerometer on a strict 16 ms cadence, classifies two-second
//! motion windows, smooths the noisy label stream, and announces state
//! transitions over a BLE GATT characteristic.
//!
//! Named for the watchful kind of quiet: the pendant sits with its wearer
//! and speaks up only when their motion state actually changes.

#![no_std]
#![no_main]

use core::mem;

use defmt::*;
use embassy_executor::Spawner;
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::Timer;
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use vigil_drivers::imu::Lsm9ds1;
use vigil_drivers::model::EdgeImpulse;
use vigil_protocol::DEVICE_NAME;

use crate::tasks::VigilServer;

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

// GATT server lives forever; the link task holds a &'static reference
static SERVER: StaticCell<VigilServer> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Vigil firmware starting...");

    // The SoftDevice owns interrupt priorities 0, 1 and 4; everything of
    // ours stays below them
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    info!("Peripherals initialized");

    // Internal sensor bus of the board: SDA1 = P0.14, SCL1 = P0.15
    interrupt::SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0.set_priority(Priority::P3);
    let twim = Twim::new(p.TWISPI0, Irqs, p.P0_14, p.P0_15, twim::Config::default());
    let imu = Lsm9ds1::new(twim);
    info!("I2C initialized");

    // A model compiled for different window geometry would classify
    // garbage with full confidence; refuse to run
    let classifier = match EdgeImpulse::new() {
        Ok(c) => c,
        Err(e) => defmt::panic!("classifier rejected: {:?}", e),
    };
    info!("Classifier ready");

    let sd = Softdevice::enable(&softdevice_config());
    let server = SERVER.init(VigilServer::new(sd).unwrap());

    // No state announced yet
    server.sense.state_set(&0).unwrap();
    info!("SoftDevice enabled, GATT server registered");

    // The mutable borrow ends here; both BLE tasks share the SoftDevice
    let sd: &'static Softdevice = sd;

    spawner.spawn(tasks::softdevice_task(sd)).unwrap();
    spawner.spawn(tasks::sampler_task(imu)).unwrap();
    spawner.spawn(tasks::inference_task(classifier)).unwrap();
    spawner.spawn(tasks::link_task(sd, server)).unwrap();

    info!("All tasks spawned, '{}' running", DEVICE_NAME);

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// SoftDevice configuration: one peripheral connection, internal RC
/// low-frequency clock (no LF crystal required)
fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}
