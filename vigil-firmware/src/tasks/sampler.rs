//! Accelerometer sampling task
//!
//! Owns the rolling window. Each sampling period: read one triple, clamp
//! and convert it, roll it into the window, publish a snapshot for the
//! inference task. The schedule sleeps until an absolute deadline and
//! advances by exactly one period, so a late cycle fires immediately and
//! the grid never drifts.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::twim::Twim;
use embassy_time::{Instant, Timer};

use vigil_core::cadence::Cadence;
use vigil_core::config::{AXES, SAMPLE_INTERVAL_MS};
use vigil_core::limits::condition;
use vigil_core::window::RollingWindow;
use vigil_drivers::imu::Lsm9ds1;

use crate::channels::{DROPPED_WINDOWS, MISSED_DEADLINES, WINDOW_SLOT};

/// Consecutive read failures before the sampler stops talking to the IMU
const READ_FAULT_LIMIT: u32 = 10;

#[embassy_executor::task]
pub async fn sampler_task(mut imu: Lsm9ds1<Twim<'static, TWISPI0>>) {
    info!("Sampler task started");

    // IMU failure is degraded, not fatal: the cadence keeps running and
    // feeds zero triples so the rest of the pipeline stays on schedule
    let mut healthy = match imu.init().await {
        Ok(()) => {
            info!("IMU ready");
            true
        }
        Err(e) => {
            error!("IMU init failed: {:?}, sampling zeros", e);
            false
        }
    };
    let mut read_faults: u32 = 0;

    let mut window = RollingWindow::new();
    let mut cadence = Cadence::start(Instant::now().as_micros(), SAMPLE_INTERVAL_MS * 1_000);
    let mut reported_misses: u32 = 0;

    loop {
        let wake = cadence.next_wake(Instant::now().as_micros());
        if cadence.missed() != reported_misses {
            reported_misses = cadence.missed();
            MISSED_DEADLINES.store(reported_misses, Ordering::Relaxed);
            warn!("sampling deadline missed ({} total)", reported_misses);
        }
        Timer::at(Instant::from_micros(wake)).await;

        let triple: [f32; AXES] = if healthy {
            match imu.read_acceleration().await {
                Ok(t) => {
                    read_faults = 0;
                    t
                }
                Err(e) => {
                    read_faults += 1;
                    if read_faults >= READ_FAULT_LIMIT {
                        error!("IMU read failing ({:?}), sampling zeros", e);
                        healthy = false;
                    }
                    [0.0; AXES]
                }
            }
        } else {
            [0.0; AXES]
        };

        window.push_triple(condition(triple));

        let displaced = WINDOW_SLOT.lock(|slot| slot.borrow_mut().publish(window.as_array()));
        if displaced {
            // Normal whenever inference runs slower than sampling; counted,
            // not logged
            DROPPED_WINDOWS.fetch_add(1, Ordering::Relaxed);
        }
    }
}
