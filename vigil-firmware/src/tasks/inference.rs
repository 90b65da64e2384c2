//! Window classification task
//!
//! Takes completed windows from the handoff slot on a best-effort period,
//! runs the classifier, smooths the label stream, and stages state
//! transitions for the link task. A failed cycle is logged and abandoned;
//! the next window gets a fresh attempt.

use defmt::*;
use embassy_time::Timer;

use vigil_core::config::{INFERENCE_INTERVAL_MS, STARTUP_DELAY_MS};
use vigil_core::pipeline::classify_window;
use vigil_core::smoothing::Smoother;
use vigil_drivers::model::EdgeImpulse;

use crate::channels::{PUBLISHER, WINDOW_SLOT};

#[embassy_executor::task]
pub async fn inference_task(mut classifier: EdgeImpulse) {
    info!("Inference task started, first poll in {} ms", STARTUP_DELAY_MS);

    // Let the first full window accumulate before classifying anything
    Timer::after_millis(STARTUP_DELAY_MS).await;

    let mut smoother = Smoother::new();

    loop {
        match WINDOW_SLOT.lock(|slot| slot.borrow_mut().take()) {
            Some(window) => {
                match classify_window(&mut classifier, &mut smoother, &window) {
                    Ok(proposal) => {
                        let staged = PUBLISHER.lock(|p| p.borrow_mut().propose(proposal));
                        match proposal {
                            Some(code) if staged => info!("transition staged: {:?}", code),
                            _ => trace!("no state change"),
                        }
                    }
                    Err(e) => warn!("classification failed ({:?}), cycle skipped", e),
                }
            }
            None => trace!("no fresh window"),
        }

        Timer::after_millis(INFERENCE_INTERVAL_MS).await;
    }
}
