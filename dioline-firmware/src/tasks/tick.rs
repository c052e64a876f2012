//! Channel tick task
//!
//! Runs on the interrupt executor behind [`TICK`](crate::channels::TICK),
//! so masking that interrupt suspends it.

use defmt::*;
use dioline_core::config::NOMINAL_TICK_HZ;
use embassy_time::{Duration, Ticker};

use crate::channels::DIO;

/// Tick task - updates every channel once per period
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started at {} Hz", NOMINAL_TICK_HZ);

    let mut ticker = Ticker::every(Duration::from_hz(NOMINAL_TICK_HZ as u64));
    let mut reported = false;

    loop {
        ticker.next().await;

        for (line, channel) in DIO.iter().enumerate() {
            if let Err(e) = channel.tick() {
                // Report once, not 1000 times a second
                if !reported {
                    error!("Line {} ticked before configuration: {}", line, e);
                    reported = true;
                }
            }
        }
    }
}
