//! Event report task
//!
//! Logs line events over defmt.

use defmt::*;

use crate::channels::{LineEvent, EVENT_CHANNEL};

/// Report task - logs every line event
#[embassy_executor::task]
pub async fn report_task() {
    info!("Report task started");

    loop {
        match EVENT_CHANNEL.receive().await {
            LineEvent::Input { line, level, edges } => {
                info!("Line {}: input {} ({} edges)", line, level, edges);
            }
            LineEvent::Output { line, on } => {
                info!("Line {}: output {}", line, if on { "on" } else { "off" });
            }
            LineEvent::Overload { line } => {
                warn!("Line {}: output overloaded, driver shut off", line);
            }
        }
    }
}
