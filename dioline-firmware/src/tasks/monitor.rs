//! Change monitor task
//!
//! Polls each line's change flag and turns changes into [`LineEvent`]s.
//! An output that reads off while firmware last commanded it on has been
//! shut off by the overload check.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::board::CHANNEL_COUNT;
use crate::channels::{acknowledge_trip, commanded, LineEvent, DIO, EVENT_CHANNEL};

/// Poll interval in milliseconds
pub const MONITOR_INTERVAL_MS: u64 = 10;

#[derive(Clone, Copy, Default)]
struct Snapshot {
    input: bool,
    output: bool,
}

/// Monitor task - reports line changes
#[embassy_executor::task]
pub async fn monitor_task() {
    info!("Monitor task started");

    let mut ticker = Ticker::every(Duration::from_millis(MONITOR_INTERVAL_MS));
    let mut last = [Snapshot::default(); CHANNEL_COUNT];

    loop {
        ticker.next().await;

        for (line, channel) in DIO.iter().enumerate() {
            if !channel.take_changed() {
                continue;
            }

            let input = match channel.input_level() {
                Ok(level) => level,
                Err(e) => {
                    warn!("Line {} input unavailable: {}", line, e);
                    continue;
                }
            };
            let now = Snapshot {
                input,
                output: channel.output_level(),
            };
            let id = line as u8;

            if now.input != last[line].input {
                let edges = channel.read_counter();
                EVENT_CHANNEL
                    .send(LineEvent::Input {
                        line: id,
                        level: now.input,
                        edges,
                    })
                    .await;
            }

            if now.output != last[line].output || (!now.output && commanded(line)) {
                let event = if !now.output && commanded(line) {
                    acknowledge_trip(line);
                    LineEvent::Overload { line: id }
                } else {
                    LineEvent::Output {
                        line: id,
                        on: now.output,
                    }
                };
                EVENT_CHANNEL.send(event).await;
            }

            last[line] = now;
        }
    }
}
