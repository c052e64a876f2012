//! Board wiring
//!
//! Each line is one screw terminal: the output transistor pulls the
//! terminal low and a separate GPIO senses it.

use dioline_core::config::DEFAULT_BLANKING_TICKS;
use dioline_core::{ChannelConfig, DriveMode, Edge, PinId};
use dioline_hal_rp2040::bank0_pin;

/// Number of I/O lines on the board
pub const CHANNEL_COUNT: usize = 2;

/// Output stage of this board revision
///
/// Boards that assert by switching the pin to output use
/// `DriveMode::DirectionSwitched`.
pub const DRIVE_MODE: DriveMode = DriveMode::PushPull;

// Debounce intervals are converted with the 125/128 tick-rate correction,
// but the embassy ticker here runs at exactly NOMINAL_TICK_HZ. Effective
// debounce times are therefore about 2.3% shorter than configured.

/// GPIO number checked against bank 0 at compile time
const fn gpio(number: u8) -> PinId {
    match bank0_pin(number) {
        Some(pin) => pin,
        None => panic!("line pin outside GPIO bank 0"),
    }
}

/// One line of the board
pub struct LineConfig {
    /// Channel configuration applied at boot
    pub channel: ChannelConfig,
    /// Assert the output right after boot
    pub power_on: bool,
}

/// Line table, indexed by line number
pub const LINES: [LineConfig; CHANNEL_COUNT] = [
    LineConfig {
        channel: ChannelConfig {
            input: gpio(2),
            output: gpio(3),
            debounce_ms: 10,
            counted_edge: Edge::Rising,
            blanking_ticks: DEFAULT_BLANKING_TICKS,
        },
        power_on: false,
    },
    LineConfig {
        channel: ChannelConfig {
            input: gpio(4),
            output: gpio(5),
            debounce_ms: 0,
            counted_edge: Edge::Falling,
            blanking_ticks: DEFAULT_BLANKING_TICKS,
        },
        power_on: true,
    },
];
