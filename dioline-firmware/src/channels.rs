//! Channel instances and inter-task communication
//!
//! The I/O channels are plain statics shared by the tick interrupt and the
//! thread-mode tasks; events for logging go through an embassy-sync
//! channel.

use embassy_rp::interrupt;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::{AtomicBool, Ordering};

use dioline_core::{ChannelError, DioChannel};
use dioline_hal_rp2040::{InterruptTick, SioPins};

use crate::board::{CHANNEL_COUNT, DRIVE_MODE};

/// Channel capacity for line events
const EVENT_CHANNEL_SIZE: usize = 8;

/// Tick source shared by all lines (the high-priority executor's interrupt)
pub const TICK: InterruptTick = InterruptTick::new(interrupt::SWI_IRQ_1);

/// A channel as wired on this board
pub type BoardChannel = DioChannel<SioPins, InterruptTick>;

/// One channel per board line
pub static DIO: [BoardChannel; CHANNEL_COUNT] =
    [const { DioChannel::new(SioPins, TICK, DRIVE_MODE) }; CHANNEL_COUNT];

/// Output level last commanded by firmware, per line
///
/// Lets the monitor tell an overload trip from a commanded turn-off.
static COMMANDED: [AtomicBool; CHANNEL_COUNT] = [const { AtomicBool::new(false) }; CHANNEL_COUNT];

/// Something observable happened on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineEvent {
    /// Debounced input changed
    Input { line: u8, level: bool, edges: u32 },
    /// Output followed a command
    Output { line: u8, on: bool },
    /// Output was shut off by the overload check
    Overload { line: u8 },
}

/// Line events for the report task
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, LineEvent, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Command a line's output and remember the command
pub fn command_output(line: usize, on: bool) -> Result<(), ChannelError> {
    COMMANDED[line].store(on, Ordering::Release);
    DIO[line].set_output(on)
}

/// Whether firmware last commanded `line` on
pub fn commanded(line: usize) -> bool {
    COMMANDED[line].load(Ordering::Acquire)
}

/// Forget a command after the output tripped
pub fn acknowledge_trip(line: usize) {
    COMMANDED[line].store(false, Ordering::Release);
}
