//! Configuration type definitions
//!
//! A channel is configured once at startup from a [`ChannelConfig`]. The
//! output drive strategy is a property of the board, so it is chosen when
//! the channel is constructed rather than here.

use dioline_hal::PinId;

use crate::input::Edge;

/// Nominal tick frequency the channel is designed for
pub const NOMINAL_TICK_HZ: u32 = 1000;

/// Actual tick rate as a fraction of nominal (976.5625 Hz / 1 kHz)
///
/// Debounce intervals are scaled by this ratio so the wall-clock debounce
/// time matches the configured milliseconds.
pub const TICK_RATE_NUM: u32 = 125;
/// Denominator of the tick rate ratio
pub const TICK_RATE_DEN: u32 = 128;

/// Ticks of overload blanking after the output turns on
pub const DEFAULT_BLANKING_TICKS: u8 = 5;

/// How "output asserted" is expressed on the pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveMode {
    /// Pin stays an output; asserted drives it high, released drives it low
    #[default]
    PushPull,
    /// Output latch held low; asserted switches the pin to output,
    /// released switches it back to input and lets the line float
    DirectionSwitched,
}

/// Channel configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// Pin sensed as the channel input
    pub input: PinId,
    /// Pin driven as the channel output
    pub output: PinId,
    /// Debounce interval in milliseconds (0 = no filtering)
    pub debounce_ms: u16,
    /// Which debounced transition increments the edge counter
    pub counted_edge: Edge,
    /// Overload blanking window after the output turns on, in ticks
    pub blanking_ticks: u8,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            input: PinId::new(0),
            output: PinId::new(1),
            debounce_ms: 0,
            counted_edge: Edge::Rising,
            blanking_ticks: DEFAULT_BLANKING_TICKS,
        }
    }
}
