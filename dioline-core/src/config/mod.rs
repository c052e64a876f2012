//! Configuration types and timing constants

pub mod types;

pub use types::{
    ChannelConfig, DriveMode, DEFAULT_BLANKING_TICKS, NOMINAL_TICK_HZ, TICK_RATE_DEN,
    TICK_RATE_NUM,
};
