//! Dioline Hardware Abstraction Layer
//!
//! This crate defines the capabilities a digital I/O channel consumes
//! from the board it runs on. Chip-specific crates (RP2040, mocks for
//! host tests, simulations) implement them so the channel core never
//! touches registers itself.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware (dioline-firmware)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dioline-core (channel state machine)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dioline-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ dioline-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::PinIo`] - Raw pin reads, drive level and direction by pin number
//! - [`tick::TickSource`] - Suspend/restore of the periodic tick

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod tick;

pub use gpio::{PinId, PinIo, PinMode};
pub use tick::{with_tick_suspended, TickSource, TickSuspended};
