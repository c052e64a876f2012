//! RP2040-specific HAL for the dioline firmware
//!
//! This crate provides RP2040 implementations of the shared `dioline-hal`
//! capabilities:
//!
//! - [`gpio::SioPins`] - pin I/O through the SIO set/clear registers
//! - [`tick::InterruptTick`] - tick suspension by masking an NVIC line

#![no_std]

pub mod gpio;
pub mod tick;

pub use gpio::{bank0_pin, SioPins, GPIO_COUNT};
pub use tick::InterruptTick;

// Re-export shared traits from dioline-hal for convenience
pub use dioline_hal::{PinId, PinIo, PinMode, TickSource};
