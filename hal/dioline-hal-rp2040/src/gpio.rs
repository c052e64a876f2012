//! GPIO access through the single-cycle IO block
//!
//! SIO has dedicated set/clear/read registers for the output latch and the
//! output enable, so each operation is one bus write and needs no
//! read-modify-write. That makes [`SioPins`] safe to use from the tick
//! interrupt and foreground code at the same time.
//!
//! The pins must already be routed to SIO (for example by creating an
//! embassy `Flex` for each one and keeping it alive).

use dioline_hal::{PinId, PinIo, PinMode};
use embassy_rp::pac;

/// Number of user GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Validate a pin number from board configuration
///
/// Returns `None` for pins outside bank 0.
pub const fn bank0_pin(number: u8) -> Option<PinId> {
    if number < GPIO_COUNT {
        Some(PinId::new(number))
    } else {
        None
    }
}

fn mask(pin: PinId) -> u32 {
    debug_assert!(pin.number() < GPIO_COUNT);
    1 << pin.number()
}

/// [`PinIo`] over the RP2040 SIO block
#[derive(Debug, Clone, Copy, Default)]
pub struct SioPins;

impl PinIo for SioPins {
    fn read_raw(&self, pin: PinId) -> bool {
        pac::SIO.gpio_in(0).read() & mask(pin) != 0
    }

    fn drive(&self, pin: PinId, high: bool) {
        let out = pac::SIO.gpio_out(0);
        if high {
            out.value_set().write_value(mask(pin));
        } else {
            out.value_clr().write_value(mask(pin));
        }
    }

    fn set_direction(&self, pin: PinId, mode: PinMode) {
        let oe = pac::SIO.gpio_oe(0);
        match mode {
            PinMode::Output => oe.value_set().write_value(mask(pin)),
            PinMode::Input => oe.value_clr().write_value(mask(pin)),
        }
    }
}
