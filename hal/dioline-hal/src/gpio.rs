//! GPIO pin abstractions
//!
//! Pins are addressed by an opaque [`PinId`] rather than owned pin
//! objects, so the same capability can be shared between the tick
//! interrupt and foreground code.

/// Opaque handle naming one physical pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(u8);

impl PinId {
    /// Create a handle for pin number `number`
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Board pin number behind this handle
    pub const fn number(self) -> u8 {
        self.0
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// High impedance, level can be read
    Input,
    /// Driven to the last written level
    Output,
}

/// Raw pin I/O by pin number
///
/// All methods take `&self`: implementations must be safe to call from
/// both the tick interrupt and foreground code, which on most MCUs means
/// using single-write set/clear registers rather than read-modify-write.
pub trait PinIo {
    /// Read the instantaneous electrical level of a pin (true = high)
    fn read_raw(&self, pin: PinId) -> bool;

    /// Write the output latch of a pin (true = high)
    ///
    /// Only visible on the line while the pin is in [`PinMode::Output`].
    fn drive(&self, pin: PinId, high: bool);

    /// Switch a pin between input and output
    fn set_direction(&self, pin: PinId, mode: PinMode);
}

impl<T: PinIo + ?Sized> PinIo for &T {
    fn read_raw(&self, pin: PinId) -> bool {
        (**self).read_raw(pin)
    }

    fn drive(&self, pin: PinId, high: bool) {
        (**self).drive(pin, high)
    }

    fn set_direction(&self, pin: PinId, mode: PinMode) {
        (**self).set_direction(pin, mode)
    }
}
