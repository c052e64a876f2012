//! Output driver state machine
//!
//! ```text
//!            command(on), was off
//!   ┌─────┐ ───────────────────────► ┌─────────────┐
//!   │ Off │                          │ OnBlanking  │
//!   └─────┘ ◄─────────────────────── └─────────────┘
//!      ▲  ▲        command(off)             │ countdown hits 0
//!      │  │                                 ▼
//!      │  │  command(off)          ┌──────────────┐
//!      │  └─────────────────────── │ OnMonitoring │
//!      └────────────────────────── └──────────────┘
//!         sensed line high (overload)
//! ```
//!
//! After the output turns on the sensed line may take a few ticks to
//! follow (capacitive or inductive load, relay settle), so overload
//! checking is blanked for a fixed number of ticks.

use dioline_hal::{PinId, PinIo, PinMode};
use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use crate::config::{DriveMode, DEFAULT_BLANKING_TICKS};

/// Observable state of the output driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Output released
    Off,
    /// Output asserted, overload checking suppressed
    OnBlanking,
    /// Output asserted, overload checking active
    OnMonitoring,
}

impl DriveMode {
    /// Put a freshly configured output pin into its released state
    pub fn attach<P: PinIo>(self, pins: &P, pin: PinId) {
        pins.drive(pin, false);
        match self {
            DriveMode::PushPull => pins.set_direction(pin, PinMode::Output),
            DriveMode::DirectionSwitched => pins.set_direction(pin, PinMode::Input),
        }
    }

    /// Assert or release the output pin
    pub fn apply<P: PinIo>(self, pins: &P, pin: PinId, asserted: bool) {
        match self {
            DriveMode::PushPull => pins.drive(pin, asserted),
            DriveMode::DirectionSwitched => {
                let mode = if asserted {
                    PinMode::Output
                } else {
                    PinMode::Input
                };
                pins.set_direction(pin, mode);
            }
        }
    }
}

/// Commanded output level and blanking countdown
///
/// Pure bookkeeping: the channel performs the pin operations that go with
/// each transition.
#[derive(Debug)]
pub struct OutputDriver {
    commanded: AtomicBool,
    blanking: AtomicU8,
    blanking_ticks: AtomicU8,
}

impl Default for OutputDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputDriver {
    /// Create a driver in the off state
    pub const fn new() -> Self {
        Self {
            commanded: AtomicBool::new(false),
            blanking: AtomicU8::new(0),
            blanking_ticks: AtomicU8::new(DEFAULT_BLANKING_TICKS),
        }
    }

    /// Set the blanking window loaded on each off-to-on transition
    pub fn set_blanking_ticks(&self, ticks: u8) {
        self.blanking_ticks.store(ticks, Ordering::Release);
    }

    /// Blanking window loaded on each off-to-on transition
    pub fn blanking_ticks(&self) -> u8 {
        self.blanking_ticks.load(Ordering::Acquire)
    }

    /// Ticks left before overload checking resumes
    pub fn blanking_remaining(&self) -> u8 {
        self.blanking.load(Ordering::Acquire)
    }

    /// Force the off state with no blanking pending
    pub fn reset(&self) {
        self.commanded.store(false, Ordering::Release);
        self.blanking.store(0, Ordering::Release);
    }

    /// Command the output on or off
    ///
    /// Only an off-to-on transition restarts the blanking window. Returns
    /// whether the commanded level changed.
    pub fn command(&self, on: bool) -> bool {
        let was_on = self.commanded.load(Ordering::Acquire);
        if on && !was_on {
            // Load the window before the tick can see the output on
            self.blanking
                .store(self.blanking_ticks(), Ordering::Release);
        }
        self.commanded.store(on, Ordering::Release);
        on != was_on
    }

    /// Commanded level
    pub fn is_on(&self) -> bool {
        self.commanded.load(Ordering::Acquire)
    }

    /// Current state machine state
    pub fn state(&self) -> DriverState {
        if !self.is_on() {
            DriverState::Off
        } else if self.blanking_remaining() > 0 {
            DriverState::OnBlanking
        } else {
            DriverState::OnMonitoring
        }
    }

    /// Advance one tick
    ///
    /// `sensed_high` is the raw level of the line this output drives. A
    /// tick that consumes blanking never checks for overload. Returns true
    /// if the output was forced off.
    pub fn tick(&self, sensed_high: bool) -> bool {
        let remaining = self.blanking.load(Ordering::Acquire);
        if remaining > 0 {
            self.blanking.store(remaining - 1, Ordering::Release);
            return false;
        }

        if sensed_high && self.is_on() {
            self.commanded.store(false, Ordering::Release);
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    #[derive(Default)]
    struct MockPins {
        ops: RefCell<[Option<(bool, PinMode)>; 4]>,
    }

    impl PinIo for MockPins {
        fn read_raw(&self, _pin: PinId) -> bool {
            false
        }

        fn drive(&self, pin: PinId, high: bool) {
            let mut ops = self.ops.borrow_mut();
            let mode = ops[pin.number() as usize].map_or(PinMode::Input, |(_, m)| m);
            ops[pin.number() as usize] = Some((high, mode));
        }

        fn set_direction(&self, pin: PinId, mode: PinMode) {
            let mut ops = self.ops.borrow_mut();
            let high = ops[pin.number() as usize].is_some_and(|(h, _)| h);
            ops[pin.number() as usize] = Some((high, mode));
        }
    }

    #[test]
    fn test_turn_on_starts_blanking() {
        let driver = OutputDriver::new();
        assert_eq!(driver.state(), DriverState::Off);

        assert!(driver.command(true));
        assert_eq!(driver.state(), DriverState::OnBlanking);
        assert_eq!(driver.blanking_remaining(), DEFAULT_BLANKING_TICKS);

        for _ in 0..DEFAULT_BLANKING_TICKS {
            assert!(!driver.tick(true));
        }
        assert_eq!(driver.state(), DriverState::OnMonitoring);
    }

    #[test]
    fn test_overload_after_blanking() {
        let driver = OutputDriver::new();
        driver.command(true);

        for _ in 0..DEFAULT_BLANKING_TICKS {
            driver.tick(false);
        }
        assert!(!driver.tick(false));
        assert!(driver.tick(true));
        assert_eq!(driver.state(), DriverState::Off);

        // Already off, nothing more to trip
        assert!(!driver.tick(true));
    }

    #[test]
    fn test_on_while_on_keeps_window() {
        let driver = OutputDriver::new();
        driver.command(true);
        driver.tick(false);
        driver.tick(false);

        assert!(!driver.command(true));
        assert_eq!(driver.blanking_remaining(), DEFAULT_BLANKING_TICKS - 2);
    }

    #[test]
    fn test_off_while_off_is_not_a_change() {
        let driver = OutputDriver::new();
        assert!(!driver.command(false));
        driver.command(true);
        assert!(driver.command(false));
        assert!(!driver.command(false));
    }

    #[test]
    fn test_zero_blanking_monitors_immediately() {
        let driver = OutputDriver::new();
        driver.set_blanking_ticks(0);
        driver.command(true);
        assert_eq!(driver.state(), DriverState::OnMonitoring);
        assert!(driver.tick(true));
    }

    #[test]
    fn test_reset() {
        let driver = OutputDriver::new();
        driver.command(true);
        driver.reset();
        assert_eq!(driver.state(), DriverState::Off);
        assert_eq!(driver.blanking_remaining(), 0);
    }

    #[test]
    fn test_push_pull_drive() {
        let pins = MockPins::default();
        let pin = PinId::new(2);

        DriveMode::PushPull.attach(&pins, pin);
        assert_eq!(pins.ops.borrow()[2], Some((false, PinMode::Output)));

        DriveMode::PushPull.apply(&pins, pin, true);
        assert_eq!(pins.ops.borrow()[2], Some((true, PinMode::Output)));
    }

    #[test]
    fn test_direction_switched_drive() {
        let pins = MockPins::default();
        let pin = PinId::new(3);

        DriveMode::DirectionSwitched.attach(&pins, pin);
        assert_eq!(pins.ops.borrow()[3], Some((false, PinMode::Input)));

        // Asserting pulls the line low by enabling the output
        DriveMode::DirectionSwitched.apply(&pins, pin, true);
        assert_eq!(pins.ops.borrow()[3], Some((false, PinMode::Output)));

        DriveMode::DirectionSwitched.apply(&pins, pin, false);
        assert_eq!(pins.ops.borrow()[3], Some((false, PinMode::Input)));
    }
}
