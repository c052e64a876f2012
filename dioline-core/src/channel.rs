//! Bidirectional digital I/O channel
//!
//! One physical terminal, sensed through an input pin and driven through an
//! output pin. The periodic [`tick`](DioChannel::tick) runs in interrupt
//! context at [`NOMINAL_TICK_HZ`](crate::config::NOMINAL_TICK_HZ); every
//! other method is foreground code.
//!
//! # Concurrency
//!
//! The tick is the only writer of the debounced level, edge counter,
//! latches, blanking countdown and the overload trip. Those fields are
//! atomics, so single reads are always safe. Foreground sequences that
//! touch several of them (counter read/reset, latch clear, output command,
//! configuration) run with the tick source suspended and restore it to
//! whatever state it was in before.

use core::cell::Cell;

use critical_section::Mutex;
use dioline_hal::{with_tick_suspended, PinId, PinIo, PinMode, TickSource};
use portable_atomic::{AtomicU16, Ordering};

use crate::config::{ChannelConfig, DriveMode};
use crate::error::ChannelError;
use crate::input::{Debouncer, Edge, InputState};
use crate::notify::ChangeFlag;
use crate::output::{DriverState, OutputDriver};

#[derive(Debug, Clone, Copy)]
struct Wiring {
    input: Option<PinId>,
    output: Option<PinId>,
}

/// Both level latches read together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LatchStatus {
    /// Input was high at some tick since the last clear
    pub high: bool,
    /// Input was low at some tick since the last clear
    pub low: bool,
}

/// Debounced input plus overload-protected output on one line
pub struct DioChannel<P, T> {
    pins: P,
    tick_source: T,
    drive: DriveMode,
    wiring: Mutex<Cell<Wiring>>,
    debouncer: Mutex<Cell<Debouncer>>,
    debounce_ms: AtomicU16,
    input: InputState,
    output: OutputDriver,
    change: ChangeFlag,
}

impl<P, T> DioChannel<P, T> {
    /// Create an unconfigured channel
    ///
    /// `drive` selects how the board asserts the output. The channel must
    /// be configured with [`configure`](Self::configure) (or the individual
    /// setters) before the tick starts.
    pub const fn new(pins: P, tick_source: T, drive: DriveMode) -> Self {
        Self {
            pins,
            tick_source,
            drive,
            wiring: Mutex::new(Cell::new(Wiring {
                input: None,
                output: None,
            })),
            debouncer: Mutex::new(Cell::new(Debouncer::new())),
            debounce_ms: AtomicU16::new(0),
            input: InputState::new(),
            output: OutputDriver::new(),
            change: ChangeFlag::new(),
        }
    }

}

impl<P: PinIo, T: TickSource> DioChannel<P, T> {
    /// Apply a complete configuration
    pub fn configure(&self, config: &ChannelConfig) {
        with_tick_suspended(&self.tick_source, || {
            self.output.set_blanking_ticks(config.blanking_ticks);
            self.set_output_pin(config.output);
            self.set_debounce_ms(config.debounce_ms);
            self.set_input_pin(config.input);
            self.set_counted_edge(config.counted_edge);
        });
    }

    /// Attach the input side to `pin`
    ///
    /// The pin becomes an input and the debounce filter restarts from its
    /// current level without counting an edge.
    pub fn set_input_pin(&self, pin: PinId) {
        with_tick_suspended(&self.tick_source, || {
            self.pins.set_direction(pin, PinMode::Input);
            let raw = self.pins.read_raw(pin);

            critical_section::with(|cs| {
                let wiring = self.wiring.borrow(cs);
                wiring.set(Wiring {
                    input: Some(pin),
                    ..wiring.get()
                });

                let cell = self.debouncer.borrow(cs);
                let mut debouncer = cell.get();
                debouncer.prime(raw);
                cell.set(debouncer);
            });
        });

        #[cfg(feature = "defmt")]
        defmt::debug!("dio input on pin {}", pin.number());
    }

    /// Attach the output side to `pin`
    ///
    /// Any previously attached output pin is released, and the new one
    /// starts released with no blanking pending. Dropping an asserted
    /// output sets the change flag.
    pub fn set_output_pin(&self, pin: PinId) {
        with_tick_suspended(&self.tick_source, || {
            if let Some(previous) = self.wiring().output {
                self.drive.apply(&self.pins, previous, false);
            }
            let was_on = self.output.is_on();
            self.output.reset();
            if was_on {
                self.change.set();
            }
            self.drive.attach(&self.pins, pin);

            critical_section::with(|cs| {
                let wiring = self.wiring.borrow(cs);
                wiring.set(Wiring {
                    output: Some(pin),
                    ..wiring.get()
                });
            });
        });

        #[cfg(feature = "defmt")]
        defmt::debug!("dio output on pin {} ({})", pin.number(), self.drive);
    }

    /// Set the debounce interval in milliseconds (0 disables filtering)
    pub fn set_debounce_ms(&self, ms: u16) {
        with_tick_suspended(&self.tick_source, || {
            self.debounce_ms.store(ms, Ordering::Release);
            critical_section::with(|cs| {
                let cell = self.debouncer.borrow(cs);
                let mut debouncer = cell.get();
                debouncer.set_interval_ms(ms);
                cell.set(debouncer);
            });
        });
    }

    /// Debounce interval as configured, in milliseconds
    pub fn debounce_ms(&self) -> u16 {
        self.debounce_ms.load(Ordering::Acquire)
    }

    /// Select which debounced edge increments the counter
    pub fn set_counted_edge(&self, edge: Edge) {
        self.input.set_counted_edge(edge);
    }

    /// Edge polarity being counted
    pub fn counted_edge(&self) -> Edge {
        self.input.counted_edge()
    }

    /// Number of counted edges since the last reset
    ///
    /// The counter wraps to 0 after `u32::MAX` edges.
    pub fn read_counter(&self) -> u32 {
        with_tick_suspended(&self.tick_source, || self.input.edge_count())
    }

    /// Zero the edge counter
    pub fn reset_counter(&self) {
        with_tick_suspended(&self.tick_source, || {
            self.input.take_edge_count();
        });
    }

    /// Read and zero the edge counter in one critical section
    ///
    /// Unlike `read_counter` followed by `reset_counter`, no edge can be
    /// counted between the read and the reset and then discarded.
    pub fn take_counter(&self) -> u32 {
        with_tick_suspended(&self.tick_source, || self.input.take_edge_count())
    }

    /// Logical input level
    ///
    /// With filtering disabled this reads the pin directly; otherwise it is
    /// the level from the most recent tick.
    pub fn input_level(&self) -> Result<bool, ChannelError> {
        let input = self.wiring().input.ok_or(ChannelError::InputNotConfigured)?;
        if self.debounce_ms() == 0 {
            Ok(self.pins.read_raw(input))
        } else {
            Ok(self.input.level())
        }
    }

    /// Commanded output level
    ///
    /// Reads false after an overload trip even though nobody commanded the
    /// output off.
    pub fn output_level(&self) -> bool {
        self.output.is_on()
    }

    /// Output driver state
    pub fn output_state(&self) -> DriverState {
        self.output.state()
    }

    /// Whether the input has been high since the last latch clear
    pub fn high_latched(&self) -> bool {
        self.input.high_latched()
    }

    /// Whether the input has been low since the last latch clear
    pub fn low_latched(&self) -> bool {
        self.input.low_latched()
    }

    /// Read both latches from the same tick
    pub fn latch_status(&self) -> LatchStatus {
        with_tick_suspended(&self.tick_source, || LatchStatus {
            high: self.input.high_latched(),
            low: self.input.low_latched(),
        })
    }

    /// Clear both level latches
    pub fn clear_latches(&self) {
        with_tick_suspended(&self.tick_source, || self.input.clear_latches());
    }

    /// Command the output on or off
    ///
    /// Turning on from off restarts the overload blanking window. The change
    /// flag is set only if the commanded level actually changed.
    pub fn set_output(&self, on: bool) -> Result<(), ChannelError> {
        let output = self
            .wiring()
            .output
            .ok_or(ChannelError::OutputNotConfigured)?;

        with_tick_suspended(&self.tick_source, || {
            let changed = self.output.command(on);
            self.drive.apply(&self.pins, output, on);
            if changed {
                self.change.set();
            }
        });

        Ok(())
    }

    /// Periodic update, called once per tick from interrupt context
    ///
    /// Runs the debounce filter, edge counter, latches and overload check,
    /// in that order. The overload check uses this tick's raw sample rather
    /// than the debounced level.
    pub fn tick(&self) -> Result<(), ChannelError> {
        let wiring = self.wiring();
        let input = wiring.input.ok_or(ChannelError::InputNotConfigured)?;
        let raw = self.pins.read_raw(input);

        let (level, edge) = critical_section::with(|cs| {
            let cell = self.debouncer.borrow(cs);
            let mut debouncer = cell.get();
            let edge = debouncer.update(raw);
            cell.set(debouncer);
            (debouncer.level(), edge)
        });

        if self.input.record(level, edge) {
            self.change.set();
        }

        if self.output.tick(raw) {
            if let Some(output) = wiring.output {
                self.drive.apply(&self.pins, output, false);
                #[cfg(feature = "defmt")]
                defmt::warn!("dio output on pin {} overloaded, forced off", output.number());
            }
            self.change.set();
        }

        Ok(())
    }

    /// Whether anything observable changed since the flag was last cleared
    pub fn changed(&self) -> bool {
        self.change.is_set()
    }

    /// Clear the change flag
    pub fn clear_changed(&self) {
        self.change.clear();
    }

    /// Return the change flag and clear it atomically
    pub fn take_changed(&self) -> bool {
        self.change.take()
    }

    fn wiring(&self) -> Wiring {
        critical_section::with(|cs| self.wiring.borrow(cs).get())
    }
}
