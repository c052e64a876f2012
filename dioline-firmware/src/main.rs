//! Dioline - debounced, overload-protected digital I/O lines
//!
//! Main firmware binary for RP2040 boards. Every line is sensed and driven
//! by a `DioChannel`; a 1 kHz tick on a high-priority interrupt executor
//! keeps them updated while thread-mode tasks report what happens.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Flex, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::board::{CHANNEL_COUNT, LINES};
use crate::channels::{command_output, DIO};

mod board;
mod channels;
mod tasks;

/// Executor for the channel tick; masking its interrupt suspends the tick
static TICK_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

// GPIOs of every line, kept alive so they stay routed to SIO
static LINE_PINS: StaticCell<[Flex<'static>; 2 * CHANNEL_COUNT]> = StaticCell::new();

/// GPIO numbers of `LINE_PINS`, input then output for each line
const LINE_GPIOS: [u8; 2 * CHANNEL_COUNT] = [2, 3, 4, 5];

const _: () = {
    let mut line = 0;
    while line < CHANNEL_COUNT {
        assert!(LINES[line].channel.input.number() == LINE_GPIOS[2 * line]);
        assert!(LINES[line].channel.output.number() == LINE_GPIOS[2 * line + 1]);
        line += 1;
    }
};

#[interrupt]
unsafe fn SWI_IRQ_1() {
    TICK_EXECUTOR.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dioline firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Same order as LINE_GPIOS
    let pins = LINE_PINS.init([
        Flex::new(p.PIN_2),
        Flex::new(p.PIN_3),
        Flex::new(p.PIN_4),
        Flex::new(p.PIN_5),
    ]);
    for pin in pins.iter_mut() {
        pin.set_pull(Pull::None);
    }

    for (line, (channel, wiring)) in DIO.iter().zip(LINES.iter()).enumerate() {
        channel.configure(&wiring.channel);
        info!(
            "Line {}: in=gpio{} out=gpio{} debounce={}ms edge={}",
            line,
            wiring.channel.input.number(),
            wiring.channel.output.number(),
            wiring.channel.debounce_ms,
            wiring.channel.counted_edge
        );
    }

    for (line, wiring) in LINES.iter().enumerate() {
        if wiring.power_on {
            if let Err(e) = command_output(line, true) {
                error!("Line {}: power-on output failed: {}", line, e);
            }
        }
    }

    // Start the tick only once every line is configured
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let tick_spawner = TICK_EXECUTOR.start(interrupt::SWI_IRQ_1);
    tick_spawner.spawn(tasks::tick_task()).unwrap();

    spawner.spawn(tasks::monitor_task()).unwrap();
    spawner.spawn(tasks::report_task()).unwrap();

    info!("All tasks spawned");
}
