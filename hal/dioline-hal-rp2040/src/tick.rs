//! Tick suspension by interrupt masking
//!
//! The channel tick runs on an embassy `InterruptExecutor`, so masking the
//! executor's NVIC line holds the tick off. A tick that comes due while
//! masked stays pending and runs as soon as the line is unmasked.

use core::sync::atomic::{compiler_fence, Ordering};

use dioline_hal::TickSource;
use embassy_rp::interrupt::{Interrupt, InterruptExt};

/// [`TickSource`] backed by one NVIC interrupt line
#[derive(Debug, Clone, Copy)]
pub struct InterruptTick {
    irq: Interrupt,
}

impl InterruptTick {
    /// Wrap the interrupt that runs the tick executor
    pub const fn new(irq: Interrupt) -> Self {
        Self { irq }
    }
}

impl TickSource for InterruptTick {
    fn suspend(&self) -> bool {
        let was_enabled = self.irq.is_enabled();
        self.irq.disable();
        // The mask must take effect before the caller touches shared state
        cortex_m::asm::dsb();
        cortex_m::asm::isb();
        compiler_fence(Ordering::SeqCst);
        was_enabled
    }

    fn restore(&self, was_enabled: bool) {
        compiler_fence(Ordering::SeqCst);
        if was_enabled {
            // SAFETY: only re-enables a line that was enabled before the
            // matching suspend, with its handler and priority unchanged.
            unsafe { self.irq.enable() };
        }
    }
}
