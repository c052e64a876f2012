//! Debounce filter
//!
//! The stable level only follows the raw signal once the raw signal has
//! held the same value for the whole interval. An interval of zero turns
//! the filter into a passthrough.

use super::Edge;
use crate::config::{TICK_RATE_DEN, TICK_RATE_NUM};

/// Convert a debounce interval in milliseconds to ticks
///
/// Compensates for the tick running at 125/128 of its nominal rate:
/// `ceil(1 + 0.9765625 * ms)`, and 0 stays 0 (filter disabled).
pub fn ticks_for_ms(ms: u16) -> u16 {
    if ms == 0 {
        return 0;
    }
    let scaled = (ms as u32 * TICK_RATE_NUM).div_ceil(TICK_RATE_DEN);
    // u16::MAX ms scales to 64000 ticks, so the sum always fits
    (1 + scaled) as u16
}

/// Tick-driven debounce filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    /// Required hold time in ticks (0 = passthrough)
    interval_ticks: u16,
    /// Filtered level
    stable: bool,
    /// Last raw sample
    unstable: bool,
    /// Ticks the raw sample has matched `unstable`
    held_ticks: u16,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debouncer {
    /// Create a passthrough debouncer with a low level
    pub const fn new() -> Self {
        Self {
            interval_ticks: 0,
            stable: false,
            unstable: false,
            held_ticks: 0,
        }
    }

    /// Set the hold time from milliseconds
    pub fn set_interval_ms(&mut self, ms: u16) {
        self.interval_ticks = ticks_for_ms(ms);
    }

    /// Hold time in ticks
    pub fn interval_ticks(&self) -> u16 {
        self.interval_ticks
    }

    /// Whether filtering is disabled
    pub fn is_passthrough(&self) -> bool {
        self.interval_ticks == 0
    }

    /// Restart the filter at `raw` without reporting an edge
    ///
    /// Used when the filter is attached to a different pin.
    pub fn prime(&mut self, raw: bool) {
        self.stable = raw;
        self.unstable = raw;
        self.held_ticks = 0;
    }

    /// Current filtered level
    pub fn level(&self) -> bool {
        self.stable
    }

    /// Feed one raw sample
    ///
    /// Returns the edge of the filtered level, if this sample changed it.
    pub fn update(&mut self, raw: bool) -> Option<Edge> {
        if self.is_passthrough() {
            let previous = self.stable;
            self.prime(raw);
            return Edge::between(previous, raw);
        }

        if raw != self.unstable {
            self.unstable = raw;
            self.held_ticks = 0;
            return None;
        }

        self.held_ticks = self.held_ticks.saturating_add(1);
        if self.held_ticks >= self.interval_ticks && raw != self.stable {
            self.stable = raw;
            return Some(Edge::arriving_at(raw));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ticks_for_ms() {
        assert_eq!(ticks_for_ms(0), 0);
        assert_eq!(ticks_for_ms(1), 2);
        assert_eq!(ticks_for_ms(10), 11);
        assert_eq!(ticks_for_ms(128), 126);
        assert_eq!(ticks_for_ms(1000), 978);
        assert_eq!(ticks_for_ms(u16::MAX), 64001);
    }

    #[test]
    fn test_passthrough_follows_raw() {
        let mut deb = Debouncer::new();
        assert!(deb.is_passthrough());

        assert_eq!(deb.update(true), Some(Edge::Rising));
        assert!(deb.level());
        assert_eq!(deb.update(true), None);
        assert_eq!(deb.update(false), Some(Edge::Falling));
        assert!(!deb.level());
    }

    #[test]
    fn test_level_changes_after_hold() {
        let mut deb = Debouncer::new();
        deb.set_interval_ms(10); // 11 ticks

        // First differing sample starts the hold, 11 more complete it
        assert_eq!(deb.update(true), None);
        for _ in 0..10 {
            assert_eq!(deb.update(true), None);
            assert!(!deb.level());
        }
        assert_eq!(deb.update(true), Some(Edge::Rising));
        assert!(deb.level());

        // Holding further does not report again
        for _ in 0..20 {
            assert_eq!(deb.update(true), None);
        }
    }

    #[test]
    fn test_glitch_restarts_hold() {
        let mut deb = Debouncer::new();
        deb.set_interval_ms(3); // 4 ticks

        for _ in 0..4 {
            deb.update(true);
        }
        deb.update(false); // glitch back to the stable level
        for _ in 0..4 {
            assert_eq!(deb.update(true), None);
        }
        assert_eq!(deb.update(true), Some(Edge::Rising));
    }

    #[test]
    fn test_prime_sets_level_silently() {
        let mut deb = Debouncer::new();
        deb.set_interval_ms(5);
        deb.prime(true);

        assert!(deb.level());
        assert_eq!(deb.update(true), None);
        assert_eq!(deb.interval_ticks(), 6);
    }

    proptest! {
        #[test]
        fn prop_fast_toggling_never_changes_level(
            ms in 1u16..50,
            runs in proptest::collection::vec(1u16..1000, 1..40),
        ) {
            let mut deb = Debouncer::new();
            deb.set_interval_ms(ms);
            let interval = deb.interval_ticks();

            let mut raw = true;
            for run in runs {
                // Every run is shorter than the interval plus its first sample
                let len = 1 + run % interval;
                for _ in 0..len {
                    prop_assert_eq!(deb.update(raw), None);
                    prop_assert!(!deb.level());
                }
                raw = !raw;
            }
        }

        #[test]
        fn prop_steady_input_changes_level_once(ms in 0u16..200, extra in 0u16..100) {
            let mut deb = Debouncer::new();
            deb.set_interval_ms(ms);
            let samples = deb.interval_ticks() + 1 + extra;

            let mut edges = 0;
            for _ in 0..samples {
                if deb.update(true).is_some() {
                    edges += 1;
                }
            }
            prop_assert_eq!(edges, 1);
            prop_assert!(deb.level());
        }
    }
}
