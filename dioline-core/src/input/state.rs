//! Debounced level, edge counter and level latches
//!
//! Written by the tick, read by foreground code. Every field is its own
//! atomic so single-field reads never need the tick suspended; anything
//! that must see or clear several fields together is up to the caller.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use super::Edge;

/// Tick-owned input state of a channel
#[derive(Debug)]
pub struct InputState {
    level: AtomicBool,
    edge_count: AtomicU32,
    count_falling: AtomicBool,
    high_latched: AtomicBool,
    low_latched: AtomicBool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Create a zeroed state counting rising edges
    pub const fn new() -> Self {
        Self {
            level: AtomicBool::new(false),
            edge_count: AtomicU32::new(0),
            count_falling: AtomicBool::new(false),
            high_latched: AtomicBool::new(false),
            low_latched: AtomicBool::new(false),
        }
    }

    /// Record one debounced sample
    ///
    /// Counts `edge` if it matches the counted polarity, latches the level
    /// and returns whether the level differs from the previous sample.
    pub fn record(&self, level: bool, edge: Option<Edge>) -> bool {
        if edge == Some(self.counted_edge()) {
            // Wraps to 0 after u32::MAX
            self.edge_count.fetch_add(1, Ordering::AcqRel);
        }

        if level {
            self.high_latched.store(true, Ordering::Release);
        } else {
            self.low_latched.store(true, Ordering::Release);
        }

        self.level.swap(level, Ordering::AcqRel) != level
    }

    /// Last recorded debounced level
    pub fn level(&self) -> bool {
        self.level.load(Ordering::Acquire)
    }

    /// Select which edge is counted
    pub fn set_counted_edge(&self, edge: Edge) {
        self.count_falling
            .store(edge == Edge::Falling, Ordering::Release);
    }

    /// Edge polarity being counted
    pub fn counted_edge(&self) -> Edge {
        if self.count_falling.load(Ordering::Acquire) {
            Edge::Falling
        } else {
            Edge::Rising
        }
    }

    /// Number of counted edges, wrapping at 2^32
    pub fn edge_count(&self) -> u32 {
        self.edge_count.load(Ordering::Acquire)
    }

    /// Read the counter and zero it in one step
    pub fn take_edge_count(&self) -> u32 {
        self.edge_count.swap(0, Ordering::AcqRel)
    }

    /// Whether the level has been high since the last clear
    pub fn high_latched(&self) -> bool {
        self.high_latched.load(Ordering::Acquire)
    }

    /// Whether the level has been low since the last clear
    pub fn low_latched(&self) -> bool {
        self.low_latched.load(Ordering::Acquire)
    }

    /// Clear both latches
    pub fn clear_latches(&self) {
        self.high_latched.store(false, Ordering::Release);
        self.low_latched.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_counts_configured_polarity_only() {
        let state = InputState::new();

        state.record(true, Some(Edge::Rising));
        state.record(false, Some(Edge::Falling));
        state.record(true, Some(Edge::Rising));
        assert_eq!(state.edge_count(), 2);

        state.set_counted_edge(Edge::Falling);
        state.record(false, Some(Edge::Falling));
        state.record(true, Some(Edge::Rising));
        assert_eq!(state.edge_count(), 3);
    }

    #[test]
    fn test_no_edge_no_count() {
        let state = InputState::new();
        for _ in 0..10 {
            state.record(true, None);
        }
        assert_eq!(state.edge_count(), 0);
    }

    #[test]
    fn test_latches_are_sticky() {
        let state = InputState::new();

        state.record(true, Some(Edge::Rising));
        state.record(false, Some(Edge::Falling));
        assert!(state.high_latched());
        assert!(state.low_latched());

        state.clear_latches();
        assert!(!state.high_latched());
        assert!(!state.low_latched());

        state.record(false, None);
        assert!(!state.high_latched());
        assert!(state.low_latched());
    }

    #[test]
    fn test_record_reports_level_change() {
        let state = InputState::new();
        assert!(!state.record(false, None));
        assert!(state.record(true, Some(Edge::Rising)));
        assert!(!state.record(true, None));
        assert!(state.level());
    }

    #[test]
    fn test_counter_wraps() {
        let state = InputState::new();
        state.edge_count.store(u32::MAX, Ordering::Relaxed);
        state.record(true, Some(Edge::Rising));
        assert_eq!(state.edge_count(), 0);
    }

    #[test]
    fn test_take_edge_count() {
        let state = InputState::new();
        state.record(true, Some(Edge::Rising));
        assert_eq!(state.take_edge_count(), 1);
        assert_eq!(state.edge_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_counts_every_rising_edge(n in 0u32..500) {
            let state = InputState::new();
            for _ in 0..n {
                state.record(true, Some(Edge::Rising));
                state.record(false, Some(Edge::Falling));
            }
            prop_assert_eq!(state.edge_count(), n);
        }
    }
}
