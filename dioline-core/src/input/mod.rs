//! Input side of the channel
//!
//! Raw samples go through the [`Debouncer`]; the resulting level and edges
//! feed the counter and sticky latches held in [`InputState`].

pub mod debounce;
pub mod state;

pub use debounce::{ticks_for_ms, Debouncer};
pub use state::InputState;

/// A transition of the debounced level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high
    #[default]
    Rising,
    /// High to low
    Falling,
}

impl Edge {
    /// Edge that arrives at `level`
    pub fn arriving_at(level: bool) -> Self {
        if level {
            Edge::Rising
        } else {
            Edge::Falling
        }
    }

    /// Edge between two levels, if they differ
    pub fn between(previous: bool, current: bool) -> Option<Self> {
        (previous != current).then(|| Self::arriving_at(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_arriving_at_level() {
        assert_eq!(Edge::arriving_at(true), Edge::Rising);
        assert_eq!(Edge::arriving_at(false), Edge::Falling);
        assert_eq!(Edge::between(false, true), Some(Edge::Rising));
        assert_eq!(Edge::between(true, false), Some(Edge::Falling));
        assert_eq!(Edge::between(true, true), None);
    }
}
