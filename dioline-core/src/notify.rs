//! Change notification
//!
//! A single sticky "something changed" slot. The channel sets it on every
//! observable change of the debounced input or the commanded output; a
//! poller checks it instead of re-reading every field.
//!
//! Clearing is always explicit: [`ChangeFlag::is_set`] never clears, and
//! [`ChangeFlag::take`] is the atomic read-and-clear for pollers.

use portable_atomic::{AtomicBool, Ordering};

/// Sticky change flag
#[derive(Debug)]
pub struct ChangeFlag(AtomicBool);

impl Default for ChangeFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFlag {
    /// Create a cleared flag
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Mark a change
    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Check for a pending change without clearing it
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Drop any pending change
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Return whether a change was pending and clear it
    ///
    /// A change marked concurrently is either returned here or left set
    /// for the next call, never lost.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_is_sticky() {
        let flag = ChangeFlag::new();
        assert!(!flag.is_set());

        flag.set();
        flag.set();
        assert!(flag.is_set());
        assert!(flag.is_set());
    }

    #[test]
    fn test_take_clears() {
        let flag = ChangeFlag::new();
        flag.set();

        assert!(flag.take());
        assert!(!flag.take());
        assert!(!flag.is_set());
    }

    #[test]
    fn test_clear() {
        let flag = ChangeFlag::new();
        flag.set();
        flag.clear();
        assert!(!flag.is_set());
    }
}
