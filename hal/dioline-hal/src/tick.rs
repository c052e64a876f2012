//! Periodic tick source control
//!
//! The channel tick runs from an interrupt. Foreground code that has to
//! read or clear several tick-owned fields as one unit suspends the tick
//! for the few instructions involved, then puts it back exactly as it
//! found it.

/// A periodic tick that can be masked
pub trait TickSource {
    /// Stop the tick from firing
    ///
    /// Returns whether the tick was enabled before the call. A tick that
    /// becomes due while suspended must fire once it is restored, not be
    /// dropped.
    fn suspend(&self) -> bool;

    /// Undo a [`suspend`](TickSource::suspend)
    ///
    /// Re-enables the tick only if `was_enabled` is true, so nested
    /// suspensions never enable a tick an outer caller had masked.
    fn restore(&self, was_enabled: bool);
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn suspend(&self) -> bool {
        (**self).suspend()
    }

    fn restore(&self, was_enabled: bool) {
        (**self).restore(was_enabled)
    }
}

/// Guard holding a tick source suspended
///
/// Restores the previous enabled state when dropped.
#[must_use = "the tick is restored as soon as the guard is dropped"]
pub struct TickSuspended<'a, T: TickSource + ?Sized> {
    source: &'a T,
    was_enabled: bool,
}

impl<'a, T: TickSource + ?Sized> TickSuspended<'a, T> {
    /// Suspend `source` until the returned guard is dropped
    pub fn new(source: &'a T) -> Self {
        let was_enabled = source.suspend();
        Self {
            source,
            was_enabled,
        }
    }

    /// Whether the tick was enabled when this guard was taken
    pub fn was_enabled(&self) -> bool {
        self.was_enabled
    }
}

impl<T: TickSource + ?Sized> Drop for TickSuspended<'_, T> {
    fn drop(&mut self) {
        self.source.restore(self.was_enabled);
    }
}

/// Run `f` with the tick suspended
pub fn with_tick_suspended<T, R>(source: &T, f: impl FnOnce() -> R) -> R
where
    T: TickSource + ?Sized,
{
    let _guard = TickSuspended::new(source);
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Mock tick source for testing
    struct MockTick {
        enabled: Cell<bool>,
        suspensions: Cell<u32>,
    }

    impl MockTick {
        fn new(enabled: bool) -> Self {
            Self {
                enabled: Cell::new(enabled),
                suspensions: Cell::new(0),
            }
        }
    }

    impl TickSource for MockTick {
        fn suspend(&self) -> bool {
            self.suspensions.set(self.suspensions.get() + 1);
            self.enabled.replace(false)
        }

        fn restore(&self, was_enabled: bool) {
            if was_enabled {
                self.enabled.set(true);
            }
        }
    }

    #[test]
    fn test_suspend_restores_enabled_tick() {
        let tick = MockTick::new(true);

        let seen = with_tick_suspended(&tick, || tick.enabled.get());

        assert!(!seen);
        assert!(tick.enabled.get());
        assert_eq!(tick.suspensions.get(), 1);
    }

    #[test]
    fn test_suspend_keeps_disabled_tick_disabled() {
        let tick = MockTick::new(false);

        with_tick_suspended(&tick, || {});

        assert!(!tick.enabled.get());
    }

    #[test]
    fn test_nested_suspension() {
        let tick = MockTick::new(true);

        {
            let outer = TickSuspended::new(&tick);
            assert!(outer.was_enabled());
            {
                let inner = TickSuspended::new(&tick);
                assert!(!inner.was_enabled());
            }
            // Inner guard must not re-enable under the outer one
            assert!(!tick.enabled.get());
        }

        assert!(tick.enabled.get());
        assert_eq!(tick.suspensions.get(), 2);
    }

    #[test]
    fn test_return_value_passes_through() {
        let tick = MockTick::new(true);
        assert_eq!(with_tick_suspended(&tick, || 42), 42);
    }
}
