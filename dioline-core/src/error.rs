//! Channel errors

/// Errors returned by channel operations
///
/// Configuring both pins before the first tick is a precondition of the
/// channel; these errors report a violation instead of touching an
/// arbitrary pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// No input pin has been configured
    InputNotConfigured,
    /// No output pin has been configured
    OutputNotConfigured,
}
