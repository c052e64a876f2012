//! Output side of the channel
//!
//! The [`OutputDriver`] tracks the commanded level and the overload
//! blanking window; [`DriveMode`](crate::config::DriveMode) turns
//! "asserted"/"released" into pin operations.

pub mod driver;

pub use driver::{DriverState, OutputDriver};
