//! Board-agnostic core logic for one bidirectional digital I/O line
//!
//! A [`DioChannel`] reads a physical line as a debounced input and drives
//! the same line as an output, shutting the output off by itself when the
//! sensed level shows the driver is overloaded. It is split into:
//!
//! - Debounce filter and edge/level tracking ([`input`])
//! - Output driver with blanking window and overload trip ([`output`])
//! - Sticky change notification ([`notify`])
//! - Configuration types ([`config`])
//!
//! Pin access and tick suspension come from the `dioline-hal` traits; this
//! crate never touches hardware directly.

#![no_std]
#![deny(unsafe_code)]

pub mod channel;
pub mod config;
pub mod error;
pub mod input;
pub mod notify;
pub mod output;

pub use channel::{DioChannel, LatchStatus};
pub use config::{ChannelConfig, DriveMode};
pub use error::ChannelError;
pub use input::Edge;
pub use notify::ChangeFlag;
pub use output::DriverState;

pub use dioline_hal::{PinId, PinIo, PinMode, TickSource};
