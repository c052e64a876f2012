//! Embassy async tasks
//!
//! `tick_task` runs on the high-priority interrupt executor; the others run
//! in thread mode.

pub mod monitor;
pub mod report;
pub mod tick;

pub use monitor::monitor_task;
pub use report::report_task;
pub use tick::tick_task;
