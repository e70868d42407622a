//! Background Tasks Module
//!
//! Contains the tasks that run for the lifetime of the monitor.
//!
//! # Tasks
//! - Monitor: polls the deal source and posts deals not seen in the dedup window

mod monitor;

pub use monitor::{spawn_monitor_task, CycleReport, Monitor, MonitorSettings};
