//! Monitor crate: real-time check status tracking over the alerts feed.
/// The polling loop.
pub mod service;
/// The check-status cache and alert merge.
pub mod status;

pub use service::{MonitorService, RELOAD_EVERY, TICK, is_reload_cycle};
pub use status::{CheckStatus, StatusCache};
