//! Data types for the Uptime.com REST API.
//!
//! These structs define the JSON records exchanged with the service: checks,
//! outages, alerts, the pagination and error envelopes, and the creation
//! payloads for every check archetype. They live in a separate crate so the
//! client, the monitor and the task flows can share them without depending
//! on each other.

#![allow(missing_docs)]

/// Alert and outage records.
pub mod alert;
/// Check records and snapshots.
pub mod check;
/// Response envelopes: pages, results wrappers and error messages.
pub mod envelope;
/// Creation payloads for each check archetype.
pub mod new_check;

pub use alert::{Alert, Outage};
pub use check::Check;
pub use envelope::{Messages, Page};
pub use new_check::{CheckCommon, NewCheck, NewTag};
