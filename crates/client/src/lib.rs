//! Client crate: Uptime.com API transport, errors and pagination.
/// The API client and transport helper.
pub mod client;
/// The endpoint surface and pagination walkers.
pub mod endpoints;
/// Transport and application error types.
pub mod error;

pub use client::{PAGE_SIZE, UptimeClient, post_webhook};
pub use error::{ApiError, Error, TransportError};
