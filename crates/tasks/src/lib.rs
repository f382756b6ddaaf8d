//! One-shot and interactive workflows built on the API client: bulk alert
//! ignoring, stats downloads, the sample-check walkthrough, the archetype
//! suite and the webhook toggler.

pub mod bulk_ignore;
pub mod samples;
pub mod stats;
pub mod suite;
pub mod webhook;
