//! Helpers shared by the results and report views, and by the browser client.

pub mod cookies;
pub mod download;
pub mod element_ids;
pub mod error;
pub mod metrics;
pub mod time;
pub mod timezone;
