//! DST-aware clock appliance core.
//!
//! Exposes the pure-logic modules for integration testing and the host
//! simulator. Hardware sits behind the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod datemath;
pub mod dst;
pub mod error;
pub mod protocol;
pub mod scheduler;
pub mod store;
pub mod timezone;
