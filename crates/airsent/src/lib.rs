#![doc = include_str!("../../../README.md")]
//!

//! This crate re-exports the dashboard library and its web server so that
//! embedders need a single dependency.

pub use airsent_core::*;
pub use airsent_server as server;
