//! fxconv library
//!
//! Currency conversion with live exchange rates, a time-limited on-disk rate
//! cache used as an offline fallback, and a terminal UI.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod convert;
pub mod data;
pub mod debounce;
pub mod refresh;
pub mod ui;
