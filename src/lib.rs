//! passgate: terminal password prompt with an eased loading animation.

pub mod config;
pub mod ease;
pub mod tui;
