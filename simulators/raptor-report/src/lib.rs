#![warn(clippy::unwrap_used)]

pub mod config;
pub mod suites;
