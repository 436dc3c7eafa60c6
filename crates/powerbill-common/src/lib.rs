//! Shared utilities for the powerbill crates
//!
//! - [`logging`]: tracing subscriber setup honouring `-v/-q` and `RUST_LOG`
//! - [`config`]: layered figment loading (defaults, TOML file, environment)

pub mod config;
pub mod logging;

pub use config::{load_layered, ConfigurationError};
