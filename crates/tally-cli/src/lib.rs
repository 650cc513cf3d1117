//! Tally CLI Library
//!
//! Configuration loading and command handlers behind the `tally` binary.

pub mod config;
pub mod handlers;

pub use config::{CliConfig, EventOutput, LOG_ENV, STATE_PATH_ENV};
pub use handlers::{write_response, CliHandler};
