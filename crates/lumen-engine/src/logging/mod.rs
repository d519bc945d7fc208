//! Logging utilities.
//!
//! This module centralizes logger initialization. Library code only talks to the
//! `log` facade; `env_logger` is wired up here for binaries.

mod init;

pub use init::{init_logging, LoggingConfig};
