//! Logging utilities.
//!
//! Logger initialization for binaries and tests. Library code only talks to
//! the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
