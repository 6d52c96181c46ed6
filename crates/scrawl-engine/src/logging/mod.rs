//! Logging utilities.
//!
//! The engine itself only talks to the `log` facade: cache recomputation and
//! skipped asset bounds at `trace`, validation and `clear` at `debug`.
//! Binaries call [`init_logging`] to install `env_logger`.

mod init;

pub use init::{init_logging, LoggingConfig};
