//! Library components of the `dmp-decoder` command.

pub mod batch;
pub mod config;
pub mod forward;
pub mod logging;
pub mod summary;
