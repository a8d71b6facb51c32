//! Shared pieces of the `hookkit` and `setup-pm` binaries.

pub mod logging;
