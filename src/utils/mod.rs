//! Utility modules for the host adapter.

pub mod log;
