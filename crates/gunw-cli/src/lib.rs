//! gunw-cli library root.
//!
//! Exposes argument parsing and the reconciliation pipeline so integration
//! tests can drive them without spawning the binary.

pub mod args;
pub mod pipeline;
