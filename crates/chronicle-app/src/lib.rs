//! Chronicle App crate - pipeline composition and dataset loading.
//!
//! The `chronicle` binary in this crate wires these together with the CLI
//! and configuration.

pub mod dataset;
pub mod pipeline;

pub use pipeline::Pipeline;
