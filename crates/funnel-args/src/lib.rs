//! Shared command-line arguments for adfunnel commands.
//!
//! The generation settings are declared once here so `generate` and any
//! command that regenerates a dataset accept the same flags.

pub mod args;

pub use args::{AppendArgs, CommonGenerateArgs};
