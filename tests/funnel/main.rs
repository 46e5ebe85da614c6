//! Funnel integration tests.
//!
//! These tests drive the generator, the file sinks and the command handlers
//! together. Each test:
//! 1. Builds a config with a fixed seed and a fixed window
//! 2. Generates the four tables (in memory or into a temp directory)
//! 3. Checks the cross-table invariants on the result

mod append_campaigns;
mod common;
mod determinism;
mod fallback;
mod invariants;
mod scenario;
mod verify_roundtrip;
