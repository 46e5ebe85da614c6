//! Command handlers.
//!
//! This module contains handlers for the generate, append-campaigns and
//! verify commands.

pub mod append;
pub mod generate;
pub mod verify;
