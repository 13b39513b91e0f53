//! PUPPET Test Harness - end-to-end playback checks
//!
//! This crate provides:
//! - A fake renderer listening on loopback
//! - Scenario playback over real TCP with a virtual clock
//! - Frame series analysis (monotonicity, continuity, ranges)

pub mod integration;
pub mod renderer;

pub use integration::*;
pub use renderer::*;
