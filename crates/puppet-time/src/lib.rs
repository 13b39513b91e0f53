//! PUPPET Time - clocks and frame pacing
//!
//! This crate implements the timing side of the frame loop:
//! - `Clock`: monotonic time source with an awaitable sleep
//! - `SystemClock`: tokio-backed wall clock
//! - `ManualClock`: virtual clock for deterministic playback and tests
//! - `FramePacer`: best-effort fixed-rate tick deadlines

pub mod clock;
pub mod pacer;

pub use clock::*;
pub use pacer::*;
