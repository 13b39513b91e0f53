//! PUPPET Transport Layer - frames to the renderer
//!
//! This crate provides:
//! - The text wire codec (16 space-separated numbers per frame)
//! - The `FrameSink` seam the frame loop writes to
//! - TCP transport over one long-lived loopback connection
//! - An in-memory sink for recording and inspection

pub mod codec;
pub mod sink;
pub mod tcp;

pub use codec::*;
pub use sink::*;
pub use tcp::*;
