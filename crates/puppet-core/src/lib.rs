//! PUPPET Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the PUPPET engine:
//! - Channel identifiers (the 16 animated scalar signals)
//! - Frames (one filtered sample of every channel)
//! - Rate constants shared by the interpolator and the frame loop
//! - The engine-wide error type

pub mod channel;
pub mod error;
pub mod frame;
pub mod rate;

pub use channel::*;
pub use error::*;
pub use frame::*;
pub use rate::*;
