//! PUPPET Motion - turning targets into smooth channel values
//!
//! # Pipeline
//!
//! Pose library → Interpolator (value ramps) → Pose tracks (ramp + settle-back
//! tail) → Stabilizers (one Kalman filter per channel) → filtered frame
//!
//! Channels not driven by gestures (blink, lip-sync, gaze, hair) get their
//! targets from the synthetic signal generator instead.

pub mod interpolate;
pub mod pose;
pub mod signals;
pub mod stabilizer;
pub mod track;

pub use interpolate::*;
pub use pose::*;
pub use signals::*;
pub use stabilizer::*;
pub use track::*;
