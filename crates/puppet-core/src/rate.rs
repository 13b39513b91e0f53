//! Frame rate primitives
//!
//! The interpolator and the frame loop must agree on the sample rate: a value
//! sequence holds exactly one element per frame.

use std::time::Duration;

/// Frames per second produced by the frame loop
pub const FRAME_RATE: f64 = 60.0;

/// Fixed window for snap transitions (seconds)
pub const SNAP_WINDOW_SECS: f64 = 1.0;

/// Port the renderer listens on
pub const DEFAULT_RENDERER_PORT: u16 = 5066;

/// Number of whole frames that fit in `duration_secs` at `rate`
///
/// Zero, negative and non-finite durations yield zero frames.
pub fn frame_count(duration_secs: f64, rate: f64) -> usize {
    let frames = (duration_secs * rate).floor();
    if frames.is_finite() && frames > 0.0 {
        frames as usize
    } else {
        0
    }
}

/// Convert seconds to a `Duration`, rejecting negative and non-finite input
pub fn secs_to_duration(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

/// Period of one tick at `rate`
pub fn tick_period(rate: f64) -> Duration {
    secs_to_duration(1.0 / rate).unwrap_or(Duration::ZERO)
}
