//! Pose tracks - gesture ramps with an optional settle-back tail
//!
//! A gesture shorter than its timeline slot eases back to neutral over the
//! rest of the slot. The tail starts from the last element of the gesture
//! ramp and heads toward zero. Both halves stay lazy ramps; the track just
//! routes a tick index to the right one and holds the final value once both
//! are exhausted.

use crate::{interpolate, Ramp};

/// Neutral value the settle-back tail heads toward
pub const NEUTRAL: f64 = 0.0;

/// One channel's value sequence for a timeline event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTrack {
    primary: Ramp,
    tail: Option<Ramp>,
}

impl PoseTrack {
    pub fn new(primary: Ramp) -> Self {
        PoseTrack {
            primary,
            tail: None,
        }
    }

    /// Append a tail easing from the primary ramp's last value to neutral
    pub fn with_settle_back(self, tail_secs: f64, rate: f64) -> Self {
        let tail = interpolate(self.primary.last(), NEUTRAL, tail_secs, rate);
        PoseTrack {
            primary: self.primary,
            tail: Some(tail),
        }
    }

    /// Value for `tick`, clamped to the final element
    pub fn value_at(&self, tick: usize) -> f64 {
        if tick < self.primary.len() {
            return self.primary.get_clamped(tick);
        }
        match self.tail {
            Some(tail) => tail.get_clamped(tick - self.primary.len()),
            None => self.primary.last(),
        }
    }

    /// Total number of distinct elements
    pub fn len(&self) -> usize {
        self.primary.len() + self.tail.map_or(0, |t| t.len())
    }

    /// Tracks always hold at least one element
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn primary(&self) -> &Ramp {
        &self.primary
    }

    pub fn tail(&self) -> Option<&Ramp> {
        self.tail.as_ref()
    }

    /// Value held once the track is exhausted
    pub fn last(&self) -> f64 {
        self.tail.map_or(self.primary.last(), |t| t.last())
    }
}

/// Pitch, yaw and roll tracks for one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadTrack {
    pub pitch: PoseTrack,
    pub yaw: PoseTrack,
    pub roll: PoseTrack,
}

impl HeadTrack {
    pub fn new(pitch: Ramp, yaw: Ramp, roll: Ramp) -> Self {
        HeadTrack {
            pitch: PoseTrack::new(pitch),
            yaw: PoseTrack::new(yaw),
            roll: PoseTrack::new(roll),
        }
    }

    /// Hold a fixed pose
    pub fn hold(pose: [f64; 3]) -> Self {
        Self::new(
            Ramp::constant(pose[0]),
            Ramp::constant(pose[1]),
            Ramp::constant(pose[2]),
        )
    }

    /// Append settle-back tails to all three channels
    pub fn with_settle_back(self, tail_secs: f64, rate: f64) -> Self {
        HeadTrack {
            pitch: self.pitch.with_settle_back(tail_secs, rate),
            yaw: self.yaw.with_settle_back(tail_secs, rate),
            roll: self.roll.with_settle_back(tail_secs, rate),
        }
    }

    /// Pitch, yaw and roll targets for `tick`
    pub fn sample(&self, tick: usize) -> [f64; 3] {
        [
            self.pitch.value_at(tick),
            self.yaw.value_at(tick),
            self.roll.value_at(tick),
        ]
    }

    /// First pitch, yaw and roll targets
    pub fn start(&self) -> [f64; 3] {
        self.sample(0)
    }
}
