//! Pose library - named gestures and their head-pose transitions
//!
//! The library is authored as JSON:
//!
//! ```json
//! {
//!   "think":     { "duration": 2, "from": [0, 0, 0], "to": [10, -5, 0] },
//!   "small-nod": { "to": [8, 0, 0] },
//!   "rest":      {}
//! }
//! ```
//!
//! `duration` is a ceiling for the gesture window, not a floor.

use std::collections::HashMap;
use std::path::Path;

use puppet_core::{PuppetError, PuppetResult};
use serde::{Deserialize, Serialize};

/// Head orientation: pitch, yaw, roll (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct HeadPose {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl HeadPose {
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        HeadPose { pitch, yaw, roll }
    }

    /// Looking straight ahead
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.pitch, self.yaw, self.roll]
    }

    pub fn is_finite(&self) -> bool {
        self.pitch.is_finite() && self.yaw.is_finite() && self.roll.is_finite()
    }
}

impl From<[f64; 3]> for HeadPose {
    fn from([pitch, yaw, roll]: [f64; 3]) -> Self {
        HeadPose { pitch, yaw, roll }
    }
}

impl From<HeadPose> for [f64; 3] {
    fn from(pose: HeadPose) -> Self {
        pose.to_array()
    }
}

/// How a gesture moves the head
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseTransition {
    /// Move from one authored pose to another over the gesture window
    Interpolate { from: HeadPose, to: HeadPose },
    /// Move from wherever the head is to `to` over the snap window
    Snap { to: HeadPose },
    /// Keep the current pose
    Hold,
}

/// Authored gesture
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseDescriptor {
    /// Preferred gesture length in seconds (a ceiling)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<HeadPose>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<HeadPose>,
}

impl PoseDescriptor {
    /// Classify the descriptor (a lone `from` is a hold)
    pub fn transition(&self) -> PoseTransition {
        match (self.from, self.to) {
            (Some(from), Some(to)) => PoseTransition::Interpolate { from, to },
            (None, Some(to)) => PoseTransition::Snap { to },
            _ => PoseTransition::Hold,
        }
    }

    /// Gesture window for a timeline slot of `slot_secs`
    ///
    /// Returns the preferred duration only when it is strictly shorter than
    /// the slot; otherwise the gesture fills the whole slot.
    pub fn gesture_window(&self, slot_secs: f64) -> Option<f64> {
        self.duration.filter(|d| *d < slot_secs)
    }
}

/// Mapping from gesture name to descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseLibrary {
    poses: HashMap<String, PoseDescriptor>,
}

impl PoseLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON library
    pub fn from_json(json: &str) -> PuppetResult<Self> {
        let library: PoseLibrary = serde_json::from_str(json)
            .map_err(|e| PuppetError::InvalidPoseLibrary(e.to_string()))?;
        library.validate()?;
        Ok(library)
    }

    /// Read and parse a JSON library file
    pub fn load(path: impl AsRef<Path>) -> PuppetResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, name: impl Into<String>, descriptor: PoseDescriptor) {
        self.poses.insert(name.into(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&PoseDescriptor> {
        self.poses.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.poses.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Gesture names, unordered
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.poses.keys().map(String::as_str)
    }

    fn validate(&self) -> PuppetResult<()> {
        for (name, descriptor) in &self.poses {
            if let Some(duration) = descriptor.duration {
                if !duration.is_finite() || duration < 0.0 {
                    return Err(PuppetError::InvalidPoseLibrary(format!(
                        "gesture '{name}' has an invalid duration {duration}"
                    )));
                }
            }
            let mut poses = descriptor.from.iter().chain(descriptor.to.iter());
            if poses.any(|p| !p.is_finite()) {
                return Err(PuppetError::InvalidPoseLibrary(format!(
                    "gesture '{name}' has a non-finite pose"
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, PoseDescriptor)> for PoseLibrary {
    fn from_iter<I: IntoIterator<Item = (String, PoseDescriptor)>>(iter: I) -> Self {
        PoseLibrary {
            poses: iter.into_iter().collect(),
        }
    }
}
