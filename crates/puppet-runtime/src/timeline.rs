//! Timeline driver - plays gesture events one after another
//!
//! The timeline is authored as JSON:
//!
//! ```json
//! [
//!   { "gestures": "think", "duration_sec": 2 },
//!   { "duration_sec": 1.5 },
//!   { "gestures": "small-nod", "duration_sec": 10 }
//! ]
//! ```
//!
//! An event without a gesture is an idle wait. Every gesture starts from the
//! head pose the renderer last received (the filtered output), so
//! consecutive gestures join without a jump.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use puppet_core::{secs_to_duration, PuppetError, PuppetResult};
use puppet_motion::{interpolate, HeadTrack, PoseLibrary, PoseTransition};
use puppet_time::Clock;
use puppet_transport::FrameSink;

use crate::{FrameLoop, MotionPlan, RuntimeConfig};

/// One timeline entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Gesture name; absent or empty means wait
    #[serde(rename = "gestures", default, skip_serializing_if = "Option::is_none")]
    pub gesture: Option<String>,

    /// Slot length in seconds
    #[serde(rename = "duration_sec")]
    pub duration_secs: f64,
}

impl TimelineEvent {
    /// Play `gesture` for `duration_secs`
    pub fn play(gesture: impl Into<String>, duration_secs: f64) -> Self {
        TimelineEvent {
            gesture: Some(gesture.into()),
            duration_secs,
        }
    }

    /// Wait for `duration_secs`
    pub fn wait(duration_secs: f64) -> Self {
        TimelineEvent {
            gesture: None,
            duration_secs,
        }
    }

    /// Gesture name, if this event plays one
    pub fn gesture(&self) -> Option<&str> {
        self.gesture.as_deref().filter(|g| !g.is_empty())
    }

    /// Slot length
    pub fn duration(&self) -> PuppetResult<Duration> {
        secs_to_duration(self.duration_secs)
            .filter(|d| !d.is_zero())
            .ok_or_else(|| {
                PuppetError::InvalidTimeline(format!(
                    "duration_sec must be positive and finite, got {}",
                    self.duration_secs
                ))
            })
    }
}

/// Ordered list of events
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new(events: Vec<TimelineEvent>) -> PuppetResult<Self> {
        let timeline = Timeline { events };
        timeline.validate()?;
        Ok(timeline)
    }

    /// Parse a JSON timeline
    pub fn from_json(json: &str) -> PuppetResult<Self> {
        let events: Vec<TimelineEvent> =
            serde_json::from_str(json).map_err(|e| PuppetError::InvalidTimeline(e.to_string()))?;
        Self::new(events)
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sum of all slot lengths, in seconds
    pub fn total_secs(&self) -> f64 {
        self.events.iter().map(|e| e.duration_secs).sum()
    }

    fn validate(&self) -> PuppetResult<()> {
        for (index, event) in self.events.iter().enumerate() {
            event
                .duration()
                .map_err(|e| PuppetError::InvalidTimeline(format!("event {index}: {e}")))?;
        }
        Ok(())
    }
}

/// What the driver does with one event
#[derive(Clone, Debug, PartialEq)]
pub enum EventPlan {
    /// No gesture: wait
    Idle(Duration),
    /// Gesture missing from the library
    Skip,
    /// Play frames
    Animate(MotionPlan),
}

/// Outcome of a whole timeline
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelineReport {
    pub animated: usize,
    pub idle: usize,
    pub skipped: usize,
    pub frames: u64,
}

/// Plays a timeline against a pose library
#[derive(Debug)]
pub struct TimelineDriver<'a> {
    library: &'a PoseLibrary,
    rate: f64,
    snap_window_secs: f64,
}

impl<'a> TimelineDriver<'a> {
    pub fn new(library: &'a PoseLibrary, config: &RuntimeConfig) -> Self {
        TimelineDriver {
            library,
            rate: config.frame_rate,
            snap_window_secs: config.snap_window_secs,
        }
    }

    /// Plan one event, starting from the filtered head pose `current`
    pub fn plan(&self, event: &TimelineEvent, current: [f64; 3]) -> PuppetResult<EventPlan> {
        let slot = event.duration()?;
        let Some(name) = event.gesture() else {
            return Ok(EventPlan::Idle(slot));
        };
        let Some(descriptor) = self.library.get(name) else {
            tracing::warn!(gesture = name, "unknown gesture, skipping event");
            return Ok(EventPlan::Skip);
        };

        let gesture_secs = descriptor.gesture_window(event.duration_secs);
        let window = gesture_secs.unwrap_or(event.duration_secs);

        let head = match descriptor.transition() {
            PoseTransition::Interpolate { from, to } => HeadTrack::new(
                interpolate(from.pitch, to.pitch, window, self.rate),
                interpolate(from.yaw, to.yaw, window, self.rate),
                interpolate(from.roll, to.roll, window, self.rate),
            ),
            PoseTransition::Snap { to } => {
                let snap = self.snap_window_secs;
                HeadTrack::new(
                    interpolate(current[0], to.pitch, snap, self.rate),
                    interpolate(current[1], to.yaw, snap, self.rate),
                    interpolate(current[2], to.roll, snap, self.rate),
                )
            }
            PoseTransition::Hold => HeadTrack::hold(current),
        };

        Ok(EventPlan::Animate(MotionPlan {
            duration_secs: event.duration_secs,
            gesture_secs,
            head,
        }))
    }

    /// Play every event in order; each finishes before the next starts
    pub async fn run<S: FrameSink, C: Clock>(
        &self,
        timeline: &Timeline,
        frame_loop: &mut FrameLoop<S, C>,
    ) -> PuppetResult<TimelineReport> {
        let mut report = TimelineReport::default();

        for (index, event) in timeline.events().iter().enumerate() {
            tracing::info!(
                index,
                gesture = event.gesture().unwrap_or("-"),
                duration_sec = event.duration_secs,
                "processing timeline event"
            );

            let current = frame_loop.stabilizers().head();
            match self.plan(event, current)? {
                EventPlan::Idle(duration) => {
                    frame_loop.idle(duration).await;
                    report.idle += 1;
                }
                EventPlan::Skip => report.skipped += 1,
                EventPlan::Animate(plan) => {
                    let event_report = frame_loop.run_event(&plan).await?;
                    report.frames += event_report.frames;
                    report.animated += 1;
                }
            }
        }

        tracing::info!(
            animated = report.animated,
            idle = report.idle,
            skipped = report.skipped,
            frames = report.frames,
            "timeline finished"
        );
        Ok(report)
    }
}
