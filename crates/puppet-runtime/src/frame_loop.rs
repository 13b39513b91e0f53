//! Frame loop - the real-time producer
//!
//! One call to [`FrameLoop::run_event`] plays one timeline event. Each tick:
//! 1. Sample synthetic signals (mouth, eyes, gaze, hair)
//! 2. Look up head targets by tick index (clamped to the last value)
//! 3. Update every channel's stabilizer once, read back the filtered frame
//! 4. Send the frame
//! 5. Wait for the next tick deadline
//!
//! The loop stops after the first tick that ends at or past the event
//! duration, so every event produces at least one frame.

use std::time::Duration;

use puppet_core::{secs_to_duration, Channel, Frame, PuppetError, PuppetResult};
use puppet_motion::{HeadTrack, SyntheticSignals};
use puppet_time::{Clock, FramePacer};
use puppet_transport::FrameSink;

use crate::{RuntimeConfig, StabilizerBank};

/// What the frame loop plays for one event
#[derive(Clone, Debug, PartialEq)]
pub struct MotionPlan {
    /// Event length in seconds
    pub duration_secs: f64,
    /// Gesture length when shorter than the event; the rest settles back to neutral
    pub gesture_secs: Option<f64>,
    /// Head targets for the gesture window
    pub head: HeadTrack,
}

impl MotionPlan {
    /// Head tracks for the whole event, settle-back tail included
    pub fn full_track(&self, rate: f64) -> HeadTrack {
        match self.gesture_secs {
            Some(gesture) if gesture < self.duration_secs => self
                .head
                .with_settle_back(self.duration_secs - gesture, rate),
            _ => self.head,
        }
    }
}

/// Outcome of one event
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventReport {
    /// Frames sent
    pub frames: u64,
    /// Ticks that missed their deadline
    pub overruns: u64,
    /// Clock time spent in the event
    pub elapsed: Duration,
}

/// Running totals across events
#[derive(Clone, Debug, Default)]
pub struct LoopStats {
    pub events: u64,
    pub frames_sent: u64,
    pub overruns: u64,
}

/// Fixed-rate frame producer
pub struct FrameLoop<S, C> {
    sink: S,
    clock: C,
    stabilizers: StabilizerBank,
    signals: SyntheticSignals,
    rate: f64,
    stats: LoopStats,
}

impl<S: FrameSink, C: Clock> FrameLoop<S, C> {
    /// Build a frame loop from the runtime configuration
    pub fn new(sink: S, clock: C, config: &RuntimeConfig) -> Self {
        let signals = match config.seed {
            Some(seed) => SyntheticSignals::with_seed(config.signals.clone(), seed),
            None => SyntheticSignals::from_entropy(config.signals.clone()),
        };
        Self::with_parts(
            sink,
            clock,
            StabilizerBank::new(config.stabilizer),
            signals,
            config.frame_rate,
        )
    }

    /// Build a frame loop from explicit parts
    pub fn with_parts(
        sink: S,
        clock: C,
        stabilizers: StabilizerBank,
        signals: SyntheticSignals,
        rate: f64,
    ) -> Self {
        FrameLoop {
            sink,
            clock,
            stabilizers,
            signals,
            rate,
            stats: LoopStats::default(),
        }
    }

    /// Play one event until its duration has elapsed
    pub async fn run_event(&mut self, plan: &MotionPlan) -> PuppetResult<EventReport> {
        let duration = secs_to_duration(plan.duration_secs)
            .filter(|d| !d.is_zero())
            .ok_or_else(|| {
                PuppetError::InvalidTimeline(format!(
                    "event duration must be positive, got {}",
                    plan.duration_secs
                ))
            })?;
        let head = plan.full_track(self.rate);

        let start = self.clock.now();
        let mut pacer = FramePacer::new(self.rate, start);
        let mut tick = 0usize;

        loop {
            let mut targets = Frame::zero();
            self.signals
                .fill(self.clock.now().as_secs_f64(), &mut targets);

            let [pitch, yaw, roll] = head.sample(tick);
            targets.set(Channel::Pitch, pitch);
            targets.set(Channel::Yaw, yaw);
            targets.set(Channel::Roll, roll);

            let filtered = self.stabilizers.apply(&targets);
            if let Err(e) = self.sink.send_frame(&filtered).await {
                tracing::error!(tick, error = %e, "frame send failed");
                return Err(e);
            }
            tick += 1;

            let deadline = pacer.next_deadline(self.clock.now());
            self.clock.sleep_until(deadline).await;

            if self.clock.now().saturating_sub(start) >= duration {
                break;
            }
        }

        let report = EventReport {
            frames: tick as u64,
            overruns: pacer.overruns(),
            elapsed: self.clock.now().saturating_sub(start),
        };
        self.stats.events += 1;
        self.stats.frames_sent += report.frames;
        self.stats.overruns += report.overruns;

        tracing::debug!(
            frames = report.frames,
            overruns = report.overruns,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "event finished"
        );
        Ok(report)
    }

    /// Wait without producing frames
    pub async fn idle(&mut self, duration: Duration) {
        self.clock.sleep(duration).await;
    }

    /// Filtered state of every channel
    pub fn stabilizers(&self) -> &StabilizerBank {
        &self.stabilizers
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}
