//! End-to-end scenarios
//!
//! Plays a timeline through the real runtime and TCP transport into a
//! [`FakeRenderer`], on a virtual clock so a ten second timeline finishes
//! instantly and frame counts are exact.

use std::time::Duration;

use puppet_core::{Channel, Frame, PuppetResult};
use puppet_motion::PoseLibrary;
use puppet_runtime::{FrameLoop, RuntimeConfig, Timeline, TimelineDriver, TimelineReport};
use puppet_time::{Clock, ManualClock};
use puppet_transport::{MemorySink, TcpTransport};

use crate::renderer::FakeRenderer;

// ============================================================================
// SCENARIOS
// ============================================================================

/// Gesture library used by the scenarios
pub const DEMO_POSES: &str = r#"{
    "think": { "duration": 2, "from": [0, 0, 0], "to": [10, -5, 0] },
    "small-nod": { "duration": 10, "to": [8, 0, 0] },
    "look-left": { "duration": 1.5, "to": [0, 20, 0] },
    "rest": {}
}"#;

/// A timeline with everything needed to play it reproducibly
#[derive(Clone, Debug)]
pub struct Scenario {
    pub timeline: Timeline,
    pub library: PoseLibrary,
    pub seed: u64,
}

impl Scenario {
    /// Scenario over the demo library
    pub fn demo(timeline_json: &str, seed: u64) -> PuppetResult<Self> {
        Ok(Scenario {
            timeline: Timeline::from_json(timeline_json)?,
            library: PoseLibrary::from_json(DEMO_POSES)?,
            seed,
        })
    }

    fn config(&self) -> RuntimeConfig {
        RuntimeConfig::deterministic(self.seed)
    }
}

/// What the renderer saw
#[derive(Clone, Debug)]
pub struct ScenarioResult {
    pub frames: Vec<Frame>,
    pub report: TimelineReport,
    /// Virtual time at the end of the timeline
    pub elapsed: Duration,
}

/// Play a scenario over loopback TCP into a fake renderer
pub async fn play_over_tcp(scenario: &Scenario) -> PuppetResult<ScenarioResult> {
    let renderer = FakeRenderer::bind().await?;
    let config = RuntimeConfig {
        renderer_addr: renderer.addr(),
        ..scenario.config()
    };

    let transport = TcpTransport::connect(config.renderer_addr, config.framing).await?;
    let mut frame_loop = FrameLoop::new(transport, ManualClock::new(), &config);
    let report = TimelineDriver::new(&scenario.library, &config)
        .run(&scenario.timeline, &mut frame_loop)
        .await?;
    let elapsed = frame_loop.clock().now();

    let mut transport = frame_loop.into_sink();
    transport.shutdown().await?;
    drop(transport);

    let frames = renderer.finish().await?;
    Ok(ScenarioResult {
        frames,
        report,
        elapsed,
    })
}

/// Play a scenario into memory, without a socket
pub async fn play_in_memory(scenario: &Scenario) -> PuppetResult<ScenarioResult> {
    let config = scenario.config();
    let mut frame_loop = FrameLoop::new(MemorySink::new(), ManualClock::new(), &config);
    let report = TimelineDriver::new(&scenario.library, &config)
        .run(&scenario.timeline, &mut frame_loop)
        .await?;
    let elapsed = frame_loop.clock().now();

    Ok(ScenarioResult {
        frames: frame_loop.into_sink().drain(),
        report,
        elapsed,
    })
}

// ============================================================================
// SERIES ANALYSIS
// ============================================================================

/// Values of one channel across frames
pub fn channel_series(frames: &[Frame], channel: Channel) -> Vec<f64> {
    frames.iter().map(|f| f.get(channel)).collect()
}

pub fn is_non_decreasing(series: &[f64]) -> bool {
    series.windows(2).all(|w| w[1] >= w[0])
}

pub fn is_non_increasing(series: &[f64]) -> bool {
    series.windows(2).all(|w| w[1] <= w[0])
}

/// Largest jump between consecutive values
pub fn max_step(series: &[f64]) -> f64 {
    series
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(0.0, f64::max)
}
