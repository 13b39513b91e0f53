//! PUPPET Runtime - timeline playback and the frame loop
//!
//! This crate ties the pipeline together:
//! 1. Load the pose library and the timeline
//! 2. Connect to the renderer
//! 3. For each event, plan head targets from the current filtered pose
//! 4. Tick at the frame rate: signals, head targets, stabilizers, send
//! 5. Idle events wait without sending

pub mod bank;
pub mod config;
pub mod frame_loop;
pub mod timeline;

pub use bank::*;
pub use config::*;
pub use frame_loop::*;
pub use timeline::*;

use puppet_core::PuppetResult;
use puppet_motion::PoseLibrary;
use puppet_time::SystemClock;
use puppet_transport::TcpTransport;

/// Connect to the renderer and play `timeline` in real time
///
/// Failing to connect ends the session before any event runs.
pub async fn run(
    config: &RuntimeConfig,
    timeline: &Timeline,
    library: &PoseLibrary,
) -> PuppetResult<TimelineReport> {
    let transport = TcpTransport::connect(config.renderer_addr, config.framing).await?;
    let mut frame_loop = FrameLoop::new(transport, SystemClock::new(), config);

    let driver = TimelineDriver::new(library, config);
    let report = driver.run(timeline, &mut frame_loop).await?;

    let mut transport = frame_loop.into_sink();
    if let Err(e) = transport.shutdown().await {
        tracing::debug!(error = %e, "renderer connection already closed");
    }
    Ok(report)
}
