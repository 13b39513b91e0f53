//! puppet - drive a renderer's head pose from a gesture timeline
//!
//! Usage:
//!   puppet --timeline '[{"gestures": "think", "duration_sec": 2}]'
//!   puppet --timeline '...' --poses gestures.json --addr 127.0.0.1:5066
//!   puppet --timeline '...' --seed 7 --newline

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use puppet_core::PuppetResult;
use puppet_motion::PoseLibrary;
use puppet_runtime::{RuntimeConfig, Timeline, TimelineReport};
use puppet_transport::{default_renderer_addr, Framing};

#[derive(Parser, Debug)]
#[command(
    name = "puppet",
    version,
    about = "Play a gesture timeline as a 60 Hz head-pose stream to a renderer"
)]
struct Args {
    /// Timeline as a JSON array of {"gestures", "duration_sec"} events
    #[arg(long)]
    timeline: String,

    /// Pose library (JSON object of gesture descriptors)
    #[arg(long, default_value = "pose.json")]
    poses: PathBuf,

    /// Renderer address
    #[arg(long, default_value_t = default_renderer_addr())]
    addr: SocketAddr,

    /// Seed for blinks and mouth jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Terminate every frame with a newline
    #[arg(long)]
    newline: bool,
}

impl Args {
    fn config(&self) -> RuntimeConfig {
        RuntimeConfig {
            renderer_addr: self.addr,
            framing: if self.newline {
                Framing::Newline
            } else {
                Framing::Raw
            },
            seed: self.seed,
            ..RuntimeConfig::default()
        }
    }
}

async fn run(args: Args) -> PuppetResult<TimelineReport> {
    let timeline = Timeline::from_json(&args.timeline)?;
    let library = PoseLibrary::load(&args.poses)?;
    tracing::info!(
        events = timeline.len(),
        gestures = library.len(),
        total_secs = timeline.total_secs(),
        "inputs loaded"
    );

    puppet_runtime::run(&args.config(), &timeline, &library).await
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(report) => {
            tracing::info!(frames = report.frames, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "puppet failed");
            ExitCode::FAILURE
        }
    }
}
