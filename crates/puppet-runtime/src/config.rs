//! Runtime configuration

use std::net::SocketAddr;

use puppet_core::{FRAME_RATE, SNAP_WINDOW_SECS};
use puppet_motion::{SignalConfig, StabilizerConfig};
use puppet_transport::{default_renderer_addr, Framing};

/// PUPPET runtime configuration
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Renderer endpoint
    pub renderer_addr: SocketAddr,
    /// Frame delimiting on the wire
    pub framing: Framing,
    /// Frames per second
    pub frame_rate: f64,
    /// Window for snap transitions, in seconds
    pub snap_window_secs: f64,
    /// Noise parameters shared by all channel stabilizers
    pub stabilizer: StabilizerConfig,
    /// Synthetic blink, lip-sync, gaze and hair signals
    pub signals: SignalConfig,
    /// Seed for blinks and jitter; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            renderer_addr: default_renderer_addr(),
            framing: Framing::Raw,
            frame_rate: FRAME_RATE,
            snap_window_secs: SNAP_WINDOW_SECS,
            stabilizer: StabilizerConfig::default(),
            signals: SignalConfig::default(),
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Reproducible configuration: fixed seed, newline framing
    pub fn deterministic(seed: u64) -> Self {
        RuntimeConfig {
            framing: Framing::Newline,
            seed: Some(seed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.renderer_addr.to_string(), "127.0.0.1:5066");
        assert_eq!(config.frame_rate, 60.0);
        assert_eq!(config.snap_window_secs, 1.0);
        assert_eq!(config.stabilizer.process_noise, 0.01);
        assert_eq!(config.stabilizer.measurement_noise, 0.1);
        assert_eq!(config.framing, Framing::Raw);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_deterministic() {
        let config = RuntimeConfig::deterministic(11);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.framing, Framing::Newline);
    }
}
