//! Stabilizer bank - one stabilizer per channel
//!
//! The bank is owned by the frame loop and lent to the timeline driver,
//! which reads the filtered head pose as the start of the next gesture.

use puppet_core::{Channel, Frame, CHANNEL_COUNT};
use puppet_motion::{Stabilizer, StabilizerConfig};

/// Per-channel stabilizers
#[derive(Debug, Clone)]
pub struct StabilizerBank {
    stabilizers: [Stabilizer; CHANNEL_COUNT],
}

impl StabilizerBank {
    /// All channels share the same noise parameters
    pub fn new(config: StabilizerConfig) -> Self {
        StabilizerBank {
            stabilizers: std::array::from_fn(|_| Stabilizer::new(config)),
        }
    }

    /// Feed one tick of targets and return the filtered frame
    ///
    /// Every channel is updated exactly once before any value is read back.
    /// A non-finite target is replaced by the channel's current estimate so
    /// one bad sample cannot poison the filter.
    pub fn apply(&mut self, targets: &Frame) -> Frame {
        for (channel, target) in targets.iter() {
            let stabilizer = &mut self.stabilizers[channel.index()];
            let target = if target.is_finite() {
                target
            } else {
                tracing::warn!(%channel, value = target, "non-finite target, holding estimate");
                stabilizer.get()
            };
            stabilizer.update(target);
        }
        self.filtered()
    }

    /// Current filtered values, without updating
    pub fn filtered(&self) -> Frame {
        let mut frame = Frame::zero();
        for channel in Channel::ALL {
            frame.set(channel, self.get(channel));
        }
        frame
    }

    /// Filtered value of one channel
    pub fn get(&self, channel: Channel) -> f64 {
        self.stabilizers[channel.index()].get()
    }

    /// Filtered pitch, yaw and roll
    pub fn head(&self) -> [f64; 3] {
        Channel::HEAD.map(|c| self.get(c))
    }

    pub fn stabilizer(&self, channel: Channel) -> &Stabilizer {
        &self.stabilizers[channel.index()]
    }
}

impl Default for StabilizerBank {
    fn default() -> Self {
        Self::new(StabilizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_are_independent() {
        let mut bank = StabilizerBank::default();
        let mut targets = Frame::zero();
        targets.set(Channel::Yaw, 30.0);

        for _ in 0..100 {
            bank.apply(&targets);
        }

        assert!((bank.get(Channel::Yaw) - 30.0).abs() < 1e-2);
        assert_eq!(bank.get(Channel::Pitch), 0.0);
        assert_eq!(bank.get(Channel::SideUp), 0.0);
        assert_eq!(bank.head()[1], bank.get(Channel::Yaw));
    }

    #[test]
    fn test_apply_returns_filtered() {
        let mut bank = StabilizerBank::default();
        let mut targets = Frame::zero();
        targets.set(Channel::Mar, 1.0);

        let filtered = bank.apply(&targets);
        assert_eq!(filtered, bank.filtered());
        assert!(filtered.get(Channel::Mar) > 0.0);
        assert!(filtered.get(Channel::Mar) < 1.0);
    }

    #[test]
    fn test_non_finite_target_is_held() {
        let mut bank = StabilizerBank::default();
        let mut targets = Frame::zero();
        targets.set(Channel::Roll, 5.0);
        for _ in 0..50 {
            bank.apply(&targets);
        }
        let before = bank.get(Channel::Roll);

        targets.set(Channel::Roll, f64::NAN);
        let filtered = bank.apply(&targets);

        assert!(filtered.is_finite());
        assert!((filtered.get(Channel::Roll) - before).abs() < 0.1);
    }

    #[test]
    fn test_shared_config() {
        let config = StabilizerConfig::new(0.2, 0.3);
        let bank = StabilizerBank::new(config);
        assert!(Channel::ALL.iter().all(|c| bank.stabilizer(*c).config() == config));
    }
}
