//! Frame - one sample of every channel
//!
//! A frame is transient: it is assembled from the filtered channel values at
//! one tick, serialized and sent, then dropped.

use std::ops::{Index, IndexMut};

use crate::{Channel, CHANNEL_COUNT};

/// One sample of all channels, indexed by [`Channel`]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Frame {
    values: [f64; CHANNEL_COUNT],
}

impl Frame {
    /// Frame with every channel at zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build from values in wire order
    pub fn from_values(values: [f64; CHANNEL_COUNT]) -> Self {
        Frame { values }
    }

    #[inline]
    pub fn get(&self, channel: Channel) -> f64 {
        self.values[channel.index()]
    }

    #[inline]
    pub fn set(&mut self, channel: Channel, value: f64) {
        self.values[channel.index()] = value;
    }

    /// Values in wire order
    #[inline]
    pub fn values(&self) -> &[f64; CHANNEL_COUNT] {
        &self.values
    }

    /// (channel, value) pairs in wire order
    pub fn iter(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        Channel::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Pitch, yaw and roll
    pub fn head(&self) -> [f64; 3] {
        [
            self.get(Channel::Pitch),
            self.get(Channel::Yaw),
            self.get(Channel::Roll),
        ]
    }

    /// Are all values finite?
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

impl Index<Channel> for Frame {
    type Output = f64;

    #[inline]
    fn index(&self, channel: Channel) -> &f64 {
        &self.values[channel.index()]
    }
}

impl IndexMut<Channel> for Frame {
    #[inline]
    fn index_mut(&mut self, channel: Channel) -> &mut f64 {
        &mut self.values[channel.index()]
    }
}
