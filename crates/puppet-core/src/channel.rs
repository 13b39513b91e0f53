//! Channel definitions
//!
//! A channel is one independently smoothed scalar signal sent to the
//! renderer. Channels are grouped by what drives them:
//! - Head: pitch, yaw, roll - driven by the gesture timeline
//! - Eyes: aspect ratio (blink) and gaze ratios - synthetic
//! - Mouth: aspect ratio and distance - synthetic lip-sync
//! - Hair: sway channels - synthetic

/// Number of channels carried by every frame
pub const CHANNEL_COUNT: usize = 16;

/// Animated channel, in wire order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Channel {
    Pitch = 0,
    Yaw = 1,
    Roll = 2,
    /// Left eye aspect ratio (1.0 = open, 0.0 = closed)
    EarLeft = 3,
    /// Right eye aspect ratio
    EarRight = 4,
    XRatioLeft = 5,
    YRatioLeft = 6,
    XRatioRight = 7,
    YRatioRight = 8,
    /// Mouth aspect ratio
    Mar = 9,
    MouthDistance = 10,
    Ahoge = 11,
    Front = 12,
    Side = 13,
    Back = 14,
    SideUp = 15,
}

impl Channel {
    /// All channels in wire order
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Pitch,
        Channel::Yaw,
        Channel::Roll,
        Channel::EarLeft,
        Channel::EarRight,
        Channel::XRatioLeft,
        Channel::YRatioLeft,
        Channel::XRatioRight,
        Channel::YRatioRight,
        Channel::Mar,
        Channel::MouthDistance,
        Channel::Ahoge,
        Channel::Front,
        Channel::Side,
        Channel::Back,
        Channel::SideUp,
    ];

    /// Head pose channels, driven by the gesture timeline
    pub const HEAD: [Channel; 3] = [Channel::Pitch, Channel::Yaw, Channel::Roll];

    /// Hair sway channels
    pub const HAIR: [Channel; 5] = [
        Channel::Ahoge,
        Channel::Front,
        Channel::Side,
        Channel::Back,
        Channel::SideUp,
    ];

    /// Position in the wire line
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a channel by wire position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Field name used by the renderer
    pub fn name(self) -> &'static str {
        match self {
            Channel::Pitch => "pitch",
            Channel::Yaw => "yaw",
            Channel::Roll => "roll",
            Channel::EarLeft => "ear_left",
            Channel::EarRight => "ear_right",
            Channel::XRatioLeft => "x_ratio_left",
            Channel::YRatioLeft => "y_ratio_left",
            Channel::XRatioRight => "x_ratio_right",
            Channel::YRatioRight => "y_ratio_right",
            Channel::Mar => "mar",
            Channel::MouthDistance => "mouth_distance",
            Channel::Ahoge => "ahoge",
            Channel::Front => "front",
            Channel::Side => "side",
            Channel::Back => "back",
            Channel::SideUp => "sideup",
        }
    }

    /// Is this channel driven by the gesture timeline?
    pub fn is_head(self) -> bool {
        matches!(self, Channel::Pitch | Channel::Yaw | Channel::Roll)
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
