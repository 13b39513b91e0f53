//! Text wire codec
//!
//! Frame = 16 numbers in channel order, separated by single spaces:
//!
//! ```text
//! pitch yaw roll ear_left ear_right x_ratio_left y_ratio_left x_ratio_right
//! y_ratio_right mar mouth_distance ahoge front side back sideup
//! ```
//!
//! The protocol is fire-and-forget: no length prefix and no acknowledgment.
//! By default no delimiter is written either and the receiver relies on
//! message boundaries; `Framing::Newline` terminates each frame with `\n`
//! for receivers that read lines.

use puppet_core::{Channel, Frame, PuppetError, PuppetResult, CHANNEL_COUNT};

/// How frames are delimited on the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// No delimiter
    #[default]
    Raw,
    /// Each frame ends with `\n`
    Newline,
}

/// Encode a frame as one ASCII line
pub fn encode_frame(frame: &Frame, framing: Framing) -> String {
    let mut line = String::with_capacity(CHANNEL_COUNT * 20);
    for (i, value) in frame.values().iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(&format!("{value:?}"));
    }
    if framing == Framing::Newline {
        line.push('\n');
    }
    line
}

/// Decode one frame line (surrounding whitespace ignored)
pub fn decode_frame(line: &str) -> PuppetResult<Frame> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != CHANNEL_COUNT {
        return Err(PuppetError::FieldCount {
            expected: CHANNEL_COUNT,
            actual: fields.len(),
        });
    }

    let mut frame = Frame::zero();
    for (channel, field) in Channel::ALL.iter().zip(fields) {
        let value = field.parse::<f64>().map_err(|_| {
            PuppetError::InvalidWireFormat(format!("{channel}: '{field}' is not a number"))
        })?;
        frame.set(*channel, value);
    }
    Ok(frame)
}
