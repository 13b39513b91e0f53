//! Frame sinks - where the frame loop sends its output

use std::future::Future;

use puppet_core::{Frame, PuppetResult};

use crate::{encode_frame, Framing};

/// Destination for filtered frames
///
/// A send failure is final: the frame loop neither retries nor buffers.
pub trait FrameSink {
    fn send_frame(&mut self, frame: &Frame) -> impl Future<Output = PuppetResult<()>> + Send;
}

/// In-memory sink that records every frame and its encoded line
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    frames: Vec<Frame>,
    lines: Vec<String>,
    framing: Framing,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_framing(framing: Framing) -> Self {
        MemorySink {
            framing,
            ..Self::default()
        }
    }

    /// Frames received so far
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Encoded lines, one per frame
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Take the recorded frames, leaving the sink empty
    pub fn drain(&mut self) -> Vec<Frame> {
        self.lines.clear();
        std::mem::take(&mut self.frames)
    }
}

impl FrameSink for MemorySink {
    async fn send_frame(&mut self, frame: &Frame) -> PuppetResult<()> {
        self.lines.push(encode_frame(frame, self.framing));
        self.frames.push(*frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puppet_core::Channel;

    #[tokio::test]
    async fn test_memory_sink_records() {
        let mut sink = MemorySink::new();
        let mut frame = Frame::zero();
        frame.set(Channel::Pitch, 1.25);

        sink.send_frame(&frame).await.unwrap();
        sink.send_frame(&Frame::zero()).await.unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.frames()[0].get(Channel::Pitch), 1.25);
        assert!(sink.lines()[0].starts_with("1.25 0.0 0.0"));

        let frames = sink.drain();
        assert_eq!(frames.len(), 2);
        assert!(sink.is_empty());
        assert!(sink.lines().is_empty());
    }
}
