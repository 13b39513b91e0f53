//! TCP transport to the renderer
//!
//! One stream, opened once at startup and kept for the whole session. The
//! renderer is a co-located process: if the connection cannot be opened or a
//! write fails, the session is over and the error goes back to the caller.

use std::net::{Ipv4Addr, SocketAddr};

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use puppet_core::{Frame, PuppetError, PuppetResult, DEFAULT_RENDERER_PORT};

use crate::{encode_frame, FrameSink, Framing};

/// Loopback address of the renderer
pub fn default_renderer_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_RENDERER_PORT))
}

/// TCP transport for PUPPET frames
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    peer_addr: SocketAddr,
    framing: Framing,
    frames_sent: u64,
}

impl TcpTransport {
    /// Connect to the renderer
    pub async fn connect(addr: SocketAddr, framing: Framing) -> PuppetResult<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| PuppetError::ConnectionFailed {
                addr,
                reason: e.to_string(),
            })?;

        // Frames are small and latency-sensitive
        stream
            .set_nodelay(true)
            .map_err(|e| PuppetError::TransportError(e.to_string()))?;

        tracing::info!(%addr, ?framing, "connected to renderer");

        Ok(TcpTransport {
            stream,
            peer_addr: addr,
            framing,
            frames_sent: 0,
        })
    }

    /// Renderer address
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Local address of the stream
    pub fn local_addr(&self) -> PuppetResult<SocketAddr> {
        self.stream
            .local_addr()
            .map_err(|e| PuppetError::TransportError(e.to_string()))
    }

    /// Frames written so far
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Send raw bytes
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> PuppetResult<()> {
        self.stream
            .write_all(bytes)
            .await
            .map_err(|e| PuppetError::TransportError(e.to_string()))
    }

    /// Flush and close the write half
    pub async fn shutdown(&mut self) -> PuppetResult<()> {
        self.stream
            .shutdown()
            .await
            .map_err(|e| PuppetError::TransportError(e.to_string()))
    }
}

impl FrameSink for TcpTransport {
    async fn send_frame(&mut self, frame: &Frame) -> PuppetResult<()> {
        let line = encode_frame(frame, self.framing);
        self.send_bytes(line.as_bytes()).await?;
        self.frames_sent += 1;
        tracing::trace!(seq = self.frames_sent, %line, "frame sent");
        Ok(())
    }
}
