//! Fake renderer - accepts one connection and records decoded frames

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use puppet_core::{Frame, PuppetError, PuppetResult};
use puppet_transport::decode_frame;

/// Loopback listener standing in for the renderer
///
/// Expects newline-delimited frames. Collection ends when the sender closes
/// its side of the stream.
pub struct FakeRenderer {
    addr: SocketAddr,
    handle: JoinHandle<PuppetResult<Vec<Frame>>>,
}

impl FakeRenderer {
    /// Bind an ephemeral loopback port and start accepting
    pub async fn bind() -> PuppetResult<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let (socket, peer) = listener.accept().await?;
            tracing::debug!(%peer, "renderer accepted connection");

            let mut lines = BufReader::new(socket).lines();
            let mut frames = Vec::new();
            while let Some(line) = lines.next_line().await? {
                frames.push(decode_frame(&line)?);
            }
            Ok::<_, PuppetError>(frames)
        });

        Ok(FakeRenderer { addr, handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait for the sender to close and return every frame received
    pub async fn finish(self) -> PuppetResult<Vec<Frame>> {
        self.handle
            .await
            .map_err(|e| PuppetError::TransportError(e.to_string()))?
    }
}
