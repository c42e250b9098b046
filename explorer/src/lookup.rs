//! # Record Fetcher
//!
//! The [`ChainQuery`] trait is the seam between the page pipeline and the
//! Proofgold daemon. Production uses [`DaemonClient`], which speaks the
//! daemon's line protocol over TCP: one connection per query, the command
//! on the way in, a JSON envelope on the way out.
//!
//! There is deliberately no retry logic here. A page view is a single
//! user-facing request; if the daemon is down, the page fails now rather
//! than after three polite attempts.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config;
use crate::error::ExplorerError;
use crate::model::{decode_envelope, LookupResult};

/// Resolves an identifier to a [`LookupResult`] against the chain data
/// source. The identifier is passed through verbatim; the daemon is
/// authoritative on what it names, no local format validation.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    async fn query_record(&self, identifier: &str) -> Result<LookupResult, ExplorerError>;
}

/// TCP client for the daemon's query socket.
///
/// Each call opens a fresh connection, writes `querymg <identifier>\n`,
/// half-closes, and reads the reply to EOF. The whole exchange runs under
/// one timeout.
#[derive(Debug, Clone)]
pub struct DaemonClient {
    addr: String,
    timeout: Duration,
}

impl DaemonClient {
    /// Client for the daemon at `addr`, with the default exchange timeout.
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: config::DAEMON_TIMEOUT,
        }
    }

    /// Overrides the exchange timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The daemon address this client talks to.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn exchange(&self, command: &str) -> Result<Vec<u8>, ExplorerError> {
        let mut stream = TcpStream::connect(&self.addr).await?;

        stream.write_all(command.as_bytes()).await?;
        stream.write_all(b"\n").await?;
        // Half-close tells the daemon the command is complete.
        stream.shutdown().await?;

        let mut reply = Vec::new();
        stream.read_to_end(&mut reply).await?;
        Ok(reply)
    }
}

#[async_trait]
impl ChainQuery for DaemonClient {
    async fn query_record(&self, identifier: &str) -> Result<LookupResult, ExplorerError> {
        let command = format!("{} {}", config::QUERY_COMMAND, identifier);
        tracing::debug!(daemon = %self.addr, identifier, "issuing daemon query");

        let reply = tokio::time::timeout(self.timeout, self.exchange(&command))
            .await
            .map_err(|_| {
                ExplorerError::Transport(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("daemon query timed out after {:?}", self.timeout),
                ))
            })??;

        decode_envelope(&reply)
    }
}
