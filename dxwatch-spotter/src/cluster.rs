//! DX cluster telnet session
//!
//! Connects to the cluster, answers the login prompt with the configured
//! callsign, then hands out the feed one line at a time. The feed is plain
//! ASCII in practice but stray bytes do occur, so lines are decoded lossily
//! rather than rejected.
//!
//! A session error is fatal to that session only; the caller reconnects
//! with backoff and resets the novelty suppression state.

use crate::error::{Error, Result};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const LOGIN_TIMEOUT: Duration = Duration::from_secs(30);

/// One live cluster connection, logged in and framed by lines.
#[derive(Debug)]
pub struct ClusterSession {
    reader: BufReader<TcpStream>,
}

impl ClusterSession {
    /// Connect and complete the login handshake.
    ///
    /// The cluster greets with a banner ending in a `:` prompt
    /// (`login:`, `call:`, wording varies); everything up to the first `:`
    /// is consumed, then the callsign is sent.
    pub async fn connect(host: &str, port: u16, login_callsign: &str) -> Result<Self> {
        let stream = timeout(CONNECT_TIMEOUT, TcpStream::connect((host, port)))
            .await
            .map_err(|_| Error::Session(format!("connect to {}:{} timed out", host, port)))?
            .map_err(|e| Error::Session(format!("connect to {}:{} failed: {}", host, port, e)))?;

        let mut reader = BufReader::new(stream);

        let mut prompt = Vec::new();
        let n = timeout(LOGIN_TIMEOUT, reader.read_until(b':', &mut prompt))
            .await
            .map_err(|_| Error::Session("timed out waiting for login prompt".to_string()))??;
        if n == 0 {
            return Err(Error::Session(
                "connection closed before login prompt".to_string(),
            ));
        }
        debug!(prompt = %String::from_utf8_lossy(&prompt), "received login prompt");

        reader
            .get_mut()
            .write_all(format!("{}\n", login_callsign).as_bytes())
            .await?;
        info!(host = %host, port = port, callsign = %login_callsign, "logged in to cluster");

        Ok(Self { reader })
    }

    /// Next raw feed line, without the trailing newline.
    ///
    /// Returns `Ok(None)` on clean EOF (remote closed the session).
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        while buf.last() == Some(&b'\n') || buf.last() == Some(&b'\r') {
            buf.pop();
        }
        let line = String::from_utf8_lossy(&buf).into_owned();
        debug!(line = %line, "cluster feed line");
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    async fn fake_cluster(greeting: &'static [u8], lines: &'static [u8]) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            sock.write_all(greeting).await.unwrap();
            // Read the login line before sending the feed
            let mut buf = [0u8; 64];
            let mut login = Vec::new();
            loop {
                let n = sock.read(&mut buf).await.unwrap();
                login.extend_from_slice(&buf[..n]);
                if login.contains(&b'\n') {
                    break;
                }
            }
            assert_eq!(login, b"TEST1/P\n");
            sock.write_all(lines).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_login_and_line_framing() {
        let addr = fake_cluster(
            b"Welcome to the test cluster\nPlease enter your call:",
            b"\nDX de W1AW: 14025.0 JA1ABC cq 1234Z\r\nseventy three\r\n",
        )
        .await;

        let mut session = ClusterSession::connect(&addr.ip().to_string(), addr.port(), "TEST1/P")
            .await
            .unwrap();

        // Blank line left over from the login exchange, then the feed
        let line = session.next_line().await.unwrap().unwrap();
        assert_eq!(line, "");
        let line = session.next_line().await.unwrap().unwrap();
        assert_eq!(line, "DX de W1AW: 14025.0 JA1ABC cq 1234Z");
        let line = session.next_line().await.unwrap().unwrap();
        assert_eq!(line, "seventy three");
        assert!(session.next_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_connect_refused_is_session_error() {
        // Port 1 on localhost is not listening
        let err = ClusterSession::connect("127.0.0.1", 1, "TEST1")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Session(_)));
    }
}
