// Timing sources: the live WebSocket relay client and a scripted stand-in
// for tests and offline replay.

use std::{
    collections::VecDeque,
    io::{BufRead, BufReader},
    path::Path,
};

use futures_util::StreamExt;
use log::{debug, info, warn};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, Message},
};

use crate::errors::LapboardError;

/// A source of raw timing lines for the dashboard.
///
/// The live implementation reads text frames from the relay's WebSocket
/// endpoint; the scripted implementation replays a fixed sequence for tests
/// and offline runs. The collector drives either one through the same
/// lifecycle:
///
/// 1. Call `connect()` to establish the link
/// 2. Call `next_line()` repeatedly and parse each returned line
/// 3. After a read error, call `connect()` again to attempt a fresh link
pub trait TimingSource {
    /// Establish the link to the timing relay.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRelayUrl` when the endpoint can never be reached as
    /// written. Any other connect error is worth retrying.
    fn connect(&mut self) -> Result<(), LapboardError>;

    /// Block until the relay delivers the next text line.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not connected or the link drops
    /// mid-read. The source is disconnected afterwards either way.
    fn next_line(&mut self) -> Result<String, LapboardError>;

    /// Drop the link to the relay.
    fn disconnect(&mut self) -> Result<(), LapboardError>;
}

/// Reads timing lines from the relay's WebSocket endpoint.
///
/// The relay pushes one event per text frame. Frames are read on a small
/// single-threaded tokio runtime owned by the source, so callers stay
/// synchronous like the rest of the collector thread.
pub struct RelaySource {
    url: String,
    runtime: tokio::runtime::Runtime,
    socket: Option<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl RelaySource {
    pub fn new(url: &str) -> Result<Self, LapboardError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()
            .map_err(|e| LapboardError::RelayRuntimeError { source: e })?;
        Ok(RelaySource {
            url: url.to_string(),
            runtime,
            socket: None,
        })
    }
}

impl TimingSource for RelaySource {
    fn connect(&mut self) -> Result<(), LapboardError> {
        match self.runtime.block_on(connect_async(self.url.as_str())) {
            Ok((socket, _response)) => {
                info!("connected to timing relay at {}", self.url);
                self.socket = Some(socket);
                Ok(())
            }
            Err(e @ (tungstenite::Error::Url(_) | tungstenite::Error::HttpFormat(_))) => {
                warn!("relay URL rejected: {}", e);
                Err(LapboardError::InvalidRelayUrl {
                    url: self.url.clone(),
                })
            }
            Err(e) => Err(LapboardError::RelayConnectionError { source: e }),
        }
    }

    fn next_line(&mut self) -> Result<String, LapboardError> {
        loop {
            let frame = match self.socket.as_mut() {
                Some(socket) => self.runtime.block_on(socket.next()),
                None => return Err(LapboardError::RelayNotConnected),
            };
            match frame {
                Some(Ok(Message::Text(line))) => {
                    debug!("relay message: {:?}", line);
                    return Ok(line);
                }
                Some(Ok(Message::Close(_))) | None => {
                    self.socket = None;
                    return Err(LapboardError::RelayReadError {
                        source: tungstenite::Error::ConnectionClosed,
                    });
                }
                Some(Ok(other)) => {
                    debug!("ignoring non-text relay frame: {:?}", other);
                }
                Some(Err(e)) => {
                    self.socket = None;
                    return Err(LapboardError::RelayReadError { source: e });
                }
            }
        }
    }

    fn disconnect(&mut self) -> Result<(), LapboardError> {
        if let Some(mut socket) = self.socket.take() {
            // best effort close frame, the relay may already be gone
            let _ = self.runtime.block_on(socket.close(None));
        }
        Ok(())
    }
}

/// Replays a fixed sequence of relay lines.
///
/// Once the lines run out, `next_line` and any later `connect` fail with
/// `ScriptExhausted`, so a collector driving this source winds down through
/// its normal retry path instead of spinning forever.
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    pub fn from_lines(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|line| line.to_string()).collect(),
        }
    }

    /// Load a recorded session from a text file, one relay message per line.
    pub fn from_file(path: &Path) -> Result<Self, LapboardError> {
        let file =
            std::fs::File::open(path).map_err(|e| LapboardError::ScriptReadError { source: e })?;
        let reader = BufReader::new(file);

        let mut lines = VecDeque::new();
        for line in reader.lines() {
            let line = line.map_err(|e| LapboardError::ScriptReadError { source: e })?;
            lines.push_back(line);
        }
        Ok(Self { lines })
    }
}

impl TimingSource for ScriptedSource {
    fn connect(&mut self) -> Result<(), LapboardError> {
        if self.lines.is_empty() {
            return Err(LapboardError::ScriptExhausted);
        }
        Ok(())
    }

    fn next_line(&mut self) -> Result<String, LapboardError> {
        self.lines
            .pop_front()
            .ok_or(LapboardError::ScriptExhausted)
    }

    fn disconnect(&mut self) -> Result<(), LapboardError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_scripted_source_replays_lines_in_order() {
        let mut source = ScriptedSource::from_lines(&["START:1", "RESULT:1:2.345"]);
        assert!(source.connect().is_ok());
        assert_eq!(source.next_line().unwrap(), "START:1");
        assert_eq!(source.next_line().unwrap(), "RESULT:1:2.345");
        assert!(source.disconnect().is_ok());
    }

    #[test]
    fn test_scripted_source_exhausts() {
        let mut source = ScriptedSource::from_lines(&["START:1"]);
        source.connect().unwrap();
        source.next_line().unwrap();
        assert!(matches!(
            source.next_line(),
            Err(LapboardError::ScriptExhausted)
        ));
        // a source that has played out refuses new connections too
        assert!(matches!(
            source.connect(),
            Err(LapboardError::ScriptExhausted)
        ));
    }

    #[test]
    fn test_scripted_source_from_file() {
        let mut script = tempfile::NamedTempFile::new().unwrap();
        writeln!(script, "START:1").unwrap();
        writeln!(script, "RESULT:1:2.345").unwrap();
        script.flush().unwrap();

        let mut source = ScriptedSource::from_file(script.path()).unwrap();
        source.connect().unwrap();
        assert_eq!(source.next_line().unwrap(), "START:1");
        assert_eq!(source.next_line().unwrap(), "RESULT:1:2.345");
    }

    #[test]
    fn test_relay_source_requires_connect() {
        let mut source = RelaySource::new("ws://localhost:8765").unwrap();
        assert!(matches!(
            source.next_line(),
            Err(LapboardError::RelayNotConnected)
        ));
        // disconnect without a live socket is a no-op
        assert!(source.disconnect().is_ok());
    }

    #[test]
    fn test_relay_source_rejects_malformed_url() {
        // wrong scheme, no port to fall back on
        let mut source = RelaySource::new("http://localhost").unwrap();
        assert!(matches!(
            source.connect(),
            Err(LapboardError::InvalidRelayUrl { .. })
        ));

        let mut source = RelaySource::new("not a url").unwrap();
        assert!(matches!(
            source.connect(),
            Err(LapboardError::InvalidRelayUrl { .. })
        ));
    }
}
