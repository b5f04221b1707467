//! The stream connection to a chat server.

use std::net::Shutdown;

use async_net::TcpStream;
use futures_lite::io::BufReader;
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

/// An established connection to a chat server.
///
/// A connection is opened once and consumed by [`Connection::split()`], which hands out the two
/// halves driven by the inbound relay and the outbound loop.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
}

impl Connection {
    /// Connects to the chat server at `endpoint`.
    ///
    /// The host name is resolved first. There is no timeout and no retry: the attempt waits as
    /// long as the transport does and the first failure is returned.
    pub async fn connect(endpoint: &Endpoint) -> Result<Connection> {
        debug!(%endpoint, "connecting");

        match TcpStream::connect((endpoint.host(), endpoint.port())).await {
            Ok(stream) => Ok(Connection { stream }),
            Err(source) => {
                debug!(%endpoint, error = %source, "connection failed");
                Err(Error::Connect {
                    endpoint: endpoint.clone(),
                    source,
                })
            }
        }
    }

    /// Splits the connection into its receiving and sending halves.
    pub fn split(self) -> (Inbound, Outbound) {
        let inbound = Inbound {
            reader: BufReader::new(self.stream.clone()),
        };
        let outbound = Outbound {
            stream: self.stream,
        };
        (inbound, outbound)
    }
}

/// The receiving half of a connection, buffered for reading lines.
#[derive(Debug)]
pub struct Inbound {
    reader: BufReader<TcpStream>,
}

impl Inbound {
    /// Returns the buffered reader over the receive side.
    pub fn into_reader(self) -> BufReader<TcpStream> {
        self.reader
    }
}

/// The sending half of a connection.
///
/// [`Outbound::close()`] shuts down the send side, so the server sees the end of the stream right
/// away. The receive side stays with the inbound relay until it ends or the process exits.
#[derive(Debug)]
pub struct Outbound {
    stream: TcpStream,
}

impl Outbound {
    /// Returns the writer for the send side.
    pub fn writer(&mut self) -> &mut TcpStream {
        &mut self.stream
    }

    /// Releases the send side of the connection.
    pub fn close(self) {
        // The peer may already be gone, in which case there is nothing left to shut down.
        if let Err(err) = self.stream.shutdown(Shutdown::Write) {
            debug!(error = %err, "shutdown after close");
        }
    }
}
