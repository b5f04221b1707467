use std::io;
use std::num::ParseIntError;

use thiserror::Error;

use crate::endpoint::{Endpoint, DEFAULT_PORT};
use crate::session::State;

/// Errors produced by the chat client.
#[derive(Debug, Error)]
pub enum Error {
    /// The port argument was not a port number.
    ///
    /// This error is recoverable: the default port is used instead.
    #[error("invalid port # {input:?}, using {port}", port = DEFAULT_PORT)]
    InvalidPort {
        /// The rejected argument.
        input: String,
        /// Absent when the argument parsed but named port zero.
        #[source]
        source: Option<ParseIntError>,
    },

    /// The initial connection to the chat server could not be established.
    #[error("cannot connect to {endpoint}: {source}")]
    Connect {
        /// The endpoint that was dialed.
        endpoint: Endpoint,
        /// The underlying cause: refused, unreachable, timed out or unresolvable.
        #[source]
        source: io::Error,
    },

    /// Reading local input or writing to the local console failed.
    #[error("console I/O error: {0}")]
    Console(#[source] io::Error),

    /// Sending a line to the chat server failed.
    #[error("failed to send to server: {0}")]
    Send(#[source] io::Error),

    /// A session operation was called in the wrong state.
    #[error("operation not allowed while the session is {0}")]
    InvalidState(State),
}

/// A specialized result type for chat client operations.
pub type Result<T> = std::result::Result<T, Error>;
