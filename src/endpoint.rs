//! The address of the chat server.

use std::fmt;

use tracing::debug;

use crate::error::Error;

/// Host used when no host argument is given.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port used when no port argument is given or the given one is malformed.
pub const DEFAULT_PORT: u16 = 6666;

/// Host and port of a chat server.
///
/// An endpoint is supplied once at startup and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Creates an endpoint.
    pub fn new(host: impl Into<String>, port: u16) -> Endpoint {
        Endpoint {
            host: host.into(),
            port,
        }
    }

    /// Builds an endpoint from the positional arguments `[host] [port]`.
    ///
    /// Missing arguments take their defaults and anything past the second argument is ignored.
    /// A malformed port is not fatal: the default port is used and the returned error describes
    /// what was rejected, so the caller can report it.
    ///
    /// # Examples
    ///
    /// ```
    /// use chat_client::Endpoint;
    ///
    /// let (endpoint, err) = Endpoint::from_args(vec!["chat.local", "seven"]);
    /// assert_eq!(endpoint, Endpoint::new("chat.local", 6666));
    /// assert!(err.is_some());
    /// ```
    pub fn from_args<I, S>(args: I) -> (Endpoint, Option<Error>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let host = args.next().unwrap_or_else(|| DEFAULT_HOST.to_string());

        let (port, err) = match args.next() {
            None => (DEFAULT_PORT, None),
            Some(input) => match parse_port(&input) {
                Ok(port) => (port, None),
                Err(err) => {
                    debug!(%input, "malformed port argument, falling back to {}", DEFAULT_PORT);
                    (DEFAULT_PORT, Some(err))
                }
            },
        };

        (Endpoint { host, port }, err)
    }

    /// Returns the host name or address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for Endpoint {
    fn default() -> Endpoint {
        Endpoint::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

fn parse_port(input: &str) -> Result<u16, Error> {
    match input.trim().parse::<u16>() {
        Ok(0) => Err(Error::InvalidPort {
            input: input.to_string(),
            source: None,
        }),
        Ok(port) => Ok(port),
        Err(source) => Err(Error::InvalidPort {
            input: input.to_string(),
            source: Some(source),
        }),
    }
}
