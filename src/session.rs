//! A chat session: one connection and its two loops.

use std::fmt;

use futures_lite::io::{AsyncBufRead, AsyncWrite};
use tracing::debug;

use crate::connection::Connection;
use crate::console::{self, Console};
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::executor::spawn;
use crate::relay::{forward_outbound, relay_inbound};

/// Lifecycle of a [`Session`].
///
/// ```text
/// Disconnected -> Connecting -> Connected -> Closed
///                     |                        ^
///                     +------------------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No connection attempt was made yet.
    Disconnected,
    /// A connection attempt is in progress.
    Connecting,
    /// The connection is established.
    Connected,
    /// The session is over, either because connecting failed or because it ran to completion.
    Closed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Disconnected => "disconnected",
            State::Connecting => "connecting",
            State::Connected => "connected",
            State::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// A session with a chat server.
///
/// A session connects once and runs once. Neither step is retried.
///
/// # Examples
///
/// ```no_run
/// use chat_client::{Console, Endpoint, Session, Unblock};
///
/// # fn main() -> chat_client::Result<()> {
/// chat_client::block_on(async {
///     let mut session = Session::new(Endpoint::default());
///     session.connect().await?;
///
///     let mut console = Console::stdio();
///     session.run(&mut console, Unblock::new(std::io::stdout())).await
/// })
/// # }
/// ```
#[derive(Debug)]
pub struct Session {
    endpoint: Endpoint,
    state: State,
    connection: Option<Connection>,
}

impl Session {
    /// Creates a disconnected session for `endpoint`.
    pub fn new(endpoint: Endpoint) -> Session {
        Session {
            endpoint,
            state: State::Disconnected,
            connection: None,
        }
    }

    /// Returns the endpoint of this session.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the established connection, if any.
    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    /// Connects to the server.
    ///
    /// On failure the session is closed for good.
    pub async fn connect(&mut self) -> Result<()> {
        if self.state != State::Disconnected {
            return Err(Error::InvalidState(self.state));
        }

        self.transition(State::Connecting);
        match Connection::connect(&self.endpoint).await {
            Ok(connection) => {
                self.connection = Some(connection);
                self.transition(State::Connected);
                Ok(())
            }
            Err(err) => {
                self.transition(State::Closed);
                Err(err)
            }
        }
    }

    /// Runs the session until console input ends.
    ///
    /// Prints the welcome banner, spawns the inbound relay writing to `relay_output`, and then
    /// forwards console lines to the server. The relay is detached: when the server closes the
    /// connection it prints its notice and stops, while this loop keeps reading input until the
    /// user ends it or a send fails. Ending the relay never ends the loop.
    ///
    /// The send side of the connection is shut down on every way out of this function, after the
    /// termination notice when input ended normally. The receive side is left to the relay.
    pub async fn run<I, O, R>(
        &mut self,
        console: &mut Console<I, O>,
        relay_output: R,
    ) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
        R: AsyncWrite + Send + Unpin + 'static,
    {
        let connection = match (self.state, self.connection.take()) {
            (State::Connected, Some(connection)) => connection,
            (state, connection) => {
                self.connection = connection;
                return Err(Error::InvalidState(state));
            }
        };

        let (inbound, mut outbound) = connection.split();

        let mut result = console
            .println(&console::welcome(&self.endpoint))
            .await
            .map_err(Error::Console);
        if result.is_ok() {
            spawn(relay_inbound(inbound.into_reader(), relay_output)).detach();
            result = forward_outbound(console, outbound.writer()).await;
        }

        let result = match result {
            Ok(()) => console
                .println(console::TERMINATED)
                .await
                .map_err(Error::Console),
            Err(err) => {
                debug!(error = %err, "session ended with an error");
                Err(err)
            }
        };

        outbound.close();
        self.transition(State::Closed);
        result
    }

    fn transition(&mut self, to: State) {
        debug!(endpoint = %self.endpoint, from = %self.state, %to, "session state");
        self.state = to;
    }
}
