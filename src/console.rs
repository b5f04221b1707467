//! The local interactive console.

use std::io::{self, Stdin, Stdout};

use blocking::Unblock;
use futures_lite::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::endpoint::Endpoint;

/// Printed before every read of local input.
pub const PROMPT: &str = "> ";

/// Printed when the server side of the connection ends.
pub const SERVER_CLOSED: &str = "Connection closed by server";

/// Printed when local input is exhausted.
pub const TERMINATED: &str = "Client terminated.";

/// Returns the welcome banner shown after connecting to `endpoint`.
pub fn welcome(endpoint: &Endpoint) -> String {
    format!("Welcome to chat server {}", endpoint)
}

/// Console input and output.
///
/// The console reads lines typed by the user and writes the banner, prompts and notices. Lines
/// received from the server do not go through the console: the inbound relay owns its own
/// output handle.
#[derive(Debug)]
pub struct Console<I, O> {
    input: I,
    output: O,
}

impl Console<BufReader<Unblock<Stdin>>, Unblock<Stdout>> {
    /// Creates a console over the process's standard input and output.
    pub fn stdio() -> Self {
        Console::new(
            BufReader::new(Unblock::new(io::stdin())),
            Unblock::new(io::stdout()),
        )
    }
}

impl<I, O> Console<I, O>
where
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    /// Creates a console over the given input and output.
    pub fn new(input: I, output: O) -> Self {
        Console { input, output }
    }

    /// Writes the prompt without a line break.
    pub async fn prompt(&mut self) -> io::Result<()> {
        self.output.write_all(PROMPT.as_bytes()).await?;
        self.output.flush().await
    }

    /// Writes a full line.
    pub async fn println(&mut self, line: &str) -> io::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    /// Reads the next line of input with its line terminator removed.
    ///
    /// Returns `None` at end of input.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Consumes the console and returns its input and output.
    pub fn into_inner(self) -> (I, O) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_on;

    #[test]
    fn read_lines_strips_terminators() {
        block_on(async {
            let mut console = Console::new(&b"one\r\ntwo\n\nlast"[..], Vec::new());

            assert_eq!(console.read_line().await.unwrap().as_deref(), Some("one"));
            assert_eq!(console.read_line().await.unwrap().as_deref(), Some("two"));
            assert_eq!(console.read_line().await.unwrap().as_deref(), Some(""));
            assert_eq!(console.read_line().await.unwrap().as_deref(), Some("last"));
            assert_eq!(console.read_line().await.unwrap(), None);
        })
    }

    #[test]
    fn prompt_and_notices() {
        block_on(async {
            let mut console = Console::new(&b""[..], Vec::new());
            console.println(&welcome(&Endpoint::new("host", 1))).await.unwrap();
            console.prompt().await.unwrap();
            console.println(TERMINATED).await.unwrap();

            let (_, output) = console.into_inner();
            assert_eq!(
                String::from_utf8(output).unwrap(),
                "Welcome to chat server host:1\n> Client terminated.\n"
            );
        })
    }

    #[test]
    fn invalid_utf8_input_is_an_error() {
        block_on(async {
            let mut console = Console::new(&b"\xff\xfe\n"[..], Vec::new());
            let err = console.read_line().await.unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        })
    }
}
