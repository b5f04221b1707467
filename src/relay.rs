//! The two loops of a session.
//!
//! The inbound relay copies lines from the server to local output and the outbound loop copies
//! lines from the console to the server. They share nothing: each drives one half of the
//! connection.

use std::io;

use futures_lite::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::console::{Console, SERVER_CLOSED};
use crate::error::{Error, Result};

/// How the inbound relay ended.
#[derive(Debug)]
pub enum RelayEnd {
    /// The server closed the connection.
    Closed,

    /// Reading from the server or writing to local output failed.
    Failed(io::Error),
}

/// Prints every line received from `reader` to `output`, in arrival order.
///
/// Each line is written as received with its terminator normalized to `\n`. A trailing line
/// without a terminator is printed too. When the server closes the connection or an error
/// occurs, the closure notice is printed and the relay ends. Errors are reported in the
/// returned [`RelayEnd`] and never passed anywhere else.
pub async fn relay_inbound<R, W>(mut reader: R, mut output: W) -> RelayEnd
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let end = match copy_lines(&mut reader, &mut output).await {
        Ok(()) => RelayEnd::Closed,
        Err(err) => RelayEnd::Failed(err),
    };
    debug!(?end, "inbound relay finished");

    let notice = format!("{}\n", SERVER_CLOSED);
    if output.write_all(notice.as_bytes()).await.is_ok() {
        output.flush().await.ok();
    }
    end
}

async fn copy_lines<R, W>(reader: &mut R, output: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(());
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        line.push(b'\n');

        output.write_all(&line).await?;
        output.flush().await?;
    }
}

/// Sends every line typed on the console to `sink` until the console input ends.
///
/// The prompt is printed before each read, and each line is written with exactly one `\n`
/// before the next read starts.
pub async fn forward_outbound<I, O, W>(console: &mut Console<I, O>, sink: &mut W) -> Result<()>
where
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        console.prompt().await.map_err(Error::Console)?;

        let line = match console.read_line().await.map_err(Error::Console)? {
            Some(line) => line,
            None => return Ok(()),
        };

        send_line(sink, line).await.map_err(Error::Send)?;
    }
}

async fn send_line<W: AsyncWrite + Unpin>(sink: &mut W, line: String) -> io::Result<()> {
    let mut bytes = line.into_bytes();
    bytes.push(b'\n');
    sink.write_all(&bytes).await?;
    sink.flush().await
}
