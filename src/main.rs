//! An interactive chat client.
//!
//! Start a line-based chat server, for example on port 6666, then run:
//!
//! ```
//! cargo run -- 127.0.0.1 6666
//! ```
//!
//! Type a message and hit enter. End the input (Ctrl-D) to quit.

use std::env;
use std::error::Error as _;
use std::io;
use std::process::ExitCode;

use chat_client::{Console, Endpoint, Session, Unblock};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with the chat.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let (endpoint, err) = Endpoint::from_args(env::args().skip(1));
    if let Some(err) = err {
        eprintln!("{}", err);
    }
    info!(%endpoint, "starting");

    chat_client::block_on(async {
        let mut session = Session::new(endpoint);

        if let Err(err) = session.connect().await {
            // Report the transport's cause, not the wrapping context.
            let cause = err.source().map_or_else(|| err.to_string(), |source| source.to_string());
            eprintln!("Error connecting to server: {}", cause);
            return ExitCode::FAILURE;
        }

        let mut console = Console::stdio();
        match session.run(&mut console, Unblock::new(io::stdout())).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            }
        }
    })
}
