//! A small interactive client for line-based chat relays.
//!
//! The client connects to a chat server over TCP, prints every line the server sends, and sends
//! every line typed on standard input. There is no protocol beyond newline-delimited text.
//!
//! Two loops run at the same time once connected:
//!
//! - the inbound relay, a detached task on the global executor, copies server lines to
//!   standard output and prints a notice when the server closes the connection;
//! - the outbound loop, running on the calling thread, prompts for input and sends each line.
//!
//! The loops are deliberately independent. The server going away ends only the relay, and the
//! session ends only when local input does.
//!
//! # Examples
//!
//! Connect to a server on the default endpoint and chat over standard input and output:
//!
//! ```no_run
//! use chat_client::{Console, Endpoint, Session, Unblock};
//!
//! fn main() -> chat_client::Result<()> {
//!     chat_client::block_on(async {
//!         let mut session = Session::new(Endpoint::new("127.0.0.1", 6666));
//!         session.connect().await?;
//!         session
//!             .run(&mut Console::stdio(), Unblock::new(std::io::stdout()))
//!             .await
//!     })
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

mod error;
mod executor;

pub mod connection;
pub mod console;
pub mod endpoint;
pub mod relay;
pub mod session;

pub use crate::connection::Connection;
pub use crate::console::Console;
pub use crate::endpoint::Endpoint;
pub use crate::error::{Error, Result};
pub use crate::executor::{block_on, spawn, THREADS_ENV};
pub use crate::session::{Session, State};

#[doc(inline)]
pub use {async_executor::Task, blocking::Unblock};
