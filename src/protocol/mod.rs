//! Line-oriented ASCII command protocol.
//!
//! - [`codec`]: byte stream to lines, with overflow handling
//! - [`command`]: grammar, tokenizer, range checks
//! - [`response`]: exact `OK:` / `ERR:` wire text
//! - [`engine`]: one line per poll over a [`transport::Transport`]

pub mod codec;
pub mod command;
pub mod engine;
pub mod response;
pub mod transport;

pub use command::{Command, CommandKind, ParseError, Query, parse, parse_bytes};
pub use engine::CommandEngine;
pub use response::Response;
