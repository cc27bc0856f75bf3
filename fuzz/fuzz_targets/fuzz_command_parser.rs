//! Fuzz target: `protocol::parse_bytes` and response formatting
//!
//! Any line must either parse into a command whose fields are in range, or
//! be rejected; the matching response text must always start with `OK:` or
//! `ERR:`.
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use tzclock::protocol::{Command, ParseError, Response, parse_bytes};

fuzz_target!(|data: &[u8]| {
    match parse_bytes(data) {
        Ok(Command::SetBrightness(level)) => assert!(level <= 7),
        Ok(Command::SetTime { hour, minute, second }) => {
            assert!(hour < 24 && minute < 60 && second < 60);
        }
        Ok(Command::SetTimezone(id)) => assert!(id <= 20),
        Ok(_) => {}
        Err(ParseError::Unknown) => {
            let text = Response::unknown(data).to_string();
            assert!(text.starts_with("ERR:UNKNOWN "));
        }
        Err(e) => {
            let kind = e.kind().expect("setter errors carry their kind");
            assert!(Response::Rejected(kind).to_string().starts_with("ERR:"));
        }
    }
});
