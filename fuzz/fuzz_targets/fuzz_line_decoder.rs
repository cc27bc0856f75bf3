//! Fuzz target: `LineDecoder::feed`
//!
//! Drives arbitrary byte sequences into the line decoder and asserts that
//! it never panics, never yields an empty or oversized line, and recovers
//! cleanly after a reset.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use tzclock::config::LINE_CAPACITY;
use tzclock::protocol::codec::{LineDecoder, LineEvent};

fuzz_target!(|data: &[u8]| {
    let mut decoder = LineDecoder::new();

    for &byte in data {
        if let Some(LineEvent::Line(line)) = decoder.feed(byte) {
            assert!(!line.is_empty(), "decoder must not yield empty lines");
            assert!(line.len() <= LINE_CAPACITY, "line exceeds LINE_CAPACITY");
            assert!(!line.iter().any(|b| *b == b'\r' || *b == b'\n'));
        }
    }

    // After a reset the decoder must accept a fresh line.
    decoder.reset();
    assert_eq!(decoder.pending(), 0);
    for &byte in b"QF" {
        assert!(decoder.feed(byte).is_none());
    }
    assert_eq!(decoder.feed(b'\n'), Some(LineEvent::Line(&b"QF"[..])));
});
