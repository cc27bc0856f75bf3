//! Line codec for the ASCII command channel.
//!
//! Wire format:
//! ```text
//! ┌────────────────────────┬──────────────┐
//! │ ASCII command (≤ 64 B) │ CR and/or LF │
//! └────────────────────────┴──────────────┘
//! ```
//!
//! The decoder is fed one byte at a time so that partial reads, several
//! lines per read, and CRLF pairs all work the same way. Empty lines are
//! skipped. A line longer than the buffer yields a single
//! [`LineEvent::Overflow`] and the remainder of that line is dropped.

use heapless::Vec;

use crate::config::LINE_CAPACITY;

/// Decoder state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    /// Collecting bytes of the current line.
    Accumulating,
    /// Overflow reported; dropping bytes until the next terminator.
    Discarding,
}

/// Result of feeding a byte that completes something.
#[derive(Debug, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// A complete, non-empty line without its terminator.
    Line(&'a [u8]),
    /// The line exceeded [`LINE_CAPACITY`].
    Overflow,
}

/// Streaming line decoder.
pub struct LineDecoder {
    state: DecoderState,
    buf: Vec<u8, LINE_CAPACITY>,
    /// Holds the last completed line so the returned slice can outlive the reset.
    line: Vec<u8, LINE_CAPACITY>,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_terminator(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::Accumulating,
            buf: Vec::new(),
            line: Vec::new(),
        }
    }

    /// Feed one byte.
    ///
    /// Returns `Some` when a line completes or the buffer overflows. The
    /// returned slice is valid until the next call to `feed`.
    pub fn feed(&mut self, byte: u8) -> Option<LineEvent<'_>> {
        match self.state {
            DecoderState::Discarding => {
                if is_terminator(byte) {
                    self.state = DecoderState::Accumulating;
                }
                None
            }
            DecoderState::Accumulating if is_terminator(byte) => {
                if self.buf.is_empty() {
                    return None;
                }
                self.line = core::mem::take(&mut self.buf);
                Some(LineEvent::Line(&self.line))
            }
            DecoderState::Accumulating => {
                if self.buf.push(byte).is_err() {
                    self.buf.clear();
                    self.state = DecoderState::Discarding;
                    return Some(LineEvent::Overflow);
                }
                None
            }
        }
    }

    /// Drop any partial line (e.g. after a transport reconnect).
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = DecoderState::Accumulating;
    }

    /// Bytes of the line collected so far.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}
