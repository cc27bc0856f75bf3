//! Command engine: transport bytes in, one response line out.
//!
//! ```text
//!  Transport ──▶ LineDecoder ──▶ dispatch(line) ──▶ Response ──▶ Transport
//! ```
//!
//! Each [`poll`](CommandEngine::poll) handles at most one line so the main
//! loop stays responsive when several commands arrive at once. Bytes are
//! pulled one at a time, which leaves any following line in the transport.

use log::debug;

use super::codec::{LineDecoder, LineEvent};
use super::response::{Response, TERMINATOR};
use super::transport::Transport;

#[derive(Default)]
pub struct CommandEngine {
    decoder: LineDecoder,
}

impl CommandEngine {
    pub fn new() -> Self {
        Self {
            decoder: LineDecoder::new(),
        }
    }

    /// Read until one line completes (or input runs dry), dispatch it, and
    /// write the response.
    ///
    /// `dispatch` receives the raw line bytes and is not called on overflow.
    /// Returns the response that was sent, if any.
    pub fn poll<T, F>(&mut self, transport: &mut T, dispatch: F) -> Result<Option<Response>, T::Error>
    where
        T: Transport,
        F: FnOnce(&[u8]) -> Response,
    {
        let mut byte = [0u8; 1];
        let response = loop {
            if transport.read(&mut byte)? == 0 {
                return Ok(None);
            }
            match self.decoder.feed(byte[0]) {
                Some(LineEvent::Line(line)) => {
                    debug!("RX | {}", String::from_utf8_lossy(line));
                    break dispatch(line);
                }
                Some(LineEvent::Overflow) => break Response::Overflow,
                None => {}
            }
        };

        if !response.is_ok() {
            debug!("TX | {}", response);
        }
        let text = format!("{}{}", response, TERMINATOR);
        write_all(transport, text.as_bytes())?;
        transport.flush()?;
        Ok(Some(response))
    }
}

fn write_all<T: Transport>(transport: &mut T, mut data: &[u8]) -> Result<(), T::Error> {
    while !data.is_empty() {
        let n = transport.write(data)?;
        if n == 0 {
            break;
        }
        data = &data[n..];
    }
    Ok(())
}
