//! Byte channels the command engine reads lines from.
//!
//! The appliance reads its USB serial link, the host binary reads stdin, and
//! tests push bytes into a [`BufferTransport`].

pub trait Transport {
    type Error: core::fmt::Debug;

    /// Non-blocking read. `Ok(0)` means nothing is pending right now.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Returns how many bytes of `data` were accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// In-memory loopback: bytes pushed with [`push_input`](Self::push_input)
/// are read back in order; everything written is captured.
#[derive(Debug, Default)]
pub struct BufferTransport {
    input: std::collections::VecDeque<u8>,
    output: Vec<u8>,
}

impl BufferTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_input(&mut self, data: &[u8]) {
        self.input.extend(data);
    }

    /// Take everything written so far as text.
    pub fn take_output(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.output).into_owned();
        self.output.clear();
        text
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }
}

impl Transport for BufferTransport {
    type Error = core::convert::Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut n = 0;
        while n < buf.len() {
            match self.input.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.output.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
