//! Byte-level I/O collaborators for the input and output opcodes.
//!
//! Any [`std::io::Read`] is an input source and any [`std::io::Write`] is
//! an output sink, so stdin/stdout, byte slices and `Vec<u8>` all work
//! directly.

use std::io::{self, Read, Write};

/// An ordered supply of input bytes.
pub trait InputSource {
    /// The next byte, or `None` at end of input.
    fn next_byte(&mut self) -> io::Result<Option<u8>>;
}

/// An append-only destination for output bytes.
pub trait OutputSink {
    /// Emit one byte. Bytes must become visible in call order.
    fn emit(&mut self, byte: u8) -> io::Result<()>;
}

impl<R: Read> InputSource for R {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<W: Write> OutputSink for W {
    fn emit(&mut self, byte: u8) -> io::Result<()> {
        self.write_all(&[byte])?;
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_input_yields_bytes_then_end() {
        let mut input: &[u8] = b"ab";
        assert_eq!(input.next_byte().unwrap(), Some(b'a'));
        assert_eq!(input.next_byte().unwrap(), Some(b'b'));
        assert_eq!(input.next_byte().unwrap(), None);
        assert_eq!(input.next_byte().unwrap(), None);
    }

    #[test]
    fn vec_output_appends_in_order() {
        let mut out: Vec<u8> = Vec::new();
        out.emit(b'H').unwrap();
        out.emit(b'i').unwrap();
        assert_eq!(out, b"Hi");
    }

    #[test]
    fn empty_reader_is_end_of_input() {
        let mut input = io::empty();
        assert_eq!(input.next_byte().unwrap(), None);
    }
}
