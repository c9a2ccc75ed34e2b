//! Convert byte reader to utf8 character iterator.
//!
//! For some reason there is no such facility in `std::*`.

use std::io::prelude::*;
use std::io::{self, Bytes};
use std::iter::Peekable;
use std::str::{self, Utf8Error};

/// An iterator over a buffered reader that produces characters rather than bytes.
///
/// A malformed sequence is reported once and skipped, so iteration can go on after an error.
#[derive(Debug)]
pub struct CharReader<R: BufRead> {
    input: Peekable<Bytes<R>>,
    buf: [u8; 4],
}

impl<R: BufRead> CharReader<R> {
    pub fn new(input: R) -> CharReader<R> {
        CharReader {
            input: input.bytes().peekable(),
            buf: [0; 4],
        }
    }

    fn convert_multi_byte_char(
        &mut self,
        first_byte: u8,
        width: usize,
    ) -> Result<char, CharReaderError> {
        self.buf[0] = first_byte;
        let mut len = 1;
        while len < width {
            match self.input.peek() {
                Some(Ok(b)) if (b & 0b1100_0000) == 0b1000_0000 => {
                    self.buf[len] = *b;
                    self.input.next();
                    len += 1;
                }
                Some(Err(_)) => {
                    return match self.input.next() {
                        Some(Err(e)) => Err(CharReaderError::Io(e)),
                        _ => Err(CharReaderError::Truncated(first_byte)),
                    };
                }
                // EOF or start of next char
                _ => return Err(CharReaderError::Truncated(first_byte)),
            }
        }
        let s = str::from_utf8(&self.buf[..width])?;
        s.chars().next().ok_or(CharReaderError::Truncated(first_byte))
    }
}

/// Number of bytes in the sequence introduced by `b`, zero when `b` cannot start one.
fn sequence_width(b: u8) -> usize {
    match b {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 0,
    }
}

impl<R: BufRead> Iterator for CharReader<R> {
    type Item = Result<char, CharReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let b = match self.input.next()? {
            Ok(b) => b,
            Err(e) => return Some(Err(CharReaderError::Io(e))),
        };
        Some(match sequence_width(b) {
            0 => Err(CharReaderError::BadStartByte(b)),
            1 => Ok(b as char),
            width => self.convert_multi_byte_char(b, width),
        })
    }
}

/// Errors raised when reading and converting to UTF-8.
#[derive(Debug, thiserror::Error)]
pub enum CharReaderError {
    #[error("failed to read bytes: {0}")]
    Io(#[from] io::Error),
    #[error("unexpected UTF-8 start byte: {0:#04x}")]
    BadStartByte(u8),
    #[error("truncated UTF-8 sequence starting with {0:#04x}")]
    Truncated(u8),
    #[error("failed to convert byte sequence to UTF-8: {0}")]
    Utf8(#[from] Utf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &[u8]) -> Result<String, CharReaderError> {
        CharReader::new(input).collect::<Result<String, CharReaderError>>()
    }

    #[test]
    fn read_ascii() -> Result<(), CharReaderError> {
        assert_eq!(read(b"let x = 1;")?, "let x = 1;");
        Ok(())
    }

    #[test]
    fn read_mb_char_followed_by_eof() -> Result<(), CharReaderError> {
        assert_eq!(read("∏".as_bytes())?, "∏");
        Ok(())
    }

    #[test]
    fn read_mb_chars_of_every_width() -> Result<(), CharReaderError> {
        assert_eq!(read("aé∏😀b".as_bytes())?, "aé∏😀b");
        Ok(())
    }

    #[test]
    fn mb_with_invalid_starting_byte() {
        let mut reader = CharReader::new(&[0b1011_1111u8][..]);
        match reader.next() {
            Some(Err(CharReaderError::BadStartByte(0b1011_1111u8))) => (),
            r => panic!("unexpected output: {:?}", r),
        };
    }

    #[test]
    fn truncated_sequence_keeps_following_char() {
        let input = [0b1110_0000u8, 0b1010_0000u8, b'*'];
        let mut reader = CharReader::new(&input[..]);
        match reader.next() {
            Some(Err(CharReaderError::Truncated(0b1110_0000u8))) => (),
            r => panic!("unexpected output: {:?}", r),
        };
        match reader.next() {
            Some(Ok('*')) => (),
            r => panic!("unexpected output: {:?}", r),
        };
        assert!(reader.next().is_none());
    }

    #[test]
    fn overlong_encoding_is_rejected() {
        // 0xe0 0x80 0x80 would encode U+0000 in three bytes.
        let input = [0xe0u8, 0x80, 0x80];
        let mut reader = CharReader::new(&input[..]);
        match reader.next() {
            Some(Err(CharReaderError::Utf8(_))) => (),
            r => panic!("unexpected output: {:?}", r),
        };
    }
}
