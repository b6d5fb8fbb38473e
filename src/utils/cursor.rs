use std::io::Cursor;

use crate::{Error, Result};

/// Byte-level reading helpers over an in-memory buffer.
///
/// Every method either succeeds and moves the cursor past what it consumed, or fails with a
/// formatting error. After a failure the position is unspecified.
pub trait EasyRead<'a> {
    /// Bytes not consumed yet.
    fn rest(&self) -> &'a [u8];
    fn advance(&mut self, count: usize);
    fn expect_literal(&mut self, literal: &[u8]) -> Result<()>;
    fn expect_byte(&mut self, byte: u8) -> Result<()>;
    fn read_exact_slice(&mut self, len: usize) -> Result<&'a [u8]>;
    /// Returns the bytes up to `terminator`, consuming the terminator too.
    fn read_until_checked(&mut self, terminator: u8) -> Result<&'a [u8]>;
}

impl<'a> EasyRead<'a> for Cursor<&'a [u8]> {
    fn rest(&self) -> &'a [u8] {
        let data: &'a [u8] = *self.get_ref();
        let position = usize::try_from(self.position()).unwrap_or(usize::MAX);
        &data[position.min(data.len())..]
    }

    fn advance(&mut self, count: usize) {
        self.set_position(self.position() + count as u64);
    }

    fn expect_literal(&mut self, literal: &[u8]) -> Result<()> {
        if !self.rest().starts_with(literal) {
            return Err(Error::formatting(format!(
                "expected {:?}",
                String::from_utf8_lossy(literal)
            )));
        }
        self.advance(literal.len());
        Ok(())
    }

    fn expect_byte(&mut self, byte: u8) -> Result<()> {
        match self.rest().first() {
            Some(b) if *b == byte => {
                self.advance(1);
                Ok(())
            }
            Some(b) => Err(Error::formatting(format!(
                "expected byte {:#04x}, got {:#04x}",
                byte, b
            ))),
            None => Err(Error::formatting(format!(
                "expected byte {:#04x}, buffer ended",
                byte
            ))),
        }
    }

    fn read_exact_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let rest = self.rest();
        if rest.len() < len {
            return Err(Error::formatting(format!(
                "expected {} more bytes, only {} left",
                len,
                rest.len()
            )));
        }
        self.advance(len);
        Ok(&rest[..len])
    }

    fn read_until_checked(&mut self, terminator: u8) -> Result<&'a [u8]> {
        let rest = self.rest();
        let end = rest
            .iter()
            .position(|b| *b == terminator)
            .ok_or_else(|| {
                Error::formatting(format!("expected terminator {:#04x}", terminator))
            })?;
        self.advance(end + 1);
        Ok(&rest[..end])
    }
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_literal_advances() {
        let data: &[u8] = b"tree abc";
        let mut cursor = Cursor::new(data);
        cursor.expect_literal(b"tree ").unwrap();
        assert_eq!(cursor.rest(), b"abc");
    }

    #[test]
    fn test_expect_literal_is_exact() {
        let data: &[u8] = b"tree abc";
        let mut cursor = Cursor::new(data);
        assert!(cursor.expect_literal(b"tree  ").is_err());
        assert!(cursor.expect_literal(b"Tree ").is_err());
    }

    #[test]
    fn test_read_until_checked() {
        let data: &[u8] = b"first\nsecond";
        let mut cursor = Cursor::new(data);
        assert_eq!(cursor.read_until_checked(b'\n').unwrap(), b"first");
        assert_eq!(cursor.rest(), b"second");
        assert!(cursor.read_until_checked(b'\n').is_err());
    }

    #[test]
    fn test_read_exact_slice_short_buffer() {
        let data: &[u8] = b"abc";
        let mut cursor = Cursor::new(data);
        assert!(cursor.read_exact_slice(4).is_err());
        assert_eq!(cursor.read_exact_slice(3).unwrap(), b"abc");
        assert!(cursor.rest().is_empty());
        assert!(cursor.expect_byte(b'\n').is_err());
    }
}
