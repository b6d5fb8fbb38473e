use std::fmt::Display;
use std::io::Cursor;
use std::str::FromStr;

use sha1::{Digest, Sha1};

use crate::utils::cursor::EasyRead;
use crate::{Constants, Error, Result};

pub const HASH_BYTE_LEN: usize = Constants::HASH_BYTE_LEN;

/// Identifier of a stored object: the 20 raw bytes of a SHA-1 digest.
///
/// Its text form is always 40 lowercase hex characters; parsing accepts either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; HASH_BYTE_LEN]);

impl Hash {
    /// Returns the hash of `data`.
    pub fn of(data: &[u8]) -> Self {
        Self(hash(data))
    }

    /// Parses a `{header}{40 hex}\n` line starting at the cursor.
    ///
    /// The header is matched literally, so whether it includes a trailing space is up to the
    /// caller. On success the cursor is left right after the line terminator.
    ///
    /// # Errors
    ///
    /// Fails with `Error::Formatting` if the header does not match, the identifier is not
    /// exactly 40 hex digits, or the terminator is missing.
    pub fn parse_line(cursor: &mut Cursor<&[u8]>, header: &[u8]) -> Result<Self> {
        cursor.expect_literal(header)?;
        let hex_digits = cursor.read_exact_slice(Constants::HASH_HEX_LEN)?;
        let hash = Self::from_hex(hex_digits)?;
        cursor.expect_byte(Constants::LINE_TERMINATOR)?;
        Ok(hash)
    }

    fn from_hex(hex_digits: &[u8]) -> Result<Self> {
        if hex_digits.len() != Constants::HASH_HEX_LEN {
            return Err(Error::formatting(format!(
                "identifier must be {} hex characters, got {}",
                Constants::HASH_HEX_LEN,
                hex_digits.len()
            )));
        }
        let mut bytes = [0; HASH_BYTE_LEN];
        hex::decode_to_slice(hex_digits, &mut bytes).map_err(|e| {
            Error::formatting(format!(
                "invalid identifier {:?}: {}",
                String::from_utf8_lossy(hex_digits),
                e
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl From<[u8; HASH_BYTE_LEN]> for Hash {
    fn from(value: [u8; HASH_BYTE_LEN]) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Hash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s.as_bytes())
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Returns the SHA1 hash for the data passed
pub fn hash(data: &[u8]) -> [u8; HASH_BYTE_LEN] {
    let mut hasher = Sha1::new();
    hasher.update(data);
    let mut digest = [0; HASH_BYTE_LEN];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

// Tests
