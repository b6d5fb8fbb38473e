use std::io::{Cursor, Write};
use std::rc::Rc;

use byteorder::WriteBytesExt;

use crate::byteable::Byteable;
use crate::hashing::Hash;
use crate::utils::cursor::EasyRead;
use crate::{Error, Result};

use super::{NULL_BYTE, ObjectType, SPACE_BYTE};

/// A stored object: its kind plus the raw content, without the envelope header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub kind: ObjectType,
    pub data: Rc<[u8]>,
}

impl Object {
    pub fn new(kind: ObjectType, data: impl Into<Rc<[u8]>>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }

    /// Returns the identifier of this object, the hash of its encoded envelope.
    ///
    /// # Errors
    ///
    /// This function will fail if the object couldn't be encoded.
    pub fn hash(&self) -> Result<Hash> {
        let bytes = self.as_bytes()?;
        Ok(Hash::of(&bytes))
    }
}

impl Byteable for Object {
    /// Returns the encoded data for this object, with the following format:
    ///
    /// `{type} {data_length}\0{data}`
    ///
    /// # Errors
    ///
    /// This function will fail if any write operation to a `std::io::Cursor` returns an error.
    fn as_bytes(&self) -> Result<Rc<[u8]>> {
        // Encoding to this format: commit 4\0abcd
        let mut cursor = Cursor::new(Vec::with_capacity(self.data.len() + 16));

        cursor.write_all(self.kind.as_str().as_bytes())?;
        cursor.write_u8(SPACE_BYTE)?;
        cursor.write_all(self.data.len().to_string().as_bytes())?;
        cursor.write_u8(NULL_BYTE)?;
        cursor.write_all(&self.data)?;

        Ok(cursor.into_inner().into())
    }

    /// Decodes an envelope produced by `as_bytes`.
    ///
    /// # Errors
    ///
    /// This function will fail if the type is unknown, the length is not a number or does not
    /// match the amount of data that follows it.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);

        let kind = std::str::from_utf8(cursor.read_until_checked(SPACE_BYTE)?)?;
        let kind = ObjectType::try_from(kind)?;

        let len = std::str::from_utf8(cursor.read_until_checked(NULL_BYTE)?)?;
        let data_len: usize = len.parse().map_err(|e| {
            Error::formatting(format!("could not read object length {:?}: {}", len, e))
        })?;

        let data = cursor.rest();
        if data.len() != data_len {
            return Err(Error::formatting(format!(
                "length read \"{}\" did not match actual data length \"{}\"",
                data_len,
                data.len()
            )));
        }

        Ok(Object::new(kind, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_TREE_HASH: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
    const HELLO_BLOB_HASH: &str = "ce013625030ba8dba906f756967f9e9ca394464a";

    #[test]
    fn test_as_bytes_envelope() {
        let object = Object::new(ObjectType::Blob, b"abcd".as_slice());
        assert_eq!(object.as_bytes().unwrap().as_ref(), b"blob 4\0abcd");
    }

    #[test]
    fn test_hash_matches_git() {
        let tree = Object::new(ObjectType::Tree, Vec::<u8>::new());
        assert_eq!(tree.hash().unwrap().to_string(), EMPTY_TREE_HASH);

        let blob = Object::new(ObjectType::Blob, b"hello\n".as_slice());
        assert_eq!(blob.hash().unwrap().to_string(), HELLO_BLOB_HASH);
    }

    #[test]
    fn test_from_bytes() {
        let object = Object::from_bytes(b"commit 3\0a\nb").unwrap();
        assert_eq!(object.kind, ObjectType::Commit);
        assert_eq!(object.data.as_ref(), b"a\nb");
    }

    #[test]
    fn test_from_bytes_malformed() {
        assert!(Object::from_bytes(b"").is_err());
        assert!(Object::from_bytes(b"commit").is_err());
        assert!(Object::from_bytes(b"potato 1\0a").is_err());
        assert!(Object::from_bytes(b"blob x\0a").is_err());
        assert!(Object::from_bytes(b"blob 2\0a").is_err());
        assert!(Object::from_bytes(b"blob 1 a").is_err());
    }
}
