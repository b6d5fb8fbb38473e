use std::io::Cursor;
use std::rc::Rc;

use crate::byteable::Byteable;
use crate::hashing::Hash;
use crate::object::ObjectType;
use crate::store::ObjectStore;
use crate::utils::cursor::EasyRead;
use crate::{Constants, Error, Result};

use super::*;

/// A parsed commit. Once built it can't be modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    tree: Hash,
    parents: Rc<[Hash]>,
    author: Identity,
    committer: Identity,
    message: Rc<[u8]>,
}

impl Commit {
    /// Parses a raw commit buffer.
    ///
    /// When `strict` is set, the tree and every parent must also exist in `store` as a tree and
    /// a commit respectively.
    ///
    /// # Errors
    ///
    /// This function will fail with:
    /// - `Error::Formatting` if the buffer does not follow the commit format.
    /// - `Error::Reference` if `strict` is set and a referenced object is missing or has another
    ///   type.
    pub fn parse(bytes: &[u8], store: &dyn ObjectStore, strict: bool) -> Result<Self> {
        parse_buffer(bytes, strict.then_some(store))
    }

    /// Reads the commit stored under `id`.
    ///
    /// # Errors
    ///
    /// This function will fail if the object does not exist, is not a commit, or can't be
    /// parsed.
    pub fn lookup(store: &dyn ObjectStore, id: &Hash) -> Result<Self> {
        let object = store.lookup(id)?;
        if object.kind != ObjectType::Commit {
            return Err(Error::Reference(
                format!("object {} is a {}, not a commit", id, object.kind).into(),
            ));
        }
        parse_buffer(&object.data, None)
    }

    /// Writes a new commit to `store`, returning its identifier.
    pub fn create(
        store: &mut dyn ObjectStore,
        tree: &Hash,
        parents: &[Hash],
        author: &Identity,
        committer: &Identity,
        message: &[u8],
    ) -> Result<Hash> {
        let bytes = as_bytes(tree, parents, author, committer, message)?;
        store.store(ObjectType::Commit, &bytes)
    }

    pub fn tree(&self) -> &Hash {
        &self.tree
    }

    pub fn parents(&self) -> &[Hash] {
        &self.parents
    }

    pub fn author(&self) -> &Identity {
        &self.author
    }

    pub fn committer(&self) -> &Identity {
        &self.committer
    }

    /// The full message, exactly as it was stored.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// The message up to its first line terminator.
    pub fn message_short(&self) -> &[u8] {
        match self
            .message
            .iter()
            .position(|b| *b == Constants::LINE_TERMINATOR)
        {
            Some(end) => &self.message[..end],
            None => &self.message,
        }
    }

    /// The author's timestamp.
    pub fn time(&self) -> i64 {
        self.author.timestamp()
    }

    /// The author's offset from UTC, in minutes.
    pub fn time_offset(&self) -> i32 {
        self.author.utc_offset()
    }

    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    pub fn parent_id(&self, n: usize) -> Option<&Hash> {
        self.parents.get(n)
    }

    /// Looks up and parses the `n`-th parent. Every call reads the store again.
    ///
    /// # Errors
    ///
    /// Fails with `Error::NotFound` if `n` is out of range or the parent is not in `store`.
    pub fn parent(&self, n: usize, store: &dyn ObjectStore) -> Result<Commit> {
        let id = self.parent_id(n).ok_or_else(|| {
            Error::NotFound(
                format!(
                    "parent {} requested but the commit has {}",
                    n,
                    self.parent_count()
                )
                .into(),
            )
        })?;
        Commit::lookup(store, id)
    }
}

impl Byteable for Commit {
    fn as_bytes(&self) -> Result<Rc<[u8]>> {
        as_bytes(
            &self.tree,
            &self.parents,
            &self.author,
            &self.committer,
            &self.message,
        )
    }

    /// Parses a commit checking only its format.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        parse_buffer(bytes, None)
    }
}

/// Returns the commit as the following bytes:
///
/// ```text
/// tree {tree}
/// parent {parent}          (once per parent, in order)
/// author {author}
/// committer {committer}
///
/// {message}
/// ```
///
/// The message is written as given, no terminator is added or removed.
pub fn as_bytes(
    tree: &Hash,
    parents: &[Hash],
    author: &Identity,
    committer: &Identity,
    message: &[u8],
) -> Result<Rc<[u8]>> {
    let mut file = Vec::with_capacity(256 + message.len());
    push_line(&mut file, TREE_HEADER, tree);
    for parent in parents {
        push_line(&mut file, PARENT_HEADER, parent);
    }
    push_line(&mut file, AUTHOR_HEADER, author);
    push_line(&mut file, COMMITTER_HEADER, committer);
    file.push(Constants::LINE_TERMINATOR);
    file.extend_from_slice(message);

    Ok(file.into())
}

fn push_line(file: &mut Vec<u8>, header: &[u8], value: impl std::fmt::Display) {
    file.extend_from_slice(header);
    file.extend_from_slice(value.to_string().as_bytes());
    file.push(Constants::LINE_TERMINATOR);
}

/// Parses a commit buffer. Referenced objects are checked against `store` only when one is
/// given.
fn parse_buffer(bytes: &[u8], store: Option<&dyn ObjectStore>) -> Result<Commit> {
    if bytes.is_empty() {
        return Err(Error::formatting("commit buffer is empty"));
    }
    let mut cursor = Cursor::new(bytes);

    let tree = Hash::parse_line(&mut cursor, TREE_HEADER)?;
    check_reference(store, &tree, ObjectType::Tree)?;

    let mut parents = Vec::new();
    while cursor.rest().starts_with(PARENT_HEADER) {
        let parent = Hash::parse_line(&mut cursor, PARENT_HEADER)?;
        check_reference(store, &parent, ObjectType::Commit)?;
        parents.push(parent);
    }

    let author = Identity::parse(&mut cursor, AUTHOR_HEADER)?;
    let committer = Identity::parse(&mut cursor, COMMITTER_HEADER)?;

    // blank line between the header and the message
    cursor.expect_byte(Constants::LINE_TERMINATOR)?;

    Ok(Commit {
        tree,
        parents: parents.into(),
        author,
        committer,
        message: cursor.rest().into(),
    })
}

fn check_reference(store: Option<&dyn ObjectStore>, id: &Hash, kind: ObjectType) -> Result<()> {
    let Some(store) = store else {
        return Ok(());
    };
    if !store.exists_as(id, kind)? {
        return Err(Error::Reference(
            format!("{} {} does not exist", kind, id).into(),
        ));
    }
    Ok(())
}

// Tests
