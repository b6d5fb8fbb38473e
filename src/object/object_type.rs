use crate::{Error, Result};

/// The kinds of object a store can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl ObjectType {
    pub const BLOB_STRING: &'static str = "blob";
    pub const TREE_STRING: &'static str = "tree";
    pub const COMMIT_STRING: &'static str = "commit";
    pub const TAG_STRING: &'static str = "tag";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => ObjectType::BLOB_STRING,
            Self::Tree => ObjectType::TREE_STRING,
            Self::Commit => ObjectType::COMMIT_STRING,
            Self::Tag => ObjectType::TAG_STRING,
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            ObjectType::BLOB_STRING => Ok(ObjectType::Blob),
            ObjectType::TREE_STRING => Ok(ObjectType::Tree),
            ObjectType::COMMIT_STRING => Ok(ObjectType::Commit),
            ObjectType::TAG_STRING => Ok(ObjectType::Tag),
            _ => Err(Error::formatting(format!(
                "{:?} does not match any object type",
                value
            ))),
        }
    }
}
