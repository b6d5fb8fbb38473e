#![allow(clippy::uninlined_format_args)]

//! Commit objects of a git-style object database: parsing the canonical text form into an
//! immutable [`Commit`], and writing it back.

pub mod byteable;
pub mod constants;
pub mod error;
pub mod hashing;
pub mod object;
pub mod store;
mod utils;

pub use byteable::Byteable;
pub use constants::*;
pub use error::{Error, Result};
pub use hashing::Hash;
pub use object::commit::{Commit, Identity};
pub use object::{Object, ObjectType};
pub use store::{MemoryStore, ObjectStore};
