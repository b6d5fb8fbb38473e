mod memory;

pub use memory::MemoryStore;

use crate::Result;
use crate::hashing::Hash;
use crate::object::{Object, ObjectType};

/// Where objects live. Hashing, compression and on-disk layout are up to the implementation;
/// the commit code only relies on these three operations.
///
/// Reads take `&self` and writes take `&mut self`, so a store shared between threads has to be
/// synchronized by whoever owns it.
pub trait ObjectStore {
    /// Returns the object stored under `id`.
    ///
    /// # Errors
    ///
    /// Fails with `Error::NotFound` if there is no such object.
    fn lookup(&self, id: &Hash) -> Result<Object>;

    /// Returns whether an object of type `kind` is stored under `id`.
    fn exists_as(&self, id: &Hash, kind: ObjectType) -> Result<bool>;

    /// Persists `data` as an object of type `kind`, returning its identifier.
    fn store(&mut self, kind: ObjectType, data: &[u8]) -> Result<Hash>;
}
