use std::collections::HashMap;
use std::rc::Rc;

use crate::byteable::Byteable;
use crate::hashing::Hash;
use crate::object::{Object, ObjectType};
use crate::{Error, Result};

use super::ObjectStore;

/// Object store kept in memory. Objects are held in their encoded envelope form, the same bytes
/// their identifier is computed from.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: HashMap<Hash, Rc<[u8]>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Deletes the object stored under `id`, returning whether there was one.
    pub fn remove(&mut self, id: &Hash) -> bool {
        let removed = self.objects.remove(id).is_some();
        if removed {
            log::debug!("removed object {}", id);
        }
        removed
    }
}

impl ObjectStore for MemoryStore {
    fn lookup(&self, id: &Hash) -> Result<Object> {
        log::trace!("looking up object {}", id);
        let encoded = self
            .objects
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("object {} does not exist", id).into()))?;
        Object::from_bytes(encoded)
    }

    fn exists_as(&self, id: &Hash, kind: ObjectType) -> Result<bool> {
        let exists = match self.objects.get(id) {
            Some(encoded) => Object::from_bytes(encoded)?.kind == kind,
            None => false,
        };
        log::trace!("object {} exists as {}: {}", id, kind, exists);
        Ok(exists)
    }

    fn store(&mut self, kind: ObjectType, data: &[u8]) -> Result<Hash> {
        let object = Object::new(kind, data);
        let id = object.hash()?;
        let encoded = object.as_bytes()?;
        log::debug!("storing {} {} ({} bytes)", kind, id, data.len());
        self.objects.insert(id, encoded);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_TREE_HASH: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_store_and_lookup() {
        init_logger();
        let mut store = MemoryStore::new();
        let id = store.store(ObjectType::Blob, b"some data").unwrap();

        let object = store.lookup(&id).unwrap();
        assert_eq!(object.kind, ObjectType::Blob);
        assert_eq!(object.data.as_ref(), b"some data");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_is_content_addressed() {
        init_logger();
        let mut store = MemoryStore::new();
        let first = store.store(ObjectType::Tree, b"").unwrap();
        let second = store.store(ObjectType::Tree, b"").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), EMPTY_TREE_HASH);
        assert_eq!(store.len(), 1);

        // same content under another type is another object
        let blob = store.store(ObjectType::Blob, b"").unwrap();
        assert_ne!(first, blob);
    }

    #[test]
    fn test_exists_as() {
        init_logger();
        let mut store = MemoryStore::new();
        let id = store.store(ObjectType::Tree, b"").unwrap();
        assert!(store.exists_as(&id, ObjectType::Tree).unwrap());
        assert!(!store.exists_as(&id, ObjectType::Commit).unwrap());

        let missing = Hash::from([0xab; 20]);
        assert!(!store.exists_as(&missing, ObjectType::Tree).unwrap());
    }

    #[test]
    fn test_lookup_missing() {
        init_logger();
        let mut store = MemoryStore::new();
        let id = store.store(ObjectType::Blob, b"gone").unwrap();
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.is_empty());
        assert!(store.lookup(&id).unwrap_err().is_not_found());
    }
}
