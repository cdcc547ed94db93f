//! In-memory storage.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::document::PageDocument;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Keeps documents in a map for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<BTreeMap<String, PageDocument>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, BTreeMap<String, PageDocument>>> {
        self.documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock poisoned: {}", e)))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, BTreeMap<String, PageDocument>>> {
        self.documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock poisoned: {}", e)))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &PageDocument) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let document = document.clone();
        Box::pin(async move {
            self.write()?.insert(id, document);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<PageDocument>> {
        let id = id.to_string();
        Box::pin(async move {
            let docs = self.read()?;
            docs.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.write()?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move { Ok(self.read()?.keys().cloned().collect()) })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.read()?.contains_key(&id)) })
    }
}
