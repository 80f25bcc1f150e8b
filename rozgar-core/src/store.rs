//! Durable document collection backed by sled.
//!
//! Keys are `{content_type}/{id}`, values bincode-encoded documents, so each
//! content type is a contiguous key range and re-ingesting a record is a
//! plain overwrite of its natural key. Listing order (type order, then key
//! order) is deterministic for a fixed snapshot; the lexical index's
//! insertion-order tie-break inherits that determinism.

use crate::error::Result;
use crate::types::{ContentType, Document};
use std::path::Path;

pub struct DocumentStore {
    db: sled::Db,
}

impl DocumentStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    fn key(content_type: ContentType, id: &str) -> Vec<u8> {
        let mut key = Vec::with_capacity(content_type.as_str().len() + 1 + id.len());
        key.extend_from_slice(content_type.as_str().as_bytes());
        key.push(b'/');
        key.extend_from_slice(id.as_bytes());
        key
    }

    /// Insert or overwrite by natural key. The same logical record ingested
    /// twice stays a single entry.
    pub fn upsert(&self, doc: &Document) -> Result<()> {
        let key = Self::key(doc.content_type, &doc.id);
        let value = bincode::serialize(doc)?;
        self.db.insert(key, value)?;
        Ok(())
    }

    /// All documents of one content type, ascending by id.
    pub fn list(&self, content_type: ContentType) -> Result<Vec<Document>> {
        let mut prefix = content_type.as_str().as_bytes().to_vec();
        prefix.push(b'/');
        let mut docs = Vec::new();
        for entry in self.db.scan_prefix(prefix) {
            let (_, value) = entry?;
            docs.push(bincode::deserialize(&value)?);
        }
        Ok(docs)
    }

    /// Every document, grouped by content type in declaration order. This is
    /// the snapshot the lexical index is rebuilt from.
    pub fn list_all(&self) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for content_type in ContentType::ALL {
            docs.extend(self.list(content_type)?);
        }
        Ok(docs)
    }

    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}
