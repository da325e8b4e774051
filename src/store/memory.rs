//! An in-memory document store.

use crate::{Error, ledger::Document, store::DocumentStore};

/// A [DocumentStore] that keeps the serialized document in memory.
///
/// The document still goes through JSON so that it behaves like a real store.
/// Saves can be made to fail to exercise persistence error handling.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
    fail_saves: bool,
    save_count: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `document`.
    pub fn with_document(document: &Document) -> Result<Self, Error> {
        let mut store = Self::new();
        store.save(document)?;
        store.save_count = 0;

        Ok(store)
    }

    /// Make subsequent saves fail (`true`) or succeed (`false`).
    pub fn set_fail_saves(&mut self, fail_saves: bool) {
        self.fail_saves = fail_saves;
    }

    /// The number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// The stored JSON text, if anything has been saved.
    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Option<Document>, Error> {
        self.json
            .as_deref()
            .map(|text| {
                serde_json::from_str(text).map_err(|error| Error::StoreRead(error.to_string()))
            })
            .transpose()
    }

    fn save(&mut self, document: &Document) -> Result<(), Error> {
        if self.fail_saves {
            return Err(Error::StoreWrite("the in-memory store is read-only".to_owned()));
        }

        let text = serde_json::to_string(document)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;
        self.json = Some(text);
        self.save_count += 1;

        Ok(())
    }
}
