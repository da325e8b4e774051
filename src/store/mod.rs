//! Contains the trait and implementations for objects that persist the ledger
//! [Document](crate::ledger::Document).

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::{Error, ledger::Document};

/// Loads and saves the whole ledger document.
///
/// There are no partial updates: every save replaces the stored document and
/// the last save wins.
pub trait DocumentStore {
    /// Retrieve the stored document, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Document>, Error>;

    /// Replace the stored document with `document`.
    fn save(&mut self, document: &Document) -> Result<(), Error>;
}

impl<T> DocumentStore for Box<T>
where
    T: DocumentStore + ?Sized,
{
    fn load(&self) -> Result<Option<Document>, Error> {
        (**self).load()
    }

    fn save(&mut self, document: &Document) -> Result<(), Error> {
        (**self).save(document)
    }
}
