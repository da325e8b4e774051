//! Stores the ledger document as a JSON file on disk.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Error, ledger::Document, store::DocumentStore};

/// A [DocumentStore] backed by a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store that reads and writes the file at `path`.
    ///
    /// The file does not need to exist until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "ledger.json".into());
        file_name.push(".tmp");

        self.path.with_file_name(file_name)
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Option<Document>, Error> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                tracing::error!("could not read {:?}: {error}", self.path);
                return Err(Error::StoreRead(error.to_string()));
            }
        };

        serde_json::from_str(&text).map(Some).map_err(|error| {
            tracing::error!("could not parse the ledger document {:?}: {error}", self.path);
            Error::StoreRead(error.to_string())
        })
    }

    fn save(&mut self, document: &Document) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(document)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        // Write then rename so readers never see a half-written document.
        let temp_path = self.temp_path();
        fs::write(&temp_path, text)
            .and_then(|_| fs::rename(&temp_path, &self.path))
            .map_err(|error| {
                tracing::error!("could not write {:?}: {error}", self.path);
                Error::StoreWrite(error.to_string())
            })?;

        tracing::debug!("saved ledger document to {:?}", self.path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use time::macros::{date, datetime};

    use crate::{
        Error,
        ledger::{
            Category, CategoryName, Document, Income, IncomeSource, NewTransaction, Transaction,
            record_transaction,
        },
        store::{DocumentStore, JsonFileStore, MemoryStore},
    };

    fn awkward_document() -> Document {
        let mut document = Document::seed();
        document.categories.push(Category {
            id: "dup".to_owned(),
            name: CategoryName::new_unchecked("Food"),
            allocated: -25.5,
            spent: 0.0,
        });
        document.incomes.push(Income {
            id: "i1".to_owned(),
            source: IncomeSource::Other,
            amount: 0.0,
            date: datetime!(2025-02-01 00:00 UTC),
        });
        document.transactions.push(Transaction {
            id: "t1".to_owned(),
            description: String::new(),
            amount: 10.0,
            date: date!(2025 - 02 - 03),
            category_id: "missing".to_owned(),
        });
        document
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));

        assert_eq!(store.load(), Ok(None));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("ledger.json"));
        let document = awkward_document();

        store.save(&document).unwrap();

        assert_eq!(store.load(), Ok(Some(document)));
        assert!(!dir.path().join("ledger.json.tmp").exists());
    }

    #[test]
    fn full_precision_amounts_round_trip_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("ledger.json"));
        let mut document = Document::seed();
        let mut scratch = MemoryStore::new();
        for x in 1..=600 {
            record_transaction(
                &mut document,
                &mut scratch,
                NewTransaction {
                    amount: x as f64 / 997.0,
                    description: String::new(),
                    date: date!(2025 - 02 - 03),
                    category_id: "1".to_owned(),
                },
            )
            .unwrap();
        }
        document.categories[1].allocated = 0.1 + 0.2;

        store.save(&document).unwrap();
        let loaded = store.load().unwrap().unwrap();

        for (saved, read) in document.transactions.iter().zip(&loaded.transactions) {
            assert_eq!(saved.amount.to_bits(), read.amount.to_bits());
        }
        assert_eq!(
            document.categories[0].spent.to_bits(),
            loaded.categories[0].spent.to_bits()
        );
        assert_eq!(loaded, document);
        assert!(loaded.spent_mismatches().is_empty());
    }

    #[test]
    fn empty_document_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("ledger.json"));
        let document = Document {
            incomes: vec![],
            categories: vec![],
            transactions: vec![],
        };

        store.save(&document).unwrap();

        assert_eq!(store.load(), Ok(Some(document)));
    }

    #[test]
    fn later_save_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let mut first = JsonFileStore::new(&path);
        let mut second = JsonFileStore::new(&path);

        first.save(&awkward_document()).unwrap();
        second.save(&Document::seed()).unwrap();

        assert_eq!(first.load(), Ok(Some(Document::seed())));
    }

    #[test]
    fn corrupt_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);

        assert!(matches!(store.load(), Err(Error::StoreRead(_))));
    }

    #[test]
    fn reads_documents_written_by_the_browser_app() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(
            &path,
            r#"{
                "incomes": [{"id":"a","source":"husband","amount":250000,"date":"2025-01-25T03:00:00.000Z"}],
                "categories": [{"id":"1","name":"Food","allocated":50000,"spent":1200}],
                "transactions": [{"id":"b","description":"","amount":1200,"date":"2025-01-26","categoryId":"1"}]
            }"#,
        )
        .unwrap();
        let store = JsonFileStore::new(&path);

        let document = store.load().unwrap().unwrap();

        assert_eq!(document.incomes[0].amount, 250000.0);
        assert_eq!(document.transactions[0].category_id, "1");
        assert!(document.spent_mismatches().is_empty());
    }
}
