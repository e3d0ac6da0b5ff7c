//! In-process document store, used by tests and by embedders that keep the
//! roster somewhere other than a file.

use std::sync::{Mutex, MutexGuard};

use super::{DocumentStore, Sheet, StoreError};

#[derive(Debug, Clone)]
enum Document {
    Missing,
    Corrupt,
    Present(Sheet),
}

pub struct MemoryStore {
    document: Mutex<Document>,
    sheet_name: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_document(Document::Missing)
    }

    pub fn with_sheet(sheet: Sheet) -> Self {
        Self::with_document(Document::Present(sheet))
    }

    /// A store whose document exists but cannot be read.
    pub fn corrupt() -> Self {
        Self::with_document(Document::Corrupt)
    }

    fn with_document(document: Document) -> Self {
        MemoryStore {
            document: Mutex::new(document),
            sheet_name: "Funcionarios".to_string(),
        }
    }

    pub fn snapshot(&self) -> Option<Sheet> {
        match &*self.lock().ok()? {
            Document::Present(sheet) => Some(sheet.clone()),
            _ => None,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Document>, StoreError> {
        self.document
            .lock()
            .map_err(|_| StoreError::Io(std::io::Error::other("memory store lock poisoned")))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Sheet, StoreError> {
        match &*self.lock()? {
            Document::Missing => Err(StoreError::Missing("memory".to_string())),
            Document::Corrupt => Err(StoreError::Corrupt {
                path: "memory".to_string(),
                reason: "document is not a workbook".to_string(),
            }),
            Document::Present(sheet) => Ok(sheet.clone()),
        }
    }

    fn save(&self, sheet: &Sheet) -> Result<(), StoreError> {
        *self.lock()? = Document::Present(sheet.clone());
        Ok(())
    }

    fn default_sheet_name(&self) -> &str {
        &self.sheet_name
    }
}
