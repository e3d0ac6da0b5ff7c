//! Whole-document persistence for the roster.
//!
//! The store knows nothing about employees: it reads and overwrites one sheet
//! of cells. Mapping rows to records lives in `models::employee`.

pub mod memory;
pub mod xlsx;

use std::path::PathBuf;
use thiserror::Error;

use crate::config::AppConfig;

pub use memory::MemoryStore;
pub use xlsx::XlsxStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document {0} does not exist")]
    Missing(String),

    /// The document exists but cannot be parsed as a workbook.
    #[error("document {path} is unreadable: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode workbook: {0}")]
    Encode(#[from] rust_xlsxwriter::XlsxError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Bool(bool),
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric value; numeric text (as typed by hand in a spreadsheet) counts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1.0e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

/// One worksheet: a header row followed by data rows. Rows may be shorter
/// than the header; missing trailing cells are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            header: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// Full-read / full-overwrite document store keyed by sheet name.
pub trait DocumentStore: Send + Sync {
    fn load(&self) -> Result<Sheet, StoreError>;

    fn save(&self, sheet: &Sheet) -> Result<(), StoreError>;

    /// Sheet name used when the document has to be created from scratch.
    fn default_sheet_name(&self) -> &str;
}

pub fn open_store(config: &AppConfig) -> XlsxStore {
    XlsxStore::new(PathBuf::from(&config.roster_file), config.sheet_name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_as_number() {
        assert_eq!(Cell::Number(7.0).as_number(), Some(7.0));
        assert_eq!(Cell::Text(" 12 ".to_string()).as_number(), Some(12.0));
        assert_eq!(Cell::Text("abc".to_string()).as_number(), None);
        assert_eq!(Cell::Number(f64::NAN).as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
    }

    #[test]
    fn test_cell_as_text() {
        assert_eq!(Cell::Number(3.0).as_text(), "3");
        assert_eq!(Cell::Number(2.5).as_text(), "2.5");
        assert_eq!(Cell::Text("DEV".to_string()).as_text(), "DEV");
        assert_eq!(Cell::Empty.as_text(), "");
    }

    #[test]
    fn test_cell_emptiness() {
        assert!(Cell::Empty.is_empty());
        assert!(Cell::Text("  ".to_string()).is_empty());
        assert!(!Cell::Number(0.0).is_empty());
        assert_eq!(Cell::from(""), Cell::Empty);
        assert_eq!(Cell::from(None), Cell::Empty);
    }
}
