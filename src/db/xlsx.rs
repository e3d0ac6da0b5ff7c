//! `.xlsx` backed document store.

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use super::{Cell, DocumentStore, Sheet, StoreError};

pub struct XlsxStore {
    path: PathBuf,
    sheet_name: String,
}

impl XlsxStore {
    pub fn new(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        XlsxStore {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, reason: impl ToString) -> StoreError {
        StoreError::Corrupt {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl XlsxStore {
    fn read_sheets(&self) -> Result<Vec<Sheet>, StoreError> {
        // Missing and unreadable are different conditions; keep them apart.
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() == 0 => return Err(self.corrupt("file is empty")),
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::Missing(self.path.display().to_string()));
            }
            Err(err) => return Err(StoreError::Io(err)),
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|err| match err {
            calamine::XlsxError::Io(io) => StoreError::Io(io),
            other => self.corrupt(other),
        })?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|err| self.corrupt(err))?;

            let mut rows = range.rows();
            let header = match rows.next() {
                Some(cells) => cells.iter().map(|cell| cell_from_data(cell).as_text()).collect(),
                None => Vec::new(),
            };
            let rows = rows.map(|cells| cells.iter().map(cell_from_data).collect()).collect();

            sheets.push(Sheet { name, header, rows });
        }
        Ok(sheets)
    }

    /// Sheets other than the roster one, so a save can carry them over.
    fn companion_sheets(&self, roster: &str) -> Result<Vec<Sheet>, StoreError> {
        match self.read_sheets() {
            Ok(sheets) => Ok(sheets
                .into_iter()
                .skip(1)
                .filter(|sheet| !sheet.name.eq_ignore_ascii_case(roster))
                .collect()),
            Err(StoreError::Missing(_)) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }
}

impl DocumentStore for XlsxStore {
    fn load(&self) -> Result<Sheet, StoreError> {
        self.read_sheets()?
            .into_iter()
            .next()
            .ok_or_else(|| self.corrupt("workbook has no sheets"))
    }

    /// Rewrites the roster as the first sheet. Other sheets already in the
    /// workbook keep their cell values; their formatting is not carried over.
    fn save(&self, sheet: &Sheet) -> Result<(), StoreError> {
        let companions = self.companion_sheets(&sheet.name)?;

        let mut workbook = Workbook::new();
        write_sheet(&mut workbook, sheet)?;
        for companion in &companions {
            write_sheet(&mut workbook, companion)?;
        }
        let buffer = workbook.save_to_buffer()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        replace_file(&self.path, &buffer)?;

        log::debug!(
            "Wrote {} rows to {} ({} other sheets kept)",
            sheet.rows.len(),
            self.path.display(),
            companions.len()
        );
        Ok(())
    }

    fn default_sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

fn write_sheet(workbook: &mut Workbook, sheet: &Sheet) -> Result<(), StoreError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.name)?;

    for (col, title) in sheet.header.iter().enumerate() {
        worksheet.write_string(0, col as u16, title)?;
    }

    for (idx, row) in sheet.rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
                Cell::Empty => {}
            }
        }
    }
    Ok(())
}

/// Writes next to `path` and renames over it. On failure the temporary file
/// is removed and `path` is untouched.
fn replace_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = path.with_extension("xlsx.tmp");
    let result = fs::write(&tmp_path, bytes).and_then(|_| fs::rename(&tmp_path, path));
    if let Err(err) = &result {
        log::warn!("Failed to replace {}: {}", path.display(), err);
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_sheet() -> Sheet {
        Sheet {
            name: "Funcionarios".to_string(),
            header: vec!["ID".to_string(), "NOME".to_string(), "Data Adm.".to_string()],
            rows: vec![
                vec![Cell::Number(1.0), Cell::Text("Ana".to_string()), Cell::Number(43845.5)],
                vec![Cell::Number(2.0), Cell::Text("Bruno".to_string()), Cell::Empty],
            ],
        }
    }

    #[test]
    fn test_missing_file_is_reported_as_missing() {
        let dir = tempdir().unwrap();
        let store = XlsxStore::new(dir.path().join("funcionarios.xlsx"), "Funcionarios");

        assert!(matches!(store.load(), Err(StoreError::Missing(_))));
    }

    #[test]
    fn test_garbage_file_is_reported_as_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("funcionarios.xlsx");
        fs::write(&path, b"definitely not a zip archive").unwrap();
        let store = XlsxStore::new(&path, "Funcionarios");

        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_save_then_load_keeps_cells() {
        let dir = tempdir().unwrap();
        let store = XlsxStore::new(dir.path().join("nested").join("funcionarios.xlsx"), "Funcionarios");

        store.save(&sample_sheet()).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.name, "Funcionarios");
        assert_eq!(loaded.header, vec!["ID", "NOME", "Data Adm."]);
        assert_eq!(loaded.rows.len(), 2);
        assert_eq!(loaded.rows[0][0].as_number(), Some(1.0));
        assert_eq!(loaded.rows[0][1], Cell::Text("Ana".to_string()));
        assert_eq!(loaded.rows[0][2].as_number(), Some(43845.5));
        assert!(loaded.rows[1].get(2).map_or(true, Cell::is_empty));
        assert!(!store.path().with_extension("xlsx.tmp").exists());
    }

    #[test]
    fn test_save_overwrites_whole_document() {
        let dir = tempdir().unwrap();
        let store = XlsxStore::new(dir.path().join("funcionarios.xlsx"), "Funcionarios");

        store.save(&sample_sheet()).unwrap();
        let mut smaller = sample_sheet();
        smaller.rows.truncate(1);
        store.save(&smaller).unwrap();

        assert_eq!(store.load().unwrap().rows.len(), 1);
    }

    #[test]
    fn test_save_keeps_other_sheets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("funcionarios.xlsx");

        let mut workbook = Workbook::new();
        write_sheet(&mut workbook, &sample_sheet()).unwrap();
        write_sheet(
            &mut workbook,
            &Sheet {
                name: "Ferias".to_string(),
                header: vec!["ID".to_string(), "Inicio".to_string()],
                rows: vec![vec![Cell::Number(1.0), Cell::Text("2024-07-01".to_string())]],
            },
        )
        .unwrap();
        workbook.save(&path).unwrap();

        let store = XlsxStore::new(&path, "Funcionarios");
        let mut roster = store.load().unwrap();
        assert_eq!(roster.name, "Funcionarios");
        roster.rows.truncate(1);
        store.save(&roster).unwrap();

        let sheets = store.read_sheets().unwrap();
        let names: Vec<_> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Funcionarios", "Ferias"]);
        assert_eq!(sheets[0].rows.len(), 1);
        assert_eq!(sheets[1].header, vec!["ID", "Inicio"]);
        assert_eq!(sheets[1].rows[0][1], Cell::Text("2024-07-01".to_string()));
    }

    #[test]
    fn test_failed_replace_removes_tmp_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("funcionarios.xlsx");
        fs::create_dir(&target).unwrap();

        assert!(replace_file(&target, b"bytes").is_err());
        assert!(!target.with_extension("xlsx.tmp").exists());
        assert!(target.is_dir());
    }
}
