use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::TableStore;
use crate::error::{PrefCardError, Result};
use crate::table::Table;

/// In-memory workbooks keyed by path. Used for headless runs of the
/// catalog, card and export logic.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    workbooks: HashMap<PathBuf, Vec<(String, Table)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever is stored at `path`
    pub fn insert_workbook(&mut self, path: impl Into<PathBuf>, sheets: Vec<(String, Table)>) {
        self.workbooks.insert(path.into(), sheets);
    }

    pub fn workbook(&self, path: &Path) -> Option<&[(String, Table)]> {
        self.workbooks.get(path).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.workbooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workbooks.is_empty()
    }

    fn sheets(&self, path: &Path) -> Result<&Vec<(String, Table)>> {
        self.workbooks
            .get(path)
            .ok_or_else(|| PrefCardError::file_read(path, "No such file"))
    }
}

impl TableStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.workbooks.contains_key(path)
    }

    fn load_table(&self, path: &Path) -> Result<Table> {
        self.sheets(path)?
            .first()
            .map(|(_, table)| table.clone())
            .ok_or_else(|| PrefCardError::file_read(path, "workbook has no sheets"))
    }

    fn sheet_names(&self, path: &Path) -> Result<Vec<String>> {
        Ok(self.sheets(path)?.iter().map(|(name, _)| name.clone()).collect())
    }

    fn load_sheet(&self, path: &Path, sheet: &str) -> Result<Table> {
        self.sheets(path)?
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, table)| table.clone())
            .ok_or_else(|| PrefCardError::file_read(path, format!("Worksheet '{sheet}' not found")))
    }

    fn append_sheet(&mut self, path: &Path, sheet: &str, table: &Table) -> Result<()> {
        let sheets = self
            .workbooks
            .get_mut(path)
            .ok_or_else(|| PrefCardError::file_read(path, "No such file"))?;
        if sheets.iter().any(|(name, _)| name.eq_ignore_ascii_case(sheet)) {
            return Err(PrefCardError::write(
                path,
                format!("Worksheet name '{sheet}' is already in use"),
            ));
        }
        sheets.push((sheet.to_string(), table.clone()));
        Ok(())
    }

    fn write_new_workbook(&mut self, path: &Path, sheet: &str, table: &Table) -> Result<()> {
        self.insert_workbook(path, vec![(sheet.to_string(), table.clone())]);
        Ok(())
    }
}
