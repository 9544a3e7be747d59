//! Narrow tabular I/O boundary.
//!
//! Everything that touches a spreadsheet file goes through [`TableStore`],
//! so the catalog, card and export logic can run against [`MemoryStore`]
//! in tests and against [`XlsxStore`] in the application.

mod memory;
mod package;
mod xlsx;

use std::path::Path;

use crate::error::Result;
use crate::table::Table;

pub use memory::MemoryStore;
pub use xlsx::XlsxStore;

pub trait TableStore {
    fn exists(&self, path: &Path) -> bool;

    /// First sheet of the file; the first row is the header
    fn load_table(&self, path: &Path) -> Result<Table>;

    fn sheet_names(&self, path: &Path) -> Result<Vec<String>>;

    fn load_sheet(&self, path: &Path, sheet: &str) -> Result<Table>;

    /// Adds `sheet` as the last sheet of an existing workbook. Every other
    /// sheet is left exactly as it was.
    fn append_sheet(&mut self, path: &Path, sheet: &str, table: &Table) -> Result<()>;

    /// Creates (or replaces) `path` with a single-sheet workbook
    fn write_new_workbook(&mut self, path: &Path, sheet: &str, table: &Table) -> Result<()>;
}
