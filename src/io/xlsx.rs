use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use log::{debug, info};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::package::append_worksheet;
use super::TableStore;
use crate::error::{PrefCardError, Result};
use crate::table::{Cell, Table};

const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Spreadsheet files on disk: `calamine` reads, `rust_xlsxwriter` writes new
/// workbooks and appending patches the existing package in place. Plain
/// `.csv` files are accepted wherever a single table is read.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxStore;

impl XlsxStore {
    pub fn new() -> Self {
        Self
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

fn range_to_table(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header) => header.iter().map(|c| cell_from_data(c).display()).collect(),
        None => return Table::default(),
    };

    let mut table = Table::new(headers);
    for row in rows {
        let cells: Vec<Cell> = row.iter().map(cell_from_data).collect();
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        table.push_row(cells);
    }
    table
}

fn read_csv_table(path: &Path) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| PrefCardError::file_read(path, e))?;

    let headers = rdr
        .headers()
        .map_err(|e| PrefCardError::file_read(path, e))?
        .iter()
        .map(String::from)
        .collect();

    let mut table = Table::new(headers);
    for record in rdr.records() {
        let record = record.map_err(|e| PrefCardError::file_read(path, e))?;
        let cells: Vec<Cell> = record
            .iter()
            .map(|value| {
                if value.is_empty() {
                    Cell::Empty
                } else {
                    Cell::text(value)
                }
            })
            .collect();
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        table.push_row(cells);
    }
    Ok(table)
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    header_format: &Format,
    date_format: &Format,
) -> std::result::Result<(), XlsxError> {
    for (col, name) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, header_format)?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        let excel_row = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet.write_string(excel_row, col, s)?;
                }
                Cell::Int(i) => {
                    worksheet.write_number(excel_row, col, *i as f64)?;
                }
                Cell::Float(f) => {
                    worksheet.write_number(excel_row, col, *f)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(excel_row, col, *b)?;
                }
                Cell::DateTime(serial) => {
                    worksheet.write_number_with_format(excel_row, col, *serial, date_format)?;
                }
            }
        }
    }
    Ok(())
}

/// Temp file in the same directory as `path`, so persisting it is a rename
fn temp_beside(path: &Path) -> Result<tempfile::NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(tempfile::Builder::new()
        .prefix(".preference_card")
        .suffix(".xlsx")
        .tempfile_in(dir)?)
}

/// Writes a single-sheet workbook to a temp file next to `path`, then
/// renames it into place. A failure part way through leaves any existing
/// file untouched.
fn write_workbook(path: &Path, sheet: &str, table: &Table) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet)
        .map_err(|e| PrefCardError::write(path, e))?;
    write_table(worksheet, table, &header_format, &date_format)
        .map_err(|e| PrefCardError::write(path, e))?;

    let mut temp = temp_beside(path)?;
    workbook
        .save_to_writer(temp.as_file_mut())
        .map_err(|e| PrefCardError::write(path, e))?;
    temp.persist(path)
        .map_err(|e| PrefCardError::write(path, e.error))?;

    debug!("Wrote sheet '{}' to {}", sheet, path.display());
    Ok(())
}

impl TableStore for XlsxStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load_table(&self, path: &Path) -> Result<Table> {
        if is_csv(path) {
            return read_csv_table(path);
        }
        let mut workbook = open_workbook_auto(path).map_err(|e| PrefCardError::file_read(path, e))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| PrefCardError::file_read(path, "workbook has no sheets"))?
            .map_err(|e| PrefCardError::file_read(path, e))?;
        Ok(range_to_table(&range))
    }

    fn sheet_names(&self, path: &Path) -> Result<Vec<String>> {
        let workbook = open_workbook_auto(path).map_err(|e| PrefCardError::file_read(path, e))?;
        Ok(workbook.sheet_names())
    }

    fn load_sheet(&self, path: &Path, sheet: &str) -> Result<Table> {
        let mut workbook = open_workbook_auto(path).map_err(|e| PrefCardError::file_read(path, e))?;
        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| PrefCardError::file_read(path, e))?;
        Ok(range_to_table(&range))
    }

    fn append_sheet(&mut self, path: &Path, sheet: &str, table: &Table) -> Result<()> {
        let source = File::open(path).map_err(|e| PrefCardError::file_read(path, e))?;
        let mut temp = temp_beside(path)?;
        let sheet_count = append_worksheet(BufReader::new(source), temp.as_file_mut(), sheet, table)
            .map_err(|e| PrefCardError::write(path, e))?;
        temp.persist(path)
            .map_err(|e| PrefCardError::write(path, e.error))?;
        info!(
            "Appended sheet '{}' to {} ({} sheets total)",
            sheet,
            path.display(),
            sheet_count
        );
        Ok(())
    }

    fn write_new_workbook(&mut self, path: &Path, sheet: &str, table: &Table) -> Result<()> {
        write_workbook(path, sheet, table)?;
        info!("Created workbook {} with sheet '{}'", path.display(), sheet);
        Ok(())
    }
}
