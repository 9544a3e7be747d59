//! In-memory tabular model shared by every spreadsheet backend.
//!
//! The first row of a sheet is the header; everything below it is data.
//! Core logic (grouping, preselection, export) only ever sees [`Table`],
//! never a spreadsheet library type.

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Excel serial date/time
    DateTime(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Missing value: no cell at all or a zero-length string. Whitespace is
    /// a value like any other.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Display text used for option labels and identity keys.
    ///
    /// Integral floats drop the decimal part so a part number stored as a
    /// number (`12345.0`) reads the same as one stored as text.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) | Cell::DateTime(f) => format_float(*f),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
        }
    }

    /// Reads the cell as a non-negative integer quantity
    pub fn as_quantity(&self) -> Option<u32> {
        match self {
            Cell::Int(i) => u32::try_from(*i).ok(),
            Cell::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64 => {
                Some(*f as u32)
            }
            Cell::Text(s) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
                    trimmed.parse().ok()
                } else {
                    // "3.0" is what a float column looks like after a CSV round trip
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .and_then(|f| Cell::Float(f).as_quantity())
                }
            }
            _ => None,
        }
    }

    /// Reads the cell as a hold flag; anything unrecognised is `false`
    pub fn as_flag(&self) -> bool {
        match self {
            Cell::Bool(b) => *b,
            Cell::Int(i) => *i != 0,
            Cell::Float(f) => *f != 0.0,
            Cell::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "y"
            ),
            Cell::Empty | Cell::DateTime(_) => false,
        }
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// A header row plus data rows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Builds a table from string headers, handy for fixtures
    pub fn with_headers(headers: &[&str]) -> Self {
        Self::new(headers.iter().map(|h| h.to_string()).collect())
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exact, case-sensitive header lookup
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_columns(&self, names: &[&str]) -> bool {
        self.missing_columns(names).is_empty()
    }

    pub fn missing_columns(&self, names: &[&str]) -> Vec<String> {
        names
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    /// Cell at (row, column); short rows read as empty
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    /// Copy of the header plus the first `limit` data rows
    pub fn head(&self, limit: usize) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(limit).cloned().collect(),
        }
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
