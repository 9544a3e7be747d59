//! Unit tests for the tabular model

use super::*;

#[test]
fn test_display_drops_integral_decimal() {
    assert_eq!(Cell::Float(12345.0).display(), "12345");
    assert_eq!(Cell::Float(1.5).display(), "1.5");
    assert_eq!(Cell::Int(-4).display(), "-4");
    assert_eq!(Cell::Empty.display(), "");
}

#[test]
fn test_quantity_from_cells() {
    assert_eq!(Cell::Int(3).as_quantity(), Some(3));
    assert_eq!(Cell::Float(3.0).as_quantity(), Some(3));
    assert_eq!(Cell::text("007").as_quantity(), Some(7));
    assert_eq!(Cell::text("3.0").as_quantity(), Some(3));
    assert_eq!(Cell::Float(2.5).as_quantity(), None);
    assert_eq!(Cell::Int(-1).as_quantity(), None);
    assert_eq!(Cell::text("abc").as_quantity(), None);
    assert_eq!(Cell::Empty.as_quantity(), None);
}

#[test]
fn test_flag_from_cells() {
    assert!(Cell::Bool(true).as_flag());
    assert!(Cell::text("TRUE").as_flag());
    assert!(Cell::Int(1).as_flag());
    assert!(!Cell::text("False").as_flag());
    assert!(!Cell::Empty.as_flag());
}

#[test]
fn test_only_blank_cells_are_empty() {
    assert!(Cell::Empty.is_empty());
    assert!(Cell::text("").is_empty());
    assert!(!Cell::text("   ").is_empty());
    assert!(!Cell::text(" x ").is_empty());
}

#[test]
fn test_column_lookup_is_case_sensitive() {
    let table = Table::with_headers(&["Service", "Container Name"]);

    assert_eq!(table.column_index("Service"), Some(0));
    assert_eq!(table.column_index("service"), None);
    assert_eq!(
        table.missing_columns(&["Service", "Reference ID"]),
        vec!["Reference ID".to_string()]
    );
}

#[test]
fn test_short_rows_read_as_empty() {
    let mut table = Table::with_headers(&["A", "B"]);
    table.push_row(vec![Cell::text("only a")]);

    assert_eq!(table.cell(0, 1), &Cell::Empty);
    assert_eq!(table.cell(5, 0), &Cell::Empty);
}

#[test]
fn test_head_limits_rows() {
    let mut table = Table::with_headers(&["A"]);
    for i in 0..15 {
        table.push_row(vec![Cell::Int(i)]);
    }

    let head = table.head(10);
    assert_eq!(head.len(), 10);
    assert_eq!(head.headers, table.headers);
}
