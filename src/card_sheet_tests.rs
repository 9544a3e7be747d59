//! Unit tests for the card sheet codec

use super::*;
use crate::io::MemoryStore;
use std::path::PathBuf;

fn sheet_row(
    quantity: Cell,
    service: &str,
    container: &str,
    description: &str,
    part: &str,
    hold: Cell,
) -> Vec<Cell> {
    let text = |s: &str| if s.is_empty() { Cell::Empty } else { Cell::text(s) };
    vec![
        quantity,
        text(service),
        text(container),
        text(description),
        text(part),
        hold,
    ]
}

#[test]
fn test_card_table_layout() {
    let rows = vec![
        PreferenceCardRow::instrument(3, "Cardiac", "Tray A", true),
        PreferenceCardRow::soft_good(10, "Gloves", "G-7", false),
    ];

    let table = card_table(&rows);

    assert_eq!(table.headers, SHEET_COLUMNS.map(String::from).to_vec());
    assert_eq!(
        table.rows[0],
        sheet_row(Cell::Int(3), "Cardiac", "Tray A", "", "", Cell::Bool(true))
    );
    assert_eq!(
        table.rows[1],
        sheet_row(Cell::Int(10), "", "", "Gloves", "G-7", Cell::Bool(false))
    );
}

#[test]
fn test_card_table_empty_selection_has_header_only() {
    let table = card_table(&[]);
    assert_eq!(table.headers.len(), 6);
    assert!(table.is_empty());
}

#[test]
fn test_from_table_splits_rows_by_kind() {
    let mut table = Table::with_headers(&SHEET_COLUMNS);
    table.push_row(sheet_row(Cell::Float(3.0), "Cardiac", "Tray A", "", "", Cell::Bool(true)));
    table.push_row(sheet_row(Cell::Float(2.0), "", "", "Gloves", "G-7", Cell::Bool(false)));

    let card = LoadedCard::from_table(&table, Path::new("Dr.xlsx")).unwrap();

    assert_eq!(
        card.selection.instruments,
        vec![PreferenceCardRow::instrument(3, "Cardiac", "Tray A", true)]
    );
    assert_eq!(
        card.selection.soft_goods,
        vec![PreferenceCardRow::soft_good(2, "Gloves", "G-7", false)]
    );
}

#[test]
fn test_from_table_round_trips_card_table() {
    let rows = vec![
        PreferenceCardRow::instrument(1, "Ortho", "Tray C", false),
        PreferenceCardRow::soft_good(4, "Sponges", "88", true),
    ];

    let card = LoadedCard::from_table(&card_table(&rows), Path::new("Dr.xlsx")).unwrap();

    assert_eq!(card.selection.combined(), rows);
}

#[test]
fn test_from_table_skips_unreadable_quantity() {
    let mut table = Table::with_headers(&SHEET_COLUMNS);
    table.push_row(sheet_row(Cell::text("lots"), "Cardiac", "Tray A", "", "", Cell::Empty));
    table.push_row(sheet_row(Cell::Int(1), "Cardiac", "Tray B", "", "", Cell::Empty));

    let card = LoadedCard::from_table(&table, Path::new("Dr.xlsx")).unwrap();

    assert_eq!(card.selection.instruments.len(), 1);
    assert_eq!(
        card.selection.instruments[0].container().unwrap().container_name,
        "Tray B"
    );
}

#[test]
fn test_whitespace_service_is_still_an_instrument_row() {
    let mut table = Table::with_headers(&SHEET_COLUMNS);
    table.push_row(sheet_row(Cell::Int(2), " ", "Loose Tray", "", "", Cell::Empty));

    let card = LoadedCard::from_table(&table, Path::new("Dr.xlsx")).unwrap();

    assert_eq!(
        card.selection.instruments,
        vec![PreferenceCardRow::instrument(2, " ", "Loose Tray", false)]
    );
    assert!(card.selection.soft_goods.is_empty());
}

#[test]
fn test_from_table_requires_all_columns() {
    let table = Table::with_headers(&["Quantity", "Service"]);

    let result = LoadedCard::from_table(&table, Path::new("Dr.xlsx"));

    assert!(matches!(result, Err(PrefCardError::SchemaValidation { .. })));
}

#[test]
fn test_services_in_first_appearance_order() {
    let mut table = Table::with_headers(&SHEET_COLUMNS);
    table.push_row(sheet_row(Cell::Int(1), "Ortho", "Tray C", "", "", Cell::Empty));
    table.push_row(sheet_row(Cell::Int(1), "Cardiac", "Tray A", "", "", Cell::Empty));
    table.push_row(sheet_row(Cell::Int(1), "Ortho", "Tray D", "", "", Cell::Empty));

    let card = LoadedCard::from_table(&table, Path::new("Dr.xlsx")).unwrap();

    assert_eq!(card.services(), vec!["Ortho".to_string(), "Cardiac".to_string()]);
}

#[test]
fn test_load_card_from_named_sheet() {
    let mut store = MemoryStore::new();
    let first = card_table(&[PreferenceCardRow::instrument(1, "Ortho", "Tray C", false)]);
    let second = card_table(&[PreferenceCardRow::instrument(5, "Cardiac", "Tray A", true)]);
    store.insert_workbook(
        "Dr Smith.xlsx",
        vec![("Knee_1".to_string(), first), ("Heart_2".to_string(), second)],
    );

    let card = load_card(&store, &PathBuf::from("Dr Smith.xlsx"), "Heart_2").unwrap();

    assert_eq!(card.services(), vec!["Cardiac".to_string()]);
    assert_eq!(card.selection.instruments[0].quantity(), 5);
}
