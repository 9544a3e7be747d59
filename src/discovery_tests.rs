//! Unit tests for catalog discovery and confirmation

use super::*;
use crate::io::MemoryStore;
use crate::table::Cell;

fn container_sheet() -> Table {
    let mut table = Table::with_headers(&["Service", "Container Name", "Reference ID"]);
    table.push_row(vec![Cell::text("Cardiac"), Cell::text("Tray A"), Cell::Int(1)]);
    table
}

fn soft_goods_sheet() -> Table {
    let mut table = Table::with_headers(&["ITEM DESCRIPTION", "VENDOR PART#", "UOM"]);
    table.push_row(vec![Cell::text("Gloves"), Cell::text("G-1"), Cell::text("BX")]);
    table
}

fn store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_workbook("in/a_notes.xlsx", vec![("Sheet1".into(), Table::with_headers(&["Notes"]))]);
    store.insert_workbook("in/b_containers.xlsx", vec![("Sheet1".into(), container_sheet())]);
    store.insert_workbook("in/c_soft.xlsx", vec![("Sheet1".into(), soft_goods_sheet())]);
    store
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn test_classify_by_headers() {
    assert_eq!(classify(&container_sheet()), Some(CatalogKind::Container));
    assert_eq!(classify(&soft_goods_sheet()), Some(CatalogKind::SoftGoods));
    assert_eq!(classify(&Table::with_headers(&["Service", "Container Name"])), None);
}

#[test]
fn test_discover_finds_both_files() {
    let found = CatalogFiles::discover(
        &store(),
        &paths(&["in/a_notes.xlsx", "in/b_containers.xlsx", "in/c_soft.xlsx"]),
    );

    assert_eq!(found.container, Some(PathBuf::from("in/b_containers.xlsx")));
    assert_eq!(found.soft_goods, Some(PathBuf::from("in/c_soft.xlsx")));
    assert!(found.confirm().is_ok());
}

#[test]
fn test_discover_skips_unreadable_files() {
    let found = CatalogFiles::discover(&store(), &paths(&["in/missing.xlsx", "in/c_soft.xlsx"]));

    assert_eq!(found.container, None);
    assert_eq!(found.soft_goods, Some(PathBuf::from("in/c_soft.xlsx")));
}

#[test]
fn test_confirm_reports_missing_files() {
    let none = CatalogFiles::default();
    assert!(matches!(
        none.confirm(),
        Err(PrefCardError::MissingFile(MissingFiles::Both))
    ));

    let only_soft = CatalogFiles {
        container: None,
        soft_goods: Some(PathBuf::from("soft.xlsx")),
    };
    let err = only_soft.confirm().unwrap_err();
    assert_eq!(err.to_string(), "No container file identified!");
}

#[test]
fn test_replace_rejects_wrong_columns_and_keeps_previous() {
    let store = store();
    let mut files = CatalogFiles::discover(&store, &paths(&["in/b_containers.xlsx"]));

    let result = files.replace(&store, CatalogKind::Container, Path::new("in/c_soft.xlsx"));

    assert!(matches!(result, Err(PrefCardError::SchemaValidation { .. })));
    assert_eq!(files.container, Some(PathBuf::from("in/b_containers.xlsx")));
}

#[test]
fn test_replace_accepts_valid_file() {
    let store = store();
    let mut files = CatalogFiles::default();

    files
        .replace(&store, CatalogKind::SoftGoods, Path::new("in/c_soft.xlsx"))
        .unwrap();

    assert_eq!(files.get(CatalogKind::SoftGoods), Some(Path::new("in/c_soft.xlsx")));
}

#[test]
fn test_fill_missing_only_fills_empty_slot() {
    let store = store();
    let mut files = CatalogFiles {
        container: Some(PathBuf::from("in/b_containers.xlsx")),
        soft_goods: None,
    };

    files.fill_missing(&store, CatalogKind::Container, Path::new("in/other.xlsx"));
    files.fill_missing(&store, CatalogKind::SoftGoods, Path::new("in/c_soft.xlsx"));

    assert_eq!(files.container, Some(PathBuf::from("in/b_containers.xlsx")));
    assert_eq!(files.soft_goods, Some(PathBuf::from("in/c_soft.xlsx")));
}

#[test]
fn test_preview_limits_rows() {
    let mut big = container_sheet();
    for i in 0..30 {
        big.push_row(vec![Cell::text("Ortho"), Cell::text(format!("Tray {i}")), Cell::Int(i)]);
    }
    let mut store = MemoryStore::new();
    store.insert_workbook("big.xlsx", vec![("Sheet1".into(), big)]);

    let table = preview(&store, Path::new("big.xlsx")).unwrap();

    assert_eq!(table.len(), PREVIEW_ROWS);
}
