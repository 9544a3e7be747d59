//! Reading and writing preference card sheets.
//!
//! A card sheet uses the [`SHEET_COLUMNS`] layout. Instrument rows carry a
//! service, soft-goods rows carry a vendor part number; the other columns
//! of a row are left empty.

use std::path::Path;

use log::{debug, info, warn};

use crate::error::{PrefCardError, Result};
use crate::io::TableStore;
use crate::models::{
    PreferenceCardRow, PreferenceCardSelection, COL_CONTAINER_NAME, COL_HOLD,
    COL_ITEM_DESCRIPTION, COL_QUANTITY, COL_SERVICE, COL_VENDOR_PART, SHEET_COLUMNS,
};
use crate::table::{Cell, Table};

/// Builds the sheet written on export
pub fn card_table(rows: &[PreferenceCardRow]) -> Table {
    let mut table = Table::with_headers(&SHEET_COLUMNS);
    for row in rows {
        let cells = match row {
            PreferenceCardRow::Instrument {
                quantity,
                container,
                hold,
            } => vec![
                Cell::Int(i64::from(*quantity)),
                Cell::text(container.service.as_str()),
                Cell::text(container.container_name.as_str()),
                Cell::Empty,
                Cell::Empty,
                Cell::Bool(*hold),
            ],
            PreferenceCardRow::SoftGood {
                quantity,
                item,
                hold,
            } => vec![
                Cell::Int(i64::from(*quantity)),
                Cell::Empty,
                Cell::Empty,
                Cell::text(item.item_description.as_str()),
                Cell::text(item.vendor_part_number.as_str()),
                Cell::Bool(*hold),
            ],
        };
        table.push_row(cells);
    }
    table
}

/// A saved card read back for editing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedCard {
    pub selection: PreferenceCardSelection,
}

struct SheetColumns {
    quantity: usize,
    service: usize,
    container_name: usize,
    item_description: usize,
    vendor_part: usize,
    hold: usize,
}

impl SheetColumns {
    fn locate(table: &Table, path: &Path) -> Result<Self> {
        let missing = table.missing_columns(&SHEET_COLUMNS);
        if !missing.is_empty() {
            warn!("Card sheet in {} is missing columns {:?}", path.display(), missing);
            return Err(PrefCardError::SchemaValidation {
                path: path.to_path_buf(),
                kind: "preference card",
                missing,
            });
        }
        let idx = |name| table.column_index(name).unwrap_or_default();
        Ok(Self {
            quantity: idx(COL_QUANTITY),
            service: idx(COL_SERVICE),
            container_name: idx(COL_CONTAINER_NAME),
            item_description: idx(COL_ITEM_DESCRIPTION),
            vendor_part: idx(COL_VENDOR_PART),
            hold: idx(COL_HOLD),
        })
    }
}

impl LoadedCard {
    /// Splits a card sheet into instrument and soft-goods rows.
    ///
    /// Rows whose quantity is not a non-negative integer are dropped.
    pub fn from_table(table: &Table, path: &Path) -> Result<Self> {
        let cols = SheetColumns::locate(table, path)?;
        let mut selection = PreferenceCardSelection::default();

        for row in 0..table.len() {
            let service = table.cell(row, cols.service);
            let vendor_part = table.cell(row, cols.vendor_part);
            if service.is_empty() && vendor_part.is_empty() {
                continue;
            }

            let Some(quantity) = table.cell(row, cols.quantity).as_quantity() else {
                warn!(
                    "Skipping card row {} with unreadable quantity {:?}",
                    row + 2,
                    table.cell(row, cols.quantity)
                );
                continue;
            };
            let hold = table.cell(row, cols.hold).as_flag();

            if !service.is_empty() {
                selection.instruments.push(PreferenceCardRow::instrument(
                    quantity,
                    &service.display(),
                    &table.cell(row, cols.container_name).display(),
                    hold,
                ));
            }
            if !vendor_part.is_empty() {
                selection.soft_goods.push(PreferenceCardRow::soft_good(
                    quantity,
                    &table.cell(row, cols.item_description).display(),
                    &vendor_part.display(),
                    hold,
                ));
            }
        }

        debug!(
            "Card sheet has {} instrument and {} soft goods rows",
            selection.instruments.len(),
            selection.soft_goods.len()
        );
        Ok(Self { selection })
    }

    /// Services to preselect when the card is edited
    pub fn services(&self) -> Vec<String> {
        self.selection.services()
    }
}

/// Reads one sheet of a saved card workbook
pub fn load_card(store: &dyn TableStore, path: &Path, sheet: &str) -> Result<LoadedCard> {
    let table = store.load_sheet(path, sheet)?;
    let card = LoadedCard::from_table(&table, path)?;
    info!(
        "Loaded card '{}' from {} ({} rows)",
        sheet,
        path.display(),
        card.selection.instruments.len() + card.selection.soft_goods.len()
    );
    Ok(card)
}

#[cfg(test)]
#[path = "card_sheet_tests.rs"]
mod tests;
