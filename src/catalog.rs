//! Reference catalogs
//!
//! Turns the container and soft-goods spreadsheets into the option sets the
//! entry screens offer. Grouping compares key cells exactly: no trimming,
//! no case folding.

use std::collections::BTreeMap;
use std::path::Path;

use log::{info, warn};

use crate::error::{PrefCardError, Result};
use crate::io::TableStore;
use crate::models::{
    CatalogKind, ContainerOption, SoftGoodOption, CATALOG_CONTAINER_NAME,
    CATALOG_ITEM_DESCRIPTION, CATALOG_SERVICE, CATALOG_VENDOR_PART,
};
use crate::table::Table;

/// Group key → values in source row order. Keys iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedOptions {
    groups: BTreeMap<String, Vec<String>>,
}

impl GroupedOptions {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Container options of the selected services, service by service in
    /// selection order. Unknown services contribute nothing.
    pub fn containers_for(&self, services: &[String]) -> Vec<ContainerOption> {
        services
            .iter()
            .filter_map(|service| self.groups.get(service).map(|names| (service, names)))
            .flat_map(|(service, names)| {
                names
                    .iter()
                    .map(move |name| ContainerOption::new(service.clone(), name.clone()))
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GroupedOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in iter {
            groups.entry(key.into()).or_default().push(value.into());
        }
        Self { groups }
    }
}

fn require_columns(table: &Table, path: &Path, kind: CatalogKind, columns: &[&str]) -> Result<()> {
    let missing = table.missing_columns(columns);
    if missing.is_empty() {
        Ok(())
    } else {
        warn!("{} is missing columns {:?}", path.display(), missing);
        Err(PrefCardError::SchemaValidation {
            path: path.to_path_buf(),
            kind: kind.as_str(),
            missing,
        })
    }
}

/// Groups `value_column` by `key_column`, keeping row order within a group.
///
/// Rows with an empty key or value are skipped.
pub fn group_options(table: &Table, key_column: &str, value_column: &str) -> Option<GroupedOptions> {
    let key_idx = table.column_index(key_column)?;
    let value_idx = table.column_index(value_column)?;

    let mut skipped = 0usize;
    let pairs: Vec<(String, String)> = (0..table.len())
        .filter_map(|row| {
            let key = table.cell(row, key_idx);
            let value = table.cell(row, value_idx);
            if key.is_empty() || value.is_empty() {
                skipped += 1;
                None
            } else {
                Some((key.display(), value.display()))
            }
        })
        .collect();

    if skipped > 0 {
        warn!("Skipped {skipped} catalog row(s) with an empty '{key_column}' or '{value_column}'");
    }
    Some(pairs.into_iter().collect())
}

/// Reads a catalog and groups `value_column` by `key_column`.
///
/// An unreadable or empty file is a [`PrefCardError::FileRead`]; callers show
/// it and carry on with no options. Missing columns are reported against
/// `kind`.
pub fn load_grouped(
    store: &dyn TableStore,
    path: &Path,
    kind: CatalogKind,
    key_column: &str,
    value_column: &str,
) -> Result<GroupedOptions> {
    let table = store.load_table(path)?;
    if table.headers.is_empty() {
        return Err(PrefCardError::file_read(path, "file is empty"));
    }
    require_columns(&table, path, kind, &[key_column, value_column])?;

    let grouped = group_options(&table, key_column, value_column).unwrap_or_default();
    info!(
        "Loaded {} rows into {} groups from {}",
        table.len(),
        grouped.len(),
        path.display()
    );
    Ok(grouped)
}

/// Containers grouped by service
pub fn load_container_catalog(store: &dyn TableStore, path: &Path) -> Result<GroupedOptions> {
    load_grouped(store, path, CatalogKind::Container, CATALOG_SERVICE, CATALOG_CONTAINER_NAME)
}

/// Soft goods sorted by item description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoftGoodsCatalog {
    pub items: Vec<SoftGoodOption>,
}

impl SoftGoodsCatalog {
    pub fn from_table(table: &Table, path: &Path) -> Result<Self> {
        require_columns(
            table,
            path,
            CatalogKind::SoftGoods,
            &[CATALOG_ITEM_DESCRIPTION, CATALOG_VENDOR_PART],
        )?;
        let desc_idx = table.column_index(CATALOG_ITEM_DESCRIPTION).unwrap_or_default();
        let part_idx = table.column_index(CATALOG_VENDOR_PART).unwrap_or_default();

        let mut items: Vec<SoftGoodOption> = (0..table.len())
            .filter(|&row| !table.cell(row, desc_idx).is_empty())
            .map(|row| {
                SoftGoodOption::new(
                    table.cell(row, desc_idx).display(),
                    table.cell(row, part_idx).display(),
                )
            })
            .collect();
        let skipped = table.len() - items.len();
        if skipped > 0 {
            warn!("Skipped {skipped} soft goods row(s) without an item description");
        }

        items.sort_by(|a, b| a.item_description.cmp(&b.item_description));
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn load_soft_goods_catalog(store: &dyn TableStore, path: &Path) -> Result<SoftGoodsCatalog> {
    let table = store.load_table(path)?;
    if table.headers.is_empty() {
        return Err(PrefCardError::file_read(path, "file is empty"));
    }
    let catalog = SoftGoodsCatalog::from_table(&table, path)?;
    info!("Loaded {} soft goods from {}", catalog.len(), path.display());
    Ok(catalog)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
