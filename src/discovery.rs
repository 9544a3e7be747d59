//! Locating and confirming the two catalog files.
//!
//! The input directory is scanned for workbooks whose header identifies them
//! as a container catalog or a soft-goods catalog. The user confirms the
//! pair (or swaps either file) before anything else runs.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{MissingFiles, PrefCardError, Result};
use crate::io::TableStore;
use crate::models::CatalogKind;
use crate::table::Table;

/// Rows shown in the confirmation preview
pub const PREVIEW_ROWS: usize = 10;

/// Which kind of catalog a header row describes, if any
pub fn classify(table: &Table) -> Option<CatalogKind> {
    if table.has_columns(CatalogKind::Container.required_columns()) {
        Some(CatalogKind::Container)
    } else if table.has_columns(CatalogKind::SoftGoods.required_columns()) {
        Some(CatalogKind::SoftGoods)
    } else {
        None
    }
}

/// `*.xlsx` files in `dir`, sorted by name
pub fn workbook_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// The catalog files chosen so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFiles {
    pub container: Option<PathBuf>,
    pub soft_goods: Option<PathBuf>,
}

impl CatalogFiles {
    /// Scans `candidates` in order, stopping once both kinds are found.
    /// Files that cannot be read are skipped.
    pub fn discover(store: &dyn TableStore, candidates: &[PathBuf]) -> Self {
        let mut found = Self::default();
        for path in candidates {
            let table = match store.load_table(path) {
                Ok(table) => table,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            match classify(&table) {
                Some(CatalogKind::Container) => {
                    found.container = Some(path.clone());
                    if found.soft_goods.is_some() {
                        break;
                    }
                }
                Some(CatalogKind::SoftGoods) => {
                    found.soft_goods = Some(path.clone());
                    if found.container.is_some() {
                        break;
                    }
                }
                None => {}
            }
        }
        info!(
            "Discovered container file: {:?}, soft goods file: {:?}",
            found.container, found.soft_goods
        );
        found
    }

    /// Scans `dir` for catalog workbooks
    pub fn discover_in(store: &dyn TableStore, dir: &Path) -> Result<Self> {
        let candidates = workbook_candidates(dir)?;
        Ok(Self::discover(store, &candidates))
    }

    pub fn get(&self, kind: CatalogKind) -> Option<&Path> {
        match kind {
            CatalogKind::Container => self.container.as_deref(),
            CatalogKind::SoftGoods => self.soft_goods.as_deref(),
        }
    }

    /// Fills a missing slot with `path` if it validates as `kind`
    pub fn fill_missing(&mut self, store: &dyn TableStore, kind: CatalogKind, path: &Path) {
        if self.get(kind).is_some() || !store.exists(path) {
            return;
        }
        match validate(store, kind, path) {
            Ok(()) => {
                info!("Using remembered {}: {}", kind.as_str(), path.display());
                self.set(kind, path.to_path_buf());
            }
            Err(e) => warn!("Remembered {} is no longer usable: {}", kind.as_str(), e),
        }
    }

    /// Swaps in a user-picked file after checking its columns. On failure
    /// the previous file stays selected.
    pub fn replace(&mut self, store: &dyn TableStore, kind: CatalogKind, path: &Path) -> Result<()> {
        validate(store, kind, path)?;
        info!("Selected {}: {}", kind.as_str(), path.display());
        self.set(kind, path.to_path_buf());
        Ok(())
    }

    fn set(&mut self, kind: CatalogKind, path: PathBuf) {
        match kind {
            CatalogKind::Container => self.container = Some(path),
            CatalogKind::SoftGoods => self.soft_goods = Some(path),
        }
    }

    /// Both files, or which ones are missing
    pub fn confirm(&self) -> Result<(PathBuf, PathBuf)> {
        match (&self.container, &self.soft_goods) {
            (Some(container), Some(soft_goods)) => Ok((container.clone(), soft_goods.clone())),
            (None, None) => Err(PrefCardError::MissingFile(MissingFiles::Both)),
            (None, Some(_)) => Err(PrefCardError::MissingFile(MissingFiles::Container)),
            (Some(_), None) => Err(PrefCardError::MissingFile(MissingFiles::SoftGoods)),
        }
    }
}

/// Checks that `path` has the columns required for `kind`
pub fn validate(store: &dyn TableStore, kind: CatalogKind, path: &Path) -> Result<()> {
    let table = store.load_table(path)?;
    let missing = table.missing_columns(kind.required_columns());
    if missing.is_empty() {
        Ok(())
    } else {
        warn!("{} rejected as {}: missing {:?}", path.display(), kind.as_str(), missing);
        Err(PrefCardError::SchemaValidation {
            path: path.to_path_buf(),
            kind: kind.as_str(),
            missing,
        })
    }
}

/// Header plus the first rows of a file for the confirmation screen
pub fn preview(store: &dyn TableStore, path: &Path) -> Result<Table> {
    Ok(store.load_table(path)?.head(PREVIEW_ROWS))
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
