//! The state of one running program.
//!
//! A [`Session`] is created once, then [`Session::initialize`]d at the start
//! of every card. Each screen of the front end calls one transition method
//! and reads back the state it needs to draw.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{info, warn};

use crate::card_sheet::load_card;
use crate::catalog::{load_container_catalog, load_soft_goods_catalog, GroupedOptions, SoftGoodsCatalog};
use crate::config::AppConfig;
use crate::discovery::{preview, workbook_candidates, CatalogFiles};
use crate::entries::{ContainerForm, SoftGoodsForm};
use crate::error::{MissingFiles, PrefCardError, Result};
use crate::export::{ExportAnswer, ExportFlow, ExportPrompt, ExportStep};
use crate::io::TableStore;
use crate::models::{CatalogKind, PreferenceCardRow, PreferenceCardSelection};
use crate::services::ServiceSelector;
use crate::settings::Settings;
use crate::table::Table;

pub struct Session {
    config: AppConfig,
    store: Box<dyn TableStore>,
    files: CatalogFiles,
    catalog: GroupedOptions,
    soft_goods_catalog: Option<SoftGoodsCatalog>,
    selector: ServiceSelector,
    selected_services: Vec<String>,
    containers: ContainerForm,
    soft_goods: SoftGoodsForm,
    committed_soft_goods: Vec<PreferenceCardRow>,
    preselected: PreferenceCardSelection,
    editing: Option<(PathBuf, String)>,
    export: Option<ExportFlow>,
}

impl Session {
    pub fn new(config: AppConfig, store: Box<dyn TableStore>) -> Self {
        Self {
            config,
            store,
            files: CatalogFiles::default(),
            catalog: GroupedOptions::default(),
            soft_goods_catalog: None,
            selector: ServiceSelector::default(),
            selected_services: Vec::new(),
            containers: ContainerForm::default(),
            soft_goods: SoftGoodsForm::default(),
            committed_soft_goods: Vec::new(),
            preselected: PreferenceCardSelection::default(),
            editing: None,
            export: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn TableStore {
        self.store.as_ref()
    }

    // ---------------------------------------------------------------
    // Catalog files
    // ---------------------------------------------------------------

    /// Scans the input directory, falling back to remembered files for any
    /// kind the scan did not find
    pub fn discover(&mut self, remembered: &Settings) -> Result<()> {
        self.files = CatalogFiles::discover_in(self.store.as_ref(), &self.config.in_dir)?;
        for kind in [CatalogKind::Container, CatalogKind::SoftGoods] {
            if let Some(path) = remembered.remembered(kind) {
                self.files.fill_missing(self.store.as_ref(), kind, path);
            }
        }
        Ok(())
    }

    pub fn files(&self) -> &CatalogFiles {
        &self.files
    }

    pub fn replace_file(&mut self, kind: CatalogKind, path: &Path) -> Result<()> {
        self.files.replace(self.store.as_ref(), kind, path)?;
        if kind == CatalogKind::SoftGoods {
            self.soft_goods_catalog = None;
        }
        Ok(())
    }

    pub fn preview(&self, kind: CatalogKind) -> Option<Result<Table>> {
        self.files
            .get(kind)
            .map(|path| preview(self.store.as_ref(), path))
    }

    /// Both confirmed files, or `MissingFile`
    pub fn confirm_files(&self) -> Result<(PathBuf, PathBuf)> {
        self.files.confirm()
    }

    // ---------------------------------------------------------------
    // Card lifecycle
    // ---------------------------------------------------------------

    /// Drops everything belonging to the current card. Catalog files stay.
    pub fn initialize(&mut self) {
        info!("Starting a fresh preference card session");
        self.catalog = GroupedOptions::default();
        self.selector = ServiceSelector::default();
        self.selected_services.clear();
        self.containers = ContainerForm::default();
        self.soft_goods = SoftGoodsForm::default();
        self.committed_soft_goods.clear();
        self.preselected = PreferenceCardSelection::default();
        self.editing = None;
        self.export = None;
    }

    pub fn start_new_card(&mut self) {
        self.initialize();
        info!("Creating a new preference card");
    }

    /// Saved card workbooks in the output directory
    pub fn card_workbooks(&self) -> Result<Vec<PathBuf>> {
        workbook_candidates(&self.config.out_dir)
    }

    pub fn card_sheets(&self, path: &Path) -> Result<Vec<String>> {
        self.store.sheet_names(path)
    }

    /// Loads one saved sheet as the preselection for the rest of the card
    pub fn start_edit(&mut self, path: &Path, sheet: &str) -> Result<()> {
        let card = load_card(self.store.as_ref(), path, sheet)?;
        self.initialize();
        self.committed_soft_goods = card.selection.soft_goods.clone();
        self.preselected = card.selection;
        self.editing = Some((path.to_path_buf(), sheet.to_string()));
        Ok(())
    }

    /// The workbook and sheet being edited, if any
    pub fn editing(&self) -> Option<(&Path, &str)> {
        self.editing
            .as_ref()
            .map(|(path, sheet)| (path.as_path(), sheet.as_str()))
    }

    pub fn preselected(&self) -> &PreferenceCardSelection {
        &self.preselected
    }

    // ---------------------------------------------------------------
    // Services and containers
    // ---------------------------------------------------------------

    /// Reads the container catalog and prepares the service selector. On a
    /// read failure the selector is left empty and the error returned so it
    /// can be shown.
    pub fn load_services(&mut self) -> Result<()> {
        let (container_file, _) = self.files.confirm()?;
        let catalog = match load_container_catalog(self.store.as_ref(), &container_file) {
            Ok(catalog) => catalog,
            Err(e) => {
                self.catalog = GroupedOptions::default();
                self.selector = ServiceSelector::default();
                return Err(e);
            }
        };
        let preselected = self.preselected.services();
        self.selector = ServiceSelector::new(&catalog, &preselected);
        self.catalog = catalog;
        Ok(())
    }

    pub fn selector(&self) -> &ServiceSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut ServiceSelector {
        &mut self.selector
    }

    /// Fixes the service choice and builds the container entries for it.
    /// Containers still offered keep any quantity or hold already entered.
    pub fn select_services(&mut self) -> Result<()> {
        let services = self.selector.selection()?;
        let options = self.catalog.containers_for(&services);
        self.containers = self.containers.rebuild(options, &self.preselected.instruments);
        info!(
            "Offering {} containers for {} service(s)",
            self.containers.len(),
            services.len()
        );
        self.selected_services = services;
        Ok(())
    }

    pub fn selected_services(&self) -> &[String] {
        &self.selected_services
    }

    pub fn containers(&self) -> &ContainerForm {
        &self.containers
    }

    pub fn containers_mut(&mut self) -> &mut ContainerForm {
        &mut self.containers
    }

    // ---------------------------------------------------------------
    // Soft goods
    // ---------------------------------------------------------------

    /// Builds the soft-goods entries, prefilled from the last commit
    pub fn open_soft_goods(&mut self) -> Result<()> {
        if self.soft_goods_catalog.is_none() {
            let path = self
                .files
                .soft_goods
                .clone()
                .ok_or(PrefCardError::MissingFile(MissingFiles::SoftGoods))?;
            self.soft_goods_catalog = Some(load_soft_goods_catalog(self.store.as_ref(), &path)?);
        }
        let items = self
            .soft_goods_catalog
            .as_ref()
            .map(|catalog| catalog.items.clone())
            .unwrap_or_default();
        self.soft_goods = SoftGoodsForm::build(items, &self.committed_soft_goods);
        Ok(())
    }

    pub fn soft_goods(&self) -> &SoftGoodsForm {
        &self.soft_goods
    }

    pub fn soft_goods_mut(&mut self) -> &mut SoftGoodsForm {
        &mut self.soft_goods
    }

    pub fn commit_soft_goods(&mut self) {
        self.committed_soft_goods = self.soft_goods.to_rows();
        info!("Committed {} soft goods", self.committed_soft_goods.len());
    }

    /// Throws away edits made since the last commit
    pub fn cancel_soft_goods(&mut self) {
        let items: Vec<_> = self.soft_goods.entries().iter().map(|e| e.option.clone()).collect();
        self.soft_goods = SoftGoodsForm::build(items, &self.committed_soft_goods);
    }

    pub fn committed_soft_goods(&self) -> &[PreferenceCardRow] {
        &self.committed_soft_goods
    }

    /// Instrument rows from the container entries plus committed soft goods
    pub fn current_selection(&self) -> PreferenceCardSelection {
        PreferenceCardSelection::new(self.containers.to_rows(), self.committed_soft_goods.clone())
    }

    // ---------------------------------------------------------------
    // Export
    // ---------------------------------------------------------------

    /// Starts an export of the current selection. While one is already
    /// waiting on an answer its open question is returned instead.
    pub fn begin_export(&mut self) -> Result<ExportPrompt> {
        if let Some(prompt) = self.export_prompt() {
            warn!("Export already in progress");
            return Ok(prompt);
        }
        let selection = self.current_selection();
        let flow = ExportFlow::start(
            &self.config.out_dir,
            &selection.instruments,
            &selection.soft_goods,
        )?;
        let prompt = flow.prompt().unwrap_or(ExportPrompt::DoctorName);
        self.export = Some(flow);
        Ok(prompt)
    }

    pub fn export_prompt(&self) -> Option<ExportPrompt> {
        self.export.as_ref().and_then(ExportFlow::prompt)
    }

    /// Passes the user's answer to the open export. The flow is dropped
    /// once it finishes, fails or is cancelled.
    pub fn answer_export(&mut self, answer: ExportAnswer, now: NaiveDateTime) -> Result<ExportStep> {
        let Some(flow) = self.export.as_mut() else {
            warn!("Export answer with no export in progress");
            return Ok(ExportStep::Cancelled);
        };
        let result = flow.answer(self.store.as_mut(), answer, now);
        if !matches!(result, Ok(ExportStep::Prompt(_))) {
            self.export = None;
        }
        result
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
