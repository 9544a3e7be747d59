//! Export of the current selection to a per-doctor workbook.
//!
//! The dialog sequence is a small state machine: [`ExportFlow`] hands out
//! one [`ExportPrompt`] at a time and the UI answers it. Cancelling any
//! prompt ends the flow without touching the filesystem; only the final
//! answer writes.
//!
//! Branches, starting from `<out_dir>/<doctor>.xlsx`:
//! - file exists, append confirmed: surgery name, then a new sheet is
//!   appended and the other sheets are kept;
//! - file exists, append declined: Save As path, surgery name, then a new
//!   single-sheet workbook is written there;
//! - file missing, create confirmed: surgery name, then the workbook is
//!   created;
//! - file missing, create declined: nothing happens.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, info, warn};

use crate::card_sheet::card_table;
use crate::error::{PrefCardError, Result};
use crate::io::TableStore;
use crate::models::PreferenceCardRow;
use crate::table::Table;
use crate::utils::{sheet_timestamp, unique_sheet_name};

/// A question the UI must put to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPrompt {
    DoctorName,
    ConfirmAppend { file_name: String },
    ConfirmCreate { file_name: String },
    SaveAs { suggested: String },
    SurgeryName,
}

impl ExportPrompt {
    pub fn title(&self) -> &'static str {
        match self {
            ExportPrompt::DoctorName => "Enter Doctor's Name",
            ExportPrompt::ConfirmAppend { .. } => "File Exists",
            ExportPrompt::ConfirmCreate { .. } => "File Not Found",
            ExportPrompt::SaveAs { .. } => "Save As",
            ExportPrompt::SurgeryName => "Enter Name of Surgery",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ExportPrompt::DoctorName => "Please enter the doctor's name:".to_string(),
            ExportPrompt::ConfirmAppend { file_name } => {
                format!("File '{file_name}' already exists. Do you want to append to this file?")
            }
            ExportPrompt::ConfirmCreate { file_name } => {
                format!("File '{file_name}' does not exist. Do you want to create a new file?")
            }
            ExportPrompt::SaveAs { suggested } => format!("Choose where to save '{suggested}'"),
            ExportPrompt::SurgeryName => "Please enter the name of the surgery performed:".to_string(),
        }
    }
}

/// The user's reply to the current prompt. `None` means the dialog was
/// cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportAnswer {
    Text(Option<String>),
    Confirm(bool),
    Path(Option<PathBuf>),
}

/// What was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub sheet_name: String,
    pub rows: usize,
    pub appended: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStep {
    Prompt(ExportPrompt),
    Done(ExportOutcome),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Append(PathBuf),
    NewWorkbook(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Doctor,
    Append { path: PathBuf, file_name: String },
    Create { path: PathBuf },
    SaveAs { suggested: String },
    Surgery(Target),
    Finished,
}

/// File name for a doctor's workbook; path separators are replaced
pub fn doctor_file_name(doctor: &str) -> String {
    format!("{}.xlsx", doctor.trim().replace(['/', '\\'], "-"))
}

#[derive(Debug, Clone)]
pub struct ExportFlow {
    out_dir: PathBuf,
    table: Table,
    stage: Stage,
}

impl ExportFlow {
    /// Combines instrument rows and soft-goods rows (in that order).
    ///
    /// Fails with [`PrefCardError::NothingToExport`] when both are empty.
    pub fn start(
        out_dir: &Path,
        instruments: &[PreferenceCardRow],
        soft_goods: &[PreferenceCardRow],
    ) -> Result<Self> {
        let combined: Vec<PreferenceCardRow> =
            instruments.iter().chain(soft_goods).cloned().collect();
        if combined.is_empty() {
            warn!("Export requested with nothing selected");
            return Err(PrefCardError::NothingToExport);
        }
        info!(
            "Starting export of {} instrument and {} soft goods rows",
            instruments.len(),
            soft_goods.len()
        );
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            table: card_table(&combined),
            stage: Stage::Doctor,
        })
    }

    /// The prompt currently waiting for an answer, if the flow is still open
    pub fn prompt(&self) -> Option<ExportPrompt> {
        match &self.stage {
            Stage::Doctor => Some(ExportPrompt::DoctorName),
            Stage::Append { path, .. } => Some(ExportPrompt::ConfirmAppend {
                file_name: display_name(path),
            }),
            Stage::Create { path } => Some(ExportPrompt::ConfirmCreate {
                file_name: display_name(path),
            }),
            Stage::SaveAs { suggested } => Some(ExportPrompt::SaveAs {
                suggested: suggested.clone(),
            }),
            Stage::Surgery(_) => Some(ExportPrompt::SurgeryName),
            Stage::Finished => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    fn cancel(&mut self) -> ExportStep {
        info!("Export cancelled");
        self.stage = Stage::Finished;
        ExportStep::Cancelled
    }

    fn ask(&self) -> ExportStep {
        match self.prompt() {
            Some(prompt) => {
                debug!("Export prompt: {:?}", prompt);
                ExportStep::Prompt(prompt)
            }
            None => ExportStep::Cancelled,
        }
    }

    /// Feeds the answer to the current prompt and returns the next step.
    ///
    /// A write failure ends the flow with the error; nothing else is
    /// written.
    pub fn answer(
        &mut self,
        store: &mut dyn TableStore,
        answer: ExportAnswer,
        now: NaiveDateTime,
    ) -> Result<ExportStep> {
        let stage = std::mem::replace(&mut self.stage, Stage::Finished);
        match (stage, answer) {
            (Stage::Doctor, ExportAnswer::Text(Some(doctor))) if !doctor.trim().is_empty() => {
                let file_name = doctor_file_name(&doctor);
                let path = self.out_dir.join(&file_name);
                self.stage = if store.exists(&path) {
                    Stage::Append { path, file_name }
                } else {
                    Stage::Create { path }
                };
                Ok(self.ask())
            }
            (Stage::Append { path, .. }, ExportAnswer::Confirm(true)) => {
                self.stage = Stage::Surgery(Target::Append(path));
                Ok(self.ask())
            }
            (Stage::Append { file_name, .. }, ExportAnswer::Confirm(false)) => {
                self.stage = Stage::SaveAs {
                    suggested: file_name,
                };
                Ok(self.ask())
            }
            (Stage::Create { path }, ExportAnswer::Confirm(true)) => {
                self.stage = Stage::Surgery(Target::NewWorkbook(path));
                Ok(self.ask())
            }
            (Stage::SaveAs { .. }, ExportAnswer::Path(Some(path))) => {
                self.stage = Stage::Surgery(Target::NewWorkbook(path));
                Ok(self.ask())
            }
            (Stage::Surgery(target), ExportAnswer::Text(Some(surgery))) => {
                let outcome = self.write(store, target, &surgery, now)?;
                Ok(ExportStep::Done(outcome))
            }
            (Stage::Finished, _) => Ok(ExportStep::Cancelled),
            (stage, answer) => {
                debug!("Ending export at {:?} on answer {:?}", stage, answer);
                Ok(self.cancel())
            }
        }
    }

    fn write(
        &mut self,
        store: &mut dyn TableStore,
        target: Target,
        surgery: &str,
        now: NaiveDateTime,
    ) -> Result<ExportOutcome> {
        let timestamp = sheet_timestamp(now);
        let outcome = match target {
            Target::Append(path) => {
                let existing = store.sheet_names(&path)?;
                let sheet_name = unique_sheet_name(surgery, &timestamp, &existing);
                store.append_sheet(&path, &sheet_name, &self.table)?;
                ExportOutcome {
                    path,
                    sheet_name,
                    rows: self.table.len(),
                    appended: true,
                }
            }
            Target::NewWorkbook(path) => {
                let sheet_name = unique_sheet_name(surgery, &timestamp, &[]);
                store.write_new_workbook(&path, &sheet_name, &self.table)?;
                ExportOutcome {
                    path,
                    sheet_name,
                    rows: self.table.len(),
                    appended: false,
                }
            }
        };
        info!(
            "Exported {} rows to '{}' in {}",
            outcome.rows,
            outcome.sheet_name,
            outcome.path.display()
        );
        Ok(outcome)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
