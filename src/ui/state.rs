use std::path::PathBuf;

use crate::error::PrefCardError;
use crate::export::ExportPrompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ConfirmFiles,
    Welcome,
    SelectSheet,
    SelectServices,
    SelectContainers,
}

/// The modal window currently on top, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Error { title: String, message: String },
    Export(ExportPrompt),
    /// Shown after a successful export: start another card or exit
    Restart { message: String },
}

#[derive(Default)]
pub struct SheetPickerState {
    pub workbooks: Vec<PathBuf>,
    pub workbook: Option<PathBuf>,
    pub sheets: Vec<String>,
    pub sheet: Option<String>,
}

impl SheetPickerState {
    pub fn reset(&mut self, workbooks: Vec<PathBuf>) {
        *self = Self {
            workbooks,
            ..Self::default()
        };
    }
}

pub struct AppState {
    pub current_screen: Screen,
    pub dialog: Option<Dialog>,
    /// Text typed into the open prompt
    pub prompt_input: String,
    pub show_soft_goods: bool,
    pub sheet_picker: SheetPickerState,
    pub exit_requested: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_screen: Screen::ConfirmFiles,
            dialog: None,
            prompt_input: String::new(),
            show_soft_goods: false,
            sheet_picker: SheetPickerState::default(),
            exit_requested: false,
        }
    }
}

impl AppState {
    /// While a dialog is up the screens underneath take no input
    pub fn dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn show_error(&mut self, title: &str, error: &PrefCardError) {
        log::warn!("{title}: {error}");
        self.dialog = Some(Dialog::Error {
            title: title.to_string(),
            message: error.to_string(),
        });
    }

    pub fn ask(&mut self, prompt: ExportPrompt) {
        self.prompt_input.clear();
        self.dialog = Some(Dialog::Export(prompt));
    }
}
