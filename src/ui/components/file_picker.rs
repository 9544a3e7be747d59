use std::path::{Path, PathBuf};

use eframe::egui;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "csv"];

pub struct FilePicker<'a> {
    pub label: &'a str,
    pub path: Option<&'a Path>,
    pub start_dir: Option<&'a Path>,
    pub filter_name: &'a str,
    pub extensions: &'a [&'a str],
}

impl<'a> FilePicker<'a> {
    pub fn new(label: &'a str, path: Option<&'a Path>) -> Self {
        Self {
            label,
            path,
            start_dir: None,
            filter_name: "Spreadsheets",
            extensions: SPREADSHEET_EXTENSIONS,
        }
    }

    pub fn with_filter(mut self, name: &'a str, extensions: &'a [&'a str]) -> Self {
        self.filter_name = name;
        self.extensions = extensions;
        self
    }

    pub fn starting_in(mut self, dir: &'a Path) -> Self {
        self.start_dir = Some(dir);
        self
    }

    /// Shows the file picker widget. Returns the file the user just chose.
    pub fn show(&self, ui: &mut egui::Ui) -> Option<PathBuf> {
        let mut picked = None;
        ui.horizontal(|ui| {
            ui.label(self.label);
            match self.path {
                Some(path) => ui.monospace(path.display().to_string()),
                None => ui.weak("No file identified"),
            };
            if ui.button("Browse").clicked() {
                let mut dialog = rfd::FileDialog::new().add_filter(self.filter_name, self.extensions);
                if let Some(dir) = self.start_dir {
                    dialog = dialog.set_directory(dir);
                }
                picked = dialog.pick_file();
            }
        });
        picked
    }
}
