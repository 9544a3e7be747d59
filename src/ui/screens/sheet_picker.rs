use std::path::{Path, PathBuf};

use crate::{
    session::Session,
    ui::{
        components::FilePicker,
        screens::WelcomeScreen,
        state::{AppState, Screen},
    },
};
use eframe::egui;

pub struct SheetPickerScreen;

impl SheetPickerScreen {
    pub fn show(ctx: &egui::Context, state: &mut AppState, session: &mut Session) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if state.dialog_open() {
                ui.disable();
            }
            ui.horizontal(|ui| {
                if ui.button("← Back").clicked() {
                    state.current_screen = Screen::Welcome;
                }
            });
            ui.add_space(10.0);
            ui.heading("Edit Existing Preference Card");
            ui.add_space(10.0);

            let out_dir = session.config().out_dir.clone();
            let current = state.sheet_picker.workbook.clone();
            if let Some(path) = FilePicker::new("Workbook:", current.as_deref())
                .with_filter("Excel files", &["xlsx"])
                .starting_in(&out_dir)
                .show(ui)
            {
                Self::select_workbook(state, session, path);
            }
            ui.add_space(10.0);

            ui.columns(2, |columns| {
                columns[0].label(egui::RichText::new("Saved workbooks").strong());
                let mut chosen: Option<PathBuf> = None;
                egui::ScrollArea::vertical()
                    .id_salt("workbooks")
                    .max_height(300.0)
                    .show(&mut columns[0], |ui| {
                        if state.sheet_picker.workbooks.is_empty() {
                            ui.weak("No workbooks in the output directory.");
                        }
                        for path in &state.sheet_picker.workbooks {
                            let selected = state.sheet_picker.workbook.as_ref() == Some(path);
                            if ui.selectable_label(selected, file_name(path)).clicked() {
                                chosen = Some(path.clone());
                            }
                        }
                    });
                if let Some(path) = chosen {
                    Self::select_workbook(state, session, path);
                }

                columns[1].label(egui::RichText::new("Sheets").strong());
                egui::ScrollArea::vertical()
                    .id_salt("sheets")
                    .max_height(300.0)
                    .show(&mut columns[1], |ui| {
                        for sheet in &state.sheet_picker.sheets {
                            let selected = state.sheet_picker.sheet.as_ref() == Some(sheet);
                            if ui.selectable_label(selected, sheet.as_str()).clicked() {
                                state.sheet_picker.sheet = Some(sheet.clone());
                            }
                        }
                    });
            });

            ui.add_space(10.0);
            let ready = state.sheet_picker.workbook.is_some() && state.sheet_picker.sheet.is_some();
            if ui.add_enabled(ready, egui::Button::new("Open Card")).clicked() {
                Self::open(state, session);
            }
        });
    }

    fn select_workbook(state: &mut AppState, session: &Session, path: PathBuf) {
        match session.card_sheets(&path) {
            Ok(sheets) => {
                state.sheet_picker.sheets = sheets;
                state.sheet_picker.sheet = None;
                state.sheet_picker.workbook = Some(path);
            }
            Err(e) => state.show_error("Error", &e),
        }
    }

    fn open(state: &mut AppState, session: &mut Session) {
        let (Some(path), Some(sheet)) = (
            state.sheet_picker.workbook.clone(),
            state.sheet_picker.sheet.clone(),
        ) else {
            return;
        };
        match session.start_edit(&path, &sheet) {
            Ok(()) => WelcomeScreen::open_services(state, session),
            Err(e) => state.show_error("Error", &e),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
