use crate::{
    models::CatalogKind,
    session::Session,
    settings::Settings,
    ui::{
        components::{show_preview_table, FilePicker},
        state::{AppState, Screen},
    },
};
use eframe::egui;
use log::{info, warn};

pub struct ConfirmFilesScreen;

impl ConfirmFilesScreen {
    pub fn show(
        ctx: &egui::Context,
        state: &mut AppState,
        session: &mut Session,
        settings: &mut Settings,
    ) {
        egui::TopBottomPanel::bottom("confirm_files_actions").show(ctx, |ui| {
            if state.dialog_open() {
                ui.disable();
            }
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.button("Confirm Files").clicked() {
                    Self::confirm(state, session, settings);
                }
                if ui.button("Exit").clicked() {
                    state.exit_requested = true;
                }
            });
            ui.add_space(5.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if state.dialog_open() {
                ui.disable();
            }
            ui.heading("Confirm Reference Files");
            ui.label(format!(
                "Catalogs found in {}",
                session.config().in_dir.display()
            ));
            ui.add_space(10.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                for kind in [CatalogKind::Container, CatalogKind::SoftGoods] {
                    Self::show_file(ui, state, session, kind);
                    ui.add_space(15.0);
                }
            });
        });
    }

    fn show_file(ui: &mut egui::Ui, state: &mut AppState, session: &mut Session, kind: CatalogKind) {
        ui.group(|ui| {
            let label = match kind {
                CatalogKind::Container => "Container file:",
                CatalogKind::SoftGoods => "Soft goods file:",
            };
            let in_dir = session.config().in_dir.clone();
            let current = session.files().get(kind).map(|p| p.to_path_buf());
            let picked = FilePicker::new(label, current.as_deref())
                .starting_in(&in_dir)
                .show(ui);

            if let Some(path) = picked {
                if let Err(e) = session.replace_file(kind, &path) {
                    state.show_error("Invalid File", &e);
                }
            }

            match session.preview(kind) {
                Some(Ok(table)) => show_preview_table(ui, kind.as_str(), &table),
                Some(Err(e)) => {
                    ui.colored_label(egui::Color32::RED, e.to_string());
                }
                None => {
                    ui.weak(format!("Use Browse to choose the {}.", kind.as_str()));
                }
            }
        });
    }

    fn confirm(state: &mut AppState, session: &mut Session, settings: &mut Settings) {
        match session.confirm_files() {
            Ok((container, soft_goods)) => {
                info!(
                    "Confirmed catalogs {} and {}",
                    container.display(),
                    soft_goods.display()
                );
                settings.remember(&container, &soft_goods);
                if let Err(e) = settings.save() {
                    warn!("Failed to save settings: {}", e);
                }
                state.current_screen = Screen::Welcome;
            }
            Err(e) => state.show_error("Missing File", &e),
        }
    }
}
