use crate::session::Session;
use crate::ui::state::{AppState, Screen};
use eframe::egui;

pub struct ServicesScreen;

impl ServicesScreen {
    pub fn show(ctx: &egui::Context, state: &mut AppState, session: &mut Session) {
        egui::TopBottomPanel::bottom("services_actions").show(ctx, |ui| {
            if state.dialog_open() {
                ui.disable();
            }
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.button("← Back").clicked() {
                    state.current_screen = Screen::Welcome;
                }
                if ui.button("Next").clicked() {
                    match session.select_services() {
                        Ok(()) => state.current_screen = Screen::SelectContainers,
                        Err(e) => state.show_error("No Selection", &e),
                    }
                }
            });
            ui.add_space(5.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if state.dialog_open() {
                ui.disable();
            }
            ui.heading("Select Service");
            if let Some((path, sheet)) = session.editing() {
                ui.label(format!("Editing '{}' from {}", sheet, path.display()));
            }
            ui.add_space(10.0);

            let selector = session.selector_mut();
            if selector.services().is_empty() {
                ui.weak("No services available.");
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                for idx in 0..selector.services().len() {
                    let mut checked = selector.is_selected(idx);
                    let name = selector.services()[idx].clone();
                    if ui.checkbox(&mut checked, name).changed() {
                        selector.toggle(idx);
                    }
                }
            });
        });
    }
}
