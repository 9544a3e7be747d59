use crate::{
    session::Session,
    ui::{
        components::EntryList,
        state::{AppState, Screen},
    },
};
use eframe::egui;

pub struct ContainersScreen;

impl ContainersScreen {
    pub fn show(ctx: &egui::Context, state: &mut AppState, session: &mut Session) {
        egui::TopBottomPanel::bottom("containers_actions").show(ctx, |ui| {
            if state.dialog_open() {
                ui.disable();
            }
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.button("← Back").clicked() {
                    state.show_soft_goods = false;
                    state.current_screen = Screen::SelectServices;
                }
                if ui.button("Soft Goods").clicked() {
                    match session.open_soft_goods() {
                        Ok(()) => state.show_soft_goods = true,
                        Err(e) => state.show_error("Error", &e),
                    }
                }
                if ui.button("Save").clicked() {
                    match session.begin_export() {
                        Ok(prompt) => state.ask(prompt),
                        Err(e) => state.show_error("Error", &e),
                    }
                }
            });
            ui.add_space(5.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if state.dialog_open() {
                ui.disable();
            }
            ui.heading("Select Containers");
            ui.label(format!("Services: {}", session.selected_services().join(", ")));
            ui.add_space(10.0);
            EntryList::new("containers", session.containers_mut()).show(ui);
        });

        if state.show_soft_goods {
            Self::show_soft_goods(ctx, state, session);
        }
    }

    fn show_soft_goods(ctx: &egui::Context, state: &mut AppState, session: &mut Session) {
        let mut open = true;
        egui::Window::new("Select Soft Goods")
            .open(&mut open)
            .default_size([700.0, 500.0])
            .show(ctx, |ui| {
                if state.dialog_open() {
                    ui.disable();
                }
                ui.horizontal(|ui| {
                    if ui.button("Done").clicked() {
                        session.commit_soft_goods();
                        state.show_soft_goods = false;
                    }
                    if ui.button("Cancel").clicked() {
                        session.cancel_soft_goods();
                        state.show_soft_goods = false;
                    }
                });
                ui.add_space(5.0);
                EntryList::new("soft_goods", session.soft_goods_mut()).show(ui);
            });
        if !open {
            session.cancel_soft_goods();
            state.show_soft_goods = false;
        }
    }
}
