use crate::session::Session;
use crate::ui::state::{AppState, Screen};
use eframe::egui;

pub struct WelcomeScreen;

impl WelcomeScreen {
    pub fn show(ui: &mut egui::Ui, state: &mut AppState, session: &mut Session) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);
            ui.heading("Preference Cards");
            ui.add_space(20.0);

            if ui.button("Create New Preference Card").clicked() {
                session.start_new_card();
                Self::open_services(state, session);
            }

            ui.add_space(10.0);

            if ui.button("Edit Existing Preference Card").clicked() {
                match session.card_workbooks() {
                    Ok(workbooks) => {
                        state.sheet_picker.reset(workbooks);
                        state.current_screen = Screen::SelectSheet;
                    }
                    Err(e) => state.show_error("Error", &e),
                }
            }

            ui.add_space(10.0);

            if ui.button("Exit").clicked() {
                state.exit_requested = true;
            }
        });
    }

    /// Moves on to service selection. A catalog that cannot be read is
    /// reported and the screen opens with no services.
    pub fn open_services(state: &mut AppState, session: &mut Session) {
        if let Err(e) = session.load_services() {
            state.show_error("Error", &e);
        }
        state.current_screen = Screen::SelectServices;
    }
}
