use eframe::{self, egui};
use egui::ViewportBuilder;
use log::info;

use super::{
    components::{show_dialog, DialogResponse},
    screens::{
        ConfirmFilesScreen, ContainersScreen, ServicesScreen, SheetPickerScreen, WelcomeScreen,
    },
    state::{AppState, Dialog, Screen},
};
use crate::{
    config::AppConfig,
    export::{ExportAnswer, ExportPrompt, ExportStep},
    io::XlsxStore,
    session::Session,
    settings::Settings,
    utils::now_local,
};

pub struct PreferenceCardApp {
    app_state: AppState,
    session: Session,
    settings: Settings,
}

impl PreferenceCardApp {
    pub fn new(config: AppConfig) -> Self {
        let settings = Settings::load();
        let mut session = Session::new(config, Box::new(XlsxStore::new()));
        let mut app_state = AppState::default();
        if let Err(e) = session.discover(&settings) {
            app_state.show_error("Error", &e);
        }
        Self {
            app_state,
            session,
            settings,
        }
    }

    fn handle_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.app_state.dialog.clone() else {
            return;
        };

        if let Dialog::Export(prompt @ ExportPrompt::SaveAs { suggested }) = &dialog {
            let path = rfd::FileDialog::new()
                .set_title(prompt.title())
                .set_directory(&self.session.config().out_dir)
                .set_file_name(suggested.as_str())
                .add_filter("Excel files", &["xlsx"])
                .save_file();
            self.answer_export(ExportAnswer::Path(path));
            return;
        }

        let Some(response) = show_dialog(ctx, &dialog, &mut self.app_state.prompt_input) else {
            return;
        };
        match (dialog, response) {
            (Dialog::Export(_), DialogResponse::Text(text)) => {
                self.answer_export(ExportAnswer::Text(text))
            }
            (Dialog::Export(_), DialogResponse::Confirm(yes)) => {
                self.answer_export(ExportAnswer::Confirm(yes))
            }
            (Dialog::Restart { .. }, DialogResponse::Confirm(true)) => {
                self.session.initialize();
                self.app_state.dialog = None;
                self.app_state.show_soft_goods = false;
                self.app_state.current_screen = Screen::Welcome;
            }
            (Dialog::Restart { .. }, DialogResponse::Confirm(false)) => {
                self.app_state.dialog = None;
                self.app_state.exit_requested = true;
            }
            _ => self.app_state.dialog = None,
        }
    }

    fn answer_export(&mut self, answer: ExportAnswer) {
        match self.session.answer_export(answer, now_local()) {
            Ok(ExportStep::Prompt(prompt)) => self.app_state.ask(prompt),
            Ok(ExportStep::Done(outcome)) => {
                self.app_state.dialog = Some(Dialog::Restart {
                    message: format!(
                        "Saved {} rows to sheet '{}' in {}",
                        outcome.rows,
                        outcome.sheet_name,
                        outcome.path.display()
                    ),
                });
            }
            Ok(ExportStep::Cancelled) => self.app_state.dialog = None,
            Err(e) => self.app_state.show_error("Error", &e),
        }
    }
}

impl eframe::App for PreferenceCardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.app_state.current_screen {
            Screen::ConfirmFiles => {
                ConfirmFilesScreen::show(
                    ctx,
                    &mut self.app_state,
                    &mut self.session,
                    &mut self.settings,
                );
            }
            Screen::Welcome => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    if self.app_state.dialog_open() {
                        ui.disable();
                    }
                    WelcomeScreen::show(ui, &mut self.app_state, &mut self.session);
                });
            }
            Screen::SelectSheet => {
                SheetPickerScreen::show(ctx, &mut self.app_state, &mut self.session);
            }
            Screen::SelectServices => {
                ServicesScreen::show(ctx, &mut self.app_state, &mut self.session);
            }
            Screen::SelectContainers => {
                ContainersScreen::show(ctx, &mut self.app_state, &mut self.session);
            }
        }

        self.handle_dialog(ctx);

        if self.app_state.exit_requested {
            info!("Exiting");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

pub fn launch_gui(config: AppConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([900.0, 650.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Preference Cards",
        options,
        Box::new(move |_cc| Ok(Box::new(PreferenceCardApp::new(config)))),
    )
}
