use eframe::egui;

use crate::export::ExportPrompt;
use crate::ui::state::Dialog;

/// What the user did with the open dialog this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResponse {
    Dismissed,
    Text(Option<String>),
    Confirm(bool),
}

fn modal(ctx: &egui::Context, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Window::new(title)
        .id(egui::Id::new("preference_card_dialog"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(320.0);
            add_contents(ui);
        });
}

fn yes_no(ui: &mut egui::Ui) -> Option<DialogResponse> {
    let mut response = None;
    ui.horizontal(|ui| {
        if ui.button("Yes").clicked() {
            response = Some(DialogResponse::Confirm(true));
        }
        if ui.button("No").clicked() {
            response = Some(DialogResponse::Confirm(false));
        }
    });
    response
}

/// Draws `dialog`. `input` backs the text field of text prompts. Save As
/// prompts are handled by the native file dialog, not here.
pub fn show_dialog(ctx: &egui::Context, dialog: &Dialog, input: &mut String) -> Option<DialogResponse> {
    let mut response = None;
    match dialog {
        Dialog::Error { title, message } => {
            modal(ctx, title, |ui| {
                ui.label(message.as_str());
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    response = Some(DialogResponse::Dismissed);
                }
            });
        }
        Dialog::Restart { message } => {
            modal(ctx, "Export Successful", |ui| {
                ui.label(message.as_str());
                ui.add_space(5.0);
                ui.label("Do you want to start another preference card?");
                ui.add_space(10.0);
                response = yes_no(ui);
            });
        }
        Dialog::Export(prompt @ (ExportPrompt::DoctorName | ExportPrompt::SurgeryName)) => {
            modal(ctx, prompt.title(), |ui| {
                ui.label(prompt.message());
                let field = ui.add(egui::TextEdit::singleline(input).desired_width(300.0));
                let entered = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || entered {
                        response = Some(DialogResponse::Text(Some(input.clone())));
                    }
                    if ui.button("Cancel").clicked() {
                        response = Some(DialogResponse::Text(None));
                    }
                });
            });
        }
        Dialog::Export(prompt @ (ExportPrompt::ConfirmAppend { .. } | ExportPrompt::ConfirmCreate { .. })) => {
            modal(ctx, prompt.title(), |ui| {
                ui.label(prompt.message());
                ui.add_space(10.0);
                response = yes_no(ui);
            });
        }
        Dialog::Export(ExportPrompt::SaveAs { .. }) => {}
    }
    response
}
