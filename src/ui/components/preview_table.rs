use eframe::egui::{self, RichText};

use crate::table::Table;

/// Read-only grid of a table's header and rows
pub fn show_preview_table(ui: &mut egui::Ui, id: &str, table: &Table) {
    if table.headers.is_empty() {
        ui.weak("(empty file)");
        return;
    }
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size;

    ui.push_id(id, |ui| {
        egui_extras::TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(240.0)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(
                egui_extras::Column::auto().at_least(60.0).clip(true),
                table.headers.len(),
            )
            .header(22.0, |mut header| {
                for name in &table.headers {
                    header.col(|ui| {
                        ui.label(RichText::new(name).strong());
                    });
                }
            })
            .body(|body| {
                body.rows(text_height + 6.0, table.len(), |mut row| {
                    let idx = row.index();
                    for col in 0..table.headers.len() {
                        row.col(|ui| {
                            ui.label(table.cell(idx, col).display());
                        });
                    }
                });
            });
    });
}
