use eframe::egui;

use crate::entries::{EntryForm, SelectableOption};

/// Search box plus one quantity/hold line per visible entry
pub struct EntryList<'a, K: SelectableOption> {
    pub id: &'a str,
    pub form: &'a mut EntryForm<K>,
}

impl<'a, K: SelectableOption> EntryList<'a, K> {
    pub fn new(id: &'a str, form: &'a mut EntryForm<K>) -> Self {
        Self { id, form }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let Self { id, form } = self;

        ui.horizontal(|ui| {
            ui.label("Search:");
            let mut search = form.filter().to_string();
            let response = ui.add(
                egui::TextEdit::singleline(&mut search)
                    .desired_width(300.0)
                    .hint_text("Type to filter..."),
            );
            if response.changed() {
                form.set_filter(&search);
            }
            if ui.button("Clear").clicked() {
                form.set_filter("");
            }
        });
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([70.0, 18.0], egui::Label::new(egui::RichText::new("Quantity").strong()));
            ui.add_sized([40.0, 18.0], egui::Label::new(egui::RichText::new("Hold").strong()));
            ui.label(egui::RichText::new("Item").strong());
        });
        ui.separator();

        let visible: Vec<usize> = form.visible_entries().map(|(idx, _)| idx).collect();
        if visible.is_empty() {
            ui.weak("Nothing matches the search.");
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt(id)
            .max_height(ui.available_height() - 40.0)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for idx in visible {
                    let entry = &form.entries()[idx];
                    let mut quantity = entry.state.quantity.clone();
                    let mut hold = entry.state.hold;
                    let label = entry.label.clone();

                    ui.horizontal(|ui| {
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut quantity)
                                .id_salt((id, idx))
                                .desired_width(60.0),
                        );
                        if response.changed() {
                            // non-digit edits are refused and the old text comes back next frame
                            form.set_quantity_at(idx, &quantity);
                        }
                        ui.add_space(10.0);
                        if ui.checkbox(&mut hold, "").changed() {
                            form.set_hold_at(idx, hold);
                        }
                        ui.add_space(15.0);
                        ui.label(label);
                    });
                }
            });
    }
}
