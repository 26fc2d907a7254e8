//! The source editor pane.
//!
//! A plain monospace multiline editor; syntax coloring and richer editing
//! are out of scope, the pipeline only needs the raw text and a change
//! signal.

use egui::Ui;

/// Draw the editor; returns whether the text changed this frame
pub fn show(ui: &mut Ui, source: &mut String) -> bool {
    let mut changed = false;
    egui::ScrollArea::vertical()
        .id_salt("editor")
        .show(ui, |ui| {
            let response = ui.add_sized(
                ui.available_size(),
                egui::TextEdit::multiline(source)
                    .code_editor()
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY),
            );
            changed = response.changed();
        });
    changed
}
