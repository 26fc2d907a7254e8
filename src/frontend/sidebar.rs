//! The catalog sidebar.

use crate::catalog::{Catalog, Category, Exercise, SANDBOX};
use egui::Ui;

/// Draw the exercise list; returns a newly clicked exercise, if any
pub fn show(ui: &mut Ui, active_id: &str) -> Option<&'static Exercise> {
    let mut selected = None;

    if ui
        .selectable_label(active_id == SANDBOX.id, SANDBOX.title)
        .on_hover_text(SANDBOX.description)
        .clicked()
    {
        selected = Some(&SANDBOX);
    }
    ui.separator();

    for category in Category::all() {
        egui::CollapsingHeader::new(category.label())
            .default_open(*category == Category::Core)
            .show(ui, |ui| {
                for exercise in Catalog::in_category(*category) {
                    let label = format!("{}  ({})", exercise.title, exercise.difficulty.label());
                    if ui
                        .selectable_label(active_id == exercise.id, label)
                        .on_hover_text(exercise.description)
                        .clicked()
                    {
                        selected = Some(exercise);
                    }
                }
            });
    }

    selected
}
