//! The eframe/egui application shell.
//!
//! Three panels: catalog sidebar on the left, editor in the center,
//! preview on the right. The shell owns the pipeline and the persisted
//! state; each frame it forwards edits, ticks the pipeline, and schedules
//! a repaint for the debounce deadline so due runs fire without user
//! input.

pub mod editor;
pub mod preview_pane;
pub mod sidebar;

use crate::catalog::{Catalog, Exercise, SANDBOX};
use crate::config::AppState;
use crate::preview::PreviewPipeline;
use egui::RichText;
use preview_pane::PreviewPane;
use std::time::Instant;

pub struct KataApp {
    state: AppState,
    active: &'static Exercise,
    source: String,
    pipeline: PreviewPipeline,
    preview: PreviewPane,
}

impl KataApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::load_or_default();

        if state.ui.dark_mode {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
        } else {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
        }

        let active = state
            .active_exercise
            .as_deref()
            .and_then(Catalog::get)
            .unwrap_or(&SANDBOX);
        let source = state
            .source_for(active.id)
            .map(str::to_string)
            .unwrap_or_else(|| active.starter_or_template());

        let mut pipeline = PreviewPipeline::new(state.preview.debounce());
        // Kick off the first run for the restored source
        pipeline.notify_change(&source);

        tracing::info!(exercise = active.id, "frontend initialized");
        Self {
            state,
            active,
            source,
            pipeline,
            preview: PreviewPane::default(),
        }
    }

    fn switch_exercise(&mut self, exercise: &'static Exercise) {
        if exercise.id == self.active.id {
            return;
        }
        tracing::debug!(from = self.active.id, to = exercise.id, "switching exercise");
        self.state.remember_source(self.active.id, &self.source);
        self.state.active_exercise = Some(exercise.id.to_string());
        self.active = exercise;
        self.source = self
            .state
            .source_for(exercise.id)
            .map(str::to_string)
            .unwrap_or_else(|| exercise.starter_or_template());
        self.pipeline.reset();
        self.preview.clear();
        self.pipeline.notify_change(&self.source);
    }

    fn reset_to_starter(&mut self) {
        self.source = self.active.starter_or_template();
        self.state.edited_sources.remove(self.active.id);
        self.pipeline.reset();
        self.preview.clear();
        self.pipeline.notify_change(&self.source);
    }
}

impl eframe::App for KataApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pipeline.tick();
        if let Some(deadline) = self.pipeline.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }

        let mut selected: Option<&'static Exercise> = None;
        egui::SidePanel::left("catalog")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("UI Kata");
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    selected = sidebar::show(ui, self.active.id);
                });
            });

        egui::SidePanel::right("preview")
            .resizable(true)
            .default_width(460.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Preview");
                    if self.pipeline.is_pending() {
                        ui.spinner();
                    }
                });
                ui.separator();
                let show_logs =
                    self.active.always_show_logs || self.state.preview.always_show_log_panel;
                let report = self.pipeline.committed();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.preview.show(ui, report, show_logs);
                });
            });

        let mut changed = false;
        let mut reset = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.active.title);
                ui.label(RichText::new(self.active.difficulty.label()).weak());
                if ui.button("Reset to starter").clicked() {
                    reset = true;
                }
            });
            ui.label(RichText::new(self.active.description).weak());
            ui.separator();
            changed = editor::show(ui, &mut self.source);
        });

        if reset {
            self.reset_to_starter();
        } else if changed {
            self.pipeline.notify_change(&self.source);
        }

        if let Some(exercise) = selected {
            self.switch_exercise(exercise);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.remember_source(self.active.id, &self.source);
        self.state.active_exercise = Some(self.active.id.to_string());
        if let Err(e) = self.state.save() {
            tracing::warn!("failed to save app state: {e}");
        }
    }
}
