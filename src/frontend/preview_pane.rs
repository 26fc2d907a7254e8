//! The preview pane: paints the last committed run.
//!
//! Rendering happens at most once per committed generation; the resulting
//! tree (or the error it threw) is cached and repainted every frame. A
//! component that throws therefore shows its runtime-error panel without
//! being re-invoked, and the rest of the application keeps running.

use crate::preview::sandbox::{LogLevel, LogLine};
use crate::preview::{Diagnostic, RunOutcome, RunReport, ViewNode};
use egui::{Color32, RichText, Ui};

#[derive(Default)]
pub struct PreviewPane {
    /// Render result for the committed generation
    cache: Option<(u64, Result<ViewNode, Diagnostic>)>,
}

impl PreviewPane {
    /// Drop the cached render (exercise switch)
    pub fn clear(&mut self) {
        self.cache = None;
    }

    pub fn show(&mut self, ui: &mut Ui, report: Option<&RunReport>, always_show_logs: bool) {
        let Some(report) = report else {
            ui.weak("Waiting for the first run…");
            return;
        };

        match &report.outcome {
            RunOutcome::Renderable(unit) => {
                let cached = matches!(&self.cache, Some((g, _)) if *g == report.generation);
                if !cached {
                    let result = unit.render().map_err(|err| Diagnostic::runtime(err.0));
                    self.cache = Some((report.generation, result));
                }
                if let Some((_, result)) = &self.cache {
                    match result {
                        Ok(node) => paint_node(ui, node),
                        Err(diag) => error_panel(ui, diag),
                    }
                }
                if always_show_logs {
                    ui.separator();
                    log_panel(ui, &report.logs);
                }
            }
            RunOutcome::LogOnly => log_panel(ui, &report.logs),
            RunOutcome::Failed(diag) => {
                error_panel(ui, diag);
                if always_show_logs {
                    ui.separator();
                    log_panel(ui, &report.logs);
                }
            }
        }
    }
}

fn error_panel(ui: &mut Ui, diag: &Diagnostic) {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, Color32::from_rgb(200, 60, 60)))
        .show(ui, |ui| {
            ui.label(
                RichText::new(diag.kind.label())
                    .color(Color32::from_rgb(220, 90, 90))
                    .strong(),
            );
            ui.monospace(&diag.message);
        });
}

fn log_panel(ui: &mut Ui, lines: &[LogLine]) {
    if lines.is_empty() {
        ui.weak("(no console output)");
        return;
    }
    for line in lines {
        let color = match line.level {
            LogLevel::Log => ui.visuals().text_color(),
            LogLevel::Warn => Color32::from_rgb(210, 170, 60),
            LogLevel::Error => Color32::from_rgb(220, 90, 90),
        };
        ui.label(
            RichText::new(format!("[{}] {}", line.level.label(), line.text))
                .monospace()
                .color(color),
        );
    }
}

/// Paint a view tree with egui widgets.
///
/// Tags map onto the nearest egui equivalent; unknown tags paint their
/// children vertically so nothing silently disappears.
pub fn paint_node(ui: &mut Ui, node: &ViewNode) {
    match node {
        ViewNode::Empty => {}
        ViewNode::Text(text) => {
            ui.label(text);
        }
        ViewNode::Fragment(children) => {
            for child in children {
                paint_node(ui, child);
            }
        }
        ViewNode::Element { tag, children, .. } => match tag.as_str() {
            "h1" => {
                ui.label(RichText::new(node.text_content()).heading());
            }
            "h2" => {
                ui.label(RichText::new(node.text_content()).size(20.0).strong());
            }
            "h3" => {
                ui.label(RichText::new(node.text_content()).size(16.0).strong());
            }
            "p" | "span" | "label" => {
                // Inline-ish content flows horizontally
                ui.horizontal_wrapped(|ui| {
                    for child in children {
                        paint_node(ui, child);
                    }
                });
            }
            "button" => {
                let _ = ui.button(node.text_content());
            }
            "input" | "textarea" => {
                let mut text = node
                    .prop("value")
                    .or_else(|| node.prop("placeholder"))
                    .unwrap_or_default()
                    .to_string();
                ui.add_enabled(false, egui::TextEdit::singleline(&mut text));
            }
            "ul" | "ol" => {
                for child in children {
                    paint_list_item(ui, child);
                }
            }
            "li" => paint_list_item(ui, node),
            "hr" => {
                ui.separator();
            }
            "br" => {
                ui.add_space(8.0);
            }
            "div" | "section" | "form" => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    for child in children {
                        paint_node(ui, child);
                    }
                });
            }
            _ => {
                for child in children {
                    paint_node(ui, child);
                }
            }
        },
    }
}

fn paint_list_item(ui: &mut Ui, node: &ViewNode) {
    match node {
        ViewNode::Element { tag, children, .. } if tag == "li" => {
            ui.horizontal_wrapped(|ui| {
                ui.label("•");
                for child in children {
                    paint_node(ui, child);
                }
            });
        }
        // A fragment of items (an interpolated list) flattens in place
        ViewNode::Fragment(children) => {
            for child in children {
                paint_list_item(ui, child);
            }
        }
        other => paint_node(ui, other),
    }
}
