//! Parameter help and tool information windows

use crate::ui_state::UiState;
use confold_core::{HELP_TOPICS, TOOL_INFO, find_topic};

/// Render whichever info windows are open
pub fn render(ctx: &egui::Context, ui_state: &mut UiState) {
    render_help(ctx, ui_state);
    render_about(ctx, ui_state);
}

fn render_help(ctx: &egui::Context, ui_state: &mut UiState) {
    let Some(key) = ui_state.help_topic else {
        return;
    };
    let Some(topic) = find_topic(key) else {
        ui_state.help_topic = None;
        return;
    };

    let mut open = true;
    let mut selected = key;
    egui::Window::new("Help")
        .open(&mut open)
        .default_width(560.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                for candidate in HELP_TOPICS {
                    if ui
                        .selectable_label(candidate.key == topic.key, candidate.title)
                        .on_hover_text(candidate.section)
                        .clicked()
                    {
                        selected = candidate.key;
                    }
                }
            });
            ui.separator();

            ui.label(egui::RichText::new(topic.section).weak());
            ui.heading(topic.title);
            for line in topic.lines {
                ui.label(*line);
            }

            if let Some(field) = topic.field {
                let options = field.options();
                if !options.is_empty() {
                    ui.add_space(6.0);
                    egui::Grid::new("help_options").striped(true).show(ui, |ui| {
                        ui.label(egui::RichText::new("Value").strong());
                        ui.label(egui::RichText::new("Meaning").strong());
                        ui.end_row();
                        for (value, label) in options {
                            ui.monospace(value);
                            ui.label(label);
                            ui.end_row();
                        }
                    });
                }
            }
        });

    ui_state.help_topic = if open { Some(selected) } else { None };
}

fn render_about(ctx: &egui::Context, ui_state: &mut UiState) {
    if !ui_state.show_about {
        return;
    }

    let mut open = true;
    egui::Window::new("About CONFOLD")
        .open(&mut open)
        .default_width(480.0)
        .show(ctx, |ui| {
            ui.hyperlink_to("Download CONFOLD", TOOL_INFO.download_url);
            ui.add_space(6.0);
            ui.label(TOOL_INFO.assessment_tip);
            ui.hyperlink(TOOL_INFO.assessment_url);
            ui.add_space(6.0);
            ui.hyperlink_to("Execution time chart", TOOL_INFO.execution_time_chart_url);
            ui.hyperlink_to("Job history log", TOOL_INFO.history_log_url);
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(format!("confold {}", env!("CARGO_PKG_VERSION"))).weak(),
            );
        });

    ui_state.show_about = open;
}
