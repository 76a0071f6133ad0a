//! Submission progress and server response

use crate::dialogs;
use crate::state::SubmissionState;
use crate::ui_state::{LogLevel, UiState};
use confold_core::TOOL_INFO;
use std::fs;

/// Render progress display
pub fn render(ui: &mut egui::Ui, state: &SubmissionState, ui_state: &mut UiState) {
    match state {
        SubmissionState::Running {
            job_id,
            started,
            message,
        } => {
            ui.vertical(|ui| {
                ui.heading("Submitting...");
                if let Some(message) = message {
                    ui.label(message);
                }
                ui.label(format!("Elapsed: {:.1}s", started.elapsed().as_secs_f32()));

                // Indeterminate progress bar
                ui.add(egui::ProgressBar::new(f32::NAN));

                ui.label(format!("Job: {}", job_id));
            });
        }
        SubmissionState::Completed {
            status,
            final_url,
            body,
            elapsed_ms,
        } => {
            ui.vertical(|ui| {
                if (200..300).contains(status) {
                    ui.colored_label(egui::Color32::GREEN, format!("✓ Job submitted (HTTP {status})"));
                    ui.label("Check your e-mail and the job history log to confirm the job was queued.");
                } else {
                    ui.colored_label(egui::Color32::RED, format!("✗ Server answered HTTP {status}"));
                }
                ui.label(format!("Finished in {:.1}s", *elapsed_ms as f64 / 1000.0));

                ui.horizontal(|ui| {
                    if ui.button("Open response page").on_hover_text(final_url).clicked() {
                        open_url(final_url, ui_state);
                    }
                    if ui.button("Job history log").clicked() {
                        open_url(TOOL_INFO.history_log_url, ui_state);
                    }
                    if ui.button("Save response...").clicked() {
                        save_response(body, ui_state);
                    }
                });

                let response = egui::CollapsingHeader::new("Server Response")
                    .default_open(ui_state.response_expanded)
                    .show(ui, |ui| {
                        egui::ScrollArea::vertical()
                            .max_height(240.0)
                            .show(ui, |ui| {
                                ui.label(egui::RichText::new(body.as_str()).monospace());
                            });
                    });
                if response.header_response.clicked() {
                    ui_state.response_expanded = !ui_state.response_expanded;
                }
            });
        }
        SubmissionState::Error { message } => {
            ui.vertical(|ui| {
                ui.colored_label(egui::Color32::RED, "✗ Submission Failed");
                ui.label(message);
            });
        }
        SubmissionState::Idle => {
            // Nothing to show
        }
    }
}

fn open_url(url: &str, ui_state: &mut UiState) {
    if let Err(e) = open::that(url) {
        ui_state.log(LogLevel::Error, format!("Failed to open {}: {}", url, e));
    }
}

fn save_response(body: &str, ui_state: &mut UiState) {
    let Some(path) = dialogs::save_response_file() else {
        return;
    };
    match fs::write(&path, body) {
        Ok(()) => ui_state.log(LogLevel::Info, format!("Saved response to {}", path.display())),
        Err(e) => ui_state.log(
            LogLevel::Error,
            format!("Failed to write {}: {}", path.display(), e),
        ),
    }
}
