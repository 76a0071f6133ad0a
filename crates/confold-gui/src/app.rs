//! Main application structure for the CONFOLD window

use crate::async_bridge::{AsyncBridge, ProgressKind, ProgressUpdate};
use crate::processor::{self, StartError};
use crate::state::{AppState, SubmissionState};
use crate::ui_state::{LogLevel, Theme, UiState};
use crate::widgets;
use confold_core::{SubmitError, ValidationReport};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Main application struct implementing eframe::App
pub struct ConfoldApp {
    /// Domain state
    state: AppState,

    /// UI state
    ui_state: UiState,

    /// Async runtime bridge
    async_bridge: AsyncBridge,
}

impl ConfoldApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, async_bridge: AsyncBridge) -> Self {
        Self::with_state(AppState::new(), async_bridge)
    }

    pub fn with_state(state: AppState, async_bridge: AsyncBridge) -> Self {
        let mut ui_state = UiState::new();
        ui_state.theme = Theme::from_preference(state.config.ui.theme);
        ui_state.technical_log_expanded = state.config.ui.show_technical_log;

        let mut app = Self {
            state,
            ui_state,
            async_bridge,
        };

        app.ui_state.log(LogLevel::Info, "Application started");
        for warning in app.state.config_warnings.clone() {
            warn!("{warning}");
            app.ui_state.log(LogLevel::Warning, warning);
        }
        app.ui_state.log(
            LogLevel::Info,
            format!("Submitting to {}", app.state.config.submission.endpoint),
        );

        app
    }

    /// Apply theme to egui context
    fn apply_theme(&self, ctx: &egui::Context) {
        let visuals = match self.ui_state.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);
    }

    fn persist_ui_preferences(&mut self) {
        self.state.config.ui.theme = self.ui_state.theme.preference();
        self.state.config.ui.show_technical_log = self.ui_state.technical_log_expanded;
        if let Err(e) = self.state.save_ui_preferences() {
            self.ui_state.log(LogLevel::Error, format!("Failed to save preferences: {}", e));
        }
    }

    /// Handle progress updates from the submission task
    fn handle_progress_update(&mut self, update: ProgressUpdate) {
        match update.kind {
            ProgressKind::Started { job_id } => {
                self.ui_state.log(LogLevel::Info, format!("Started job: {}", job_id));
                self.state.submission = SubmissionState::Running {
                    job_id,
                    started: Instant::now(),
                    message: update.message,
                };
            }
            ProgressKind::Info { message } => {
                self.ui_state.log(LogLevel::Info, message.clone());
                if let SubmissionState::Running {
                    message: ref mut current,
                    ..
                } = self.state.submission
                {
                    *current = Some(message);
                }
            }
            ProgressKind::Warning { message } => {
                self.ui_state.log(LogLevel::Warning, message);
            }
            ProgressKind::Completed {
                status,
                final_url,
                body,
            } => {
                let success = (200..300).contains(&status);
                let summary = update
                    .message
                    .unwrap_or_else(|| format!("Server answered HTTP {status}"));
                self.ui_state.log(
                    if success { LogLevel::Info } else { LogLevel::Error },
                    format!("{summary}: {final_url}"),
                );
                self.ui_state.status_line = Some((
                    if success { LogLevel::Info } else { LogLevel::Error },
                    summary,
                ));
                self.state.submission = SubmissionState::Completed {
                    status,
                    final_url,
                    body,
                    elapsed_ms: update.elapsed_ms.unwrap_or_default(),
                };
                self.async_bridge.clear_progress_receiver();
            }
            ProgressKind::Failed { error } => {
                self.ui_state.log(LogLevel::Error, error.clone());
                self.ui_state.status_line = Some((LogLevel::Error, error.clone()));
                self.state.submission = SubmissionState::Error { message: error };
                self.async_bridge.clear_progress_receiver();
            }
        }
    }

    /// Check the form and post it in the background
    fn start_submission(&mut self) {
        let report = self.state.controller.validate();
        let result = processor::start_submission(
            &self.async_bridge,
            &self.state.config.submission,
            &self.state.controller.form,
            self.state.is_submitting(),
        );
        self.state.last_report = Some(report);

        match result {
            Ok(rx) => {
                self.async_bridge.register_progress_receiver(rx);
                self.ui_state.status_line = None;
                info!("Submission started from the window");
            }
            Err(StartError::Submit(SubmitError::Blocked(report))) => {
                self.show_blocked(&report);
            }
            Err(StartError::AlreadyRunning) => {
                self.ui_state.log(LogLevel::Warning, "A submission is already running");
            }
            Err(e) => {
                self.ui_state.log(LogLevel::Error, format!("Failed to submit: {}", e));
                self.state.submission = SubmissionState::Error {
                    message: format!("Failed to submit: {}", e),
                };
            }
        }
    }

    fn show_blocked(&mut self, report: &ValidationReport) {
        let missing = report.missing_fields();
        let message = if missing.is_empty() {
            report.to_string()
        } else {
            let labels: Vec<_> = missing.iter().map(|field| field.label()).collect();
            format!("Please fill in: {}", labels.join(", "))
        };
        self.ui_state.log(LogLevel::Warning, message.clone());
        self.ui_state.status_line = Some((LogLevel::Warning, message));
    }

    /// Render the top panel with title, help and theme toggle
    fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("CONFOLD");
                ui.label("Contact-guided ab initio protein folding");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.ui_state.theme {
                        Theme::Dark => "☀ Light",
                        Theme::Light => "🌙 Dark",
                    };
                    if ui.button(theme_label).clicked() {
                        self.ui_state.theme = self.ui_state.theme.toggled();
                        self.persist_ui_preferences();
                    }
                    if ui.button("About").clicked() {
                        self.ui_state.show_about = true;
                    }
                    if ui.button("Help").clicked() && self.ui_state.help_topic.is_none() {
                        self.ui_state.help_topic = Some("job");
                    }
                });
            });
        });
    }

    /// Render the main UI content
    fn render_main_ui(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                widgets::example_bar::render(ui, &mut self.state, &mut self.ui_state);
                ui.add_space(8.0);

                if widgets::form_sections::render(ui, &mut self.state, &mut self.ui_state) {
                    self.state.refresh_report();
                }

                ui.add_space(8.0);
                ui.separator();
                self.render_submit_section(ui);
                ui.separator();
                ui.add_space(8.0);

                if !matches!(self.state.submission, SubmissionState::Idle) {
                    ui.group(|ui| {
                        ui.set_min_width(ui.available_width());
                        widgets::progress_display::render(
                            ui,
                            &self.state.submission,
                            &mut self.ui_state,
                        );
                    });
                    ui.add_space(8.0);
                }

                let log_response = egui::CollapsingHeader::new("Technical Log")
                    .default_open(self.ui_state.technical_log_expanded)
                    .show(ui, |ui| {
                        widgets::technical_log::render(ui, &mut self.ui_state);
                    });
                if log_response.header_response.clicked() {
                    self.ui_state.technical_log_expanded = !self.ui_state.technical_log_expanded;
                    self.persist_ui_preferences();
                }
            });
    }

    /// Render submit button and status line
    fn render_submit_section(&mut self, ui: &mut egui::Ui) {
        if self.state.is_submitting() {
            ui.label(egui::RichText::new("⏳ Submitting...").size(18.0));
        } else {
            let button_size = egui::vec2(ui.available_width(), 50.0);
            let button = egui::Button::new(egui::RichText::new("▶ Run Job").size(22.0))
                .fill(egui::Color32::from_rgb(0, 150, 0))
                .min_size(button_size);

            if ui.add(button).clicked() {
                self.start_submission();
            }
        }

        if let Some((level, message)) = &self.ui_state.status_line {
            let color = match level {
                LogLevel::Info => egui::Color32::GREEN,
                LogLevel::Warning => egui::Color32::from_rgb(200, 140, 0),
                LogLevel::Error => egui::Color32::RED,
            };
            ui.colored_label(color, message);
        }
    }
}

impl eframe::App for ConfoldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);

        // Collect first; the handler needs &mut self
        let mut updates = Vec::new();
        self.async_bridge.poll_progress(|update| {
            updates.push(update);
        });
        for update in updates {
            self.handle_progress_update(update);
        }

        if self.state.is_submitting() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.render_top_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_main_ui(ui);
        });

        widgets::help_window::render(ctx, &mut self.ui_state);
    }
}
