//! Example links and form reset

use crate::state::AppState;
use crate::ui_state::{LogLevel, UiState};
use confold_core::ExamplePreset;

/// Render the example/reset bar
/// Returns true if the form was replaced
pub fn render(ui: &mut egui::Ui, state: &mut AppState, ui_state: &mut UiState) -> bool {
    let mut changed = false;

    ui.horizontal_wrapped(|ui| {
        ui.label("Examples:")
            .on_hover_text("Fill every field with a ready-made job; add your e-mail before submitting");

        for preset in ExamplePreset::ALL {
            if ui.link(preset.name()).on_hover_text(preset.description()).clicked() {
                state.controller.fill_example(preset);
                state.last_report = None;
                ui_state.log(LogLevel::Info, format!("Filled form with {}", preset.name()));
                changed = true;
            }
        }

        ui.separator();

        if ui
            .button("Reset")
            .on_hover_text("Restore default values and collapse the advanced options")
            .clicked()
        {
            state.controller.clear_form();
            state.last_report = None;
            ui_state.log(LogLevel::Info, "Form reset");
            changed = true;
        }
    });

    changed
}
