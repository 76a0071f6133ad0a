//! Job submission form, one group per section

use crate::dialogs;
use crate::state::AppState;
use crate::ui_state::{LogLevel, UiState};
use confold_core::help::topic_for_field;
use confold_core::{FieldId, FieldKind, FieldView, SectionView, Severity};

/// Render every section of the form
/// Returns true if any value was changed
pub fn render(ui: &mut egui::Ui, state: &mut AppState, ui_state: &mut UiState) -> bool {
    let view = state.controller.render();
    let mut changed = false;

    for section in &view.sections {
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            changed |= render_section(ui, section, state, ui_state);
        });
        ui.add_space(8.0);
    }

    changed
}

fn render_section(
    ui: &mut egui::Ui,
    section: &SectionView,
    state: &mut AppState,
    ui_state: &mut UiState,
) -> bool {
    let mut changed = false;
    ui.heading(section.title);

    for field in section.fields.iter().filter(|field| field.visible) {
        ui.add_space(4.0);
        changed |= render_field(ui, field, state, ui_state);
    }

    if let Some(toggle) = &section.toggle {
        ui.add_space(4.0);
        let marker = if toggle.expanded { "▾" } else { "▸" };
        let verb = if toggle.expanded { "Hide" } else { "Show" };
        if ui
            .link(format!("{marker} {verb} {}", toggle.label))
            .on_hover_text("Hidden options are still submitted with their current values")
            .clicked()
        {
            state.controller.toggle_group(toggle.group);
        }
    }

    changed
}

fn render_field(
    ui: &mut egui::Ui,
    field: &FieldView,
    state: &mut AppState,
    ui_state: &mut UiState,
) -> bool {
    let mut changed = false;

    ui.horizontal(|ui| {
        let caption = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.to_string()
        };
        let response = ui.label(egui::RichText::new(caption).strong());
        if let Some(tooltip) = &field.tooltip {
            response.on_hover_text(tooltip);
        }

        if let Some(topic) = topic_for_field(field.id) {
            if ui.small_button("?").on_hover_text("Show help").clicked() {
                ui_state.help_topic = Some(topic.key);
            }
        }

        if field.kind == FieldKind::MultiLine
            && ui
                .small_button("Load file...")
                .on_hover_text("Replace the text with the contents of a file")
                .clicked()
        {
            changed |= load_from_file(field, state, ui_state);
        }
    });

    match field.kind {
        FieldKind::SingleLine => {
            if let Some(text) = state.controller.form.text_mut(field.id) {
                let edit = egui::TextEdit::singleline(text)
                    .id_salt(field.name)
                    .desired_width(360.0);
                changed |= ui.add(edit).changed();
            }
        }
        FieldKind::MultiLine => {
            if let Some(text) = state.controller.form.text_mut(field.id) {
                let edit = egui::TextEdit::multiline(text)
                    .id_salt(field.name)
                    .code_editor()
                    .desired_rows(rows_for(field.id))
                    .desired_width(f32::INFINITY);
                changed |= ui.add(edit).changed();
            }
        }
        FieldKind::Select => {
            changed |= render_select(ui, field, state, ui_state);
        }
    }

    for issue in state.issues_for(field.id) {
        let color = match issue.severity {
            Severity::Error => egui::Color32::RED,
            Severity::Warning => egui::Color32::from_rgb(200, 140, 0),
        };
        ui.colored_label(color, &issue.message);
    }

    changed
}

fn render_select(
    ui: &mut egui::Ui,
    field: &FieldView,
    state: &mut AppState,
    ui_state: &mut UiState,
) -> bool {
    let selected_text = field
        .options
        .iter()
        .find(|(value, _)| *value == field.value)
        .map(|(_, label)| *label)
        .unwrap_or(field.value.as_str());

    let mut picked = None;
    egui::ComboBox::from_id_salt(field.name)
        .selected_text(selected_text)
        .width(360.0)
        .show_ui(ui, |ui| {
            for (value, label) in &field.options {
                if ui.selectable_label(*value == field.value, *label).clicked() {
                    picked = Some(*value);
                }
            }
        });

    let Some(value) = picked else {
        return false;
    };
    match state.controller.form.set_value(field.id, value) {
        Ok(()) => value != field.value,
        Err(e) => {
            ui_state.log(LogLevel::Error, e.to_string());
            false
        }
    }
}

fn load_from_file(field: &FieldView, state: &mut AppState, ui_state: &mut UiState) -> bool {
    let Some(path) = dialogs::pick_input_for(field.id) else {
        return false;
    };
    match dialogs::read_field_text(&path) {
        Ok(text) => match state.controller.form.set_value(field.id, &text) {
            Ok(()) => {
                ui_state.log(
                    LogLevel::Info,
                    format!("Loaded {} from {}", field.label, path.display()),
                );
                true
            }
            Err(e) => {
                ui_state.log(LogLevel::Error, e.to_string());
                false
            }
        },
        Err(e) => {
            ui_state.log(LogLevel::Error, e);
            false
        }
    }
}

fn rows_for(field: FieldId) -> usize {
    match field {
        FieldId::Contacts => 10,
        FieldId::Sequence | FieldId::Pairing => 4,
        _ => 3,
    }
}
