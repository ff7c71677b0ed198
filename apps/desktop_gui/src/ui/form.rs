//! Input controls: one per form field, bound directly to the store.

use client_core::FormStore;
use eframe::egui;
use shared::domain::{FieldKind, FormField, PLACEHOLDER_LABEL};

pub const REQUIRED_HINT: &str = "Please fill out this field.";

/// What the user did with the form during one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FormActions {
    pub submit_requested: bool,
}

/// Keeps the characters a number input accepts.
pub fn sanitize_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .collect()
}

pub fn show_form_fields(
    ui: &mut egui::Ui,
    store: &mut FormStore,
    required_hint: Option<FormField>,
    focus_request: Option<FormField>,
) -> FormActions {
    let mut actions = FormActions::default();

    egui::Grid::new("yield_form_grid")
        .num_columns(2)
        .spacing([16.0, 12.0])
        .min_col_width(160.0)
        .show(ui, |ui| {
            for field in FormField::ALL {
                ui.label(egui::RichText::new(format!("{}:", field.label())).strong());
                ui.vertical(|ui| {
                    let response = match field.kind() {
                        FieldKind::Choice(options) => choice_control(ui, store, field, options),
                        FieldKind::Numeric => {
                            let response = numeric_control(ui, store, field);
                            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
                            {
                                actions.submit_requested = true;
                            }
                            response
                        }
                    };
                    if focus_request == Some(field) {
                        response.request_focus();
                    }
                    if required_hint == Some(field) && store.field(field).is_empty() {
                        ui.small(
                            egui::RichText::new(REQUIRED_HINT)
                                .color(ui.visuals().warn_fg_color),
                        );
                    }
                });
                ui.end_row();
            }
        });

    actions
}

fn choice_control(
    ui: &mut egui::Ui,
    store: &mut FormStore,
    field: FormField,
    options: &'static [&'static str],
) -> egui::Response {
    let current = store.field(field).to_string();
    let mut selected = current.clone();
    let shown = if selected.is_empty() {
        PLACEHOLDER_LABEL.to_string()
    } else {
        selected.clone()
    };

    let response = egui::ComboBox::from_id_salt(("yield_form_choice", field.wire_name()))
        .selected_text(shown)
        .width(240.0)
        .show_ui(ui, |ui| {
            // The placeholder is visible but cannot be picked again.
            ui.add_enabled(false, egui::Label::new(PLACEHOLDER_LABEL));
            for option in options {
                ui.selectable_value(&mut selected, option.to_string(), *option);
            }
        })
        .response;

    if selected != current {
        store.set_field(field, selected);
    }
    response
}

fn numeric_control(ui: &mut egui::Ui, store: &mut FormStore, field: FormField) -> egui::Response {
    let mut buffer = store.field(field).to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut buffer)
            .id_salt(("yield_form_numeric", field.wire_name()))
            .hint_text("0")
            .desired_width(240.0),
    );
    if response.changed() {
        store.set_field(field, sanitize_numeric(&buffer));
    }
    response
}
