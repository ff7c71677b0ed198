use client_core::ResultView;
use eframe::egui;

const FADE_SECONDS: f32 = 0.5;

/// Paints the result panels. The section fades in and out with the view's visibility;
/// the last non-empty view is kept while fading out.
pub fn show_result_panels(ui: &mut egui::Ui, view: &ResultView, fading_out: &mut ResultView) {
    let visible = !view.is_empty();
    if visible {
        *fading_out = view.clone();
    }

    let opacity = ui.ctx().animate_bool_with_time(
        egui::Id::new("prediction_result_fade"),
        visible,
        FADE_SECONDS,
    );
    if opacity <= 0.0 || fading_out.is_empty() {
        return;
    }
    let shown = if visible { view } else { &*fading_out };

    ui.add_space(20.0 * opacity);
    ui.scope(|ui| {
        ui.set_opacity(opacity);
        ui.columns(shown.panel_count().max(1), |columns| {
            let mut column = 0;
            if let Some(yield_text) = &shown.yield_text {
                egui::Frame::group(columns[column].style()).show(&mut columns[column], |ui| {
                    ui.set_min_height(120.0);
                    ui.heading("📊 Predicted Yield");
                    ui.label(egui::RichText::new(yield_text).size(24.0).strong());
                });
                column += 1;
            }
            if let Some(recommendations) = &shown.recommendations {
                egui::Frame::group(columns[column].style()).show(&mut columns[column], |ui| {
                    ui.set_min_height(120.0);
                    ui.heading("🌱 Smart Recommendations");
                    for (index, recommendation) in recommendations.iter().enumerate() {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(format!("{}.", index + 1));
                            ui.label(recommendation);
                        });
                    }
                });
            }
        });
    });
}
