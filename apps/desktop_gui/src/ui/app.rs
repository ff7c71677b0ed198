use std::time::Duration;

use client_core::{FormStore, ResultView, SubmissionOutcome};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{domain::FormField, error::SubmitRejected};
use tokio::sync::watch;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::{alerts::AlertQueue, form, results};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub prediction_base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    store: FormStore,
    revision_rx: watch::Receiver<u64>,
    result_view: ResultView,
    fading_result: ResultView,

    alerts: AlertQueue,
    required_hint: Option<FormField>,
    focus_request: Option<FormField>,

    prediction_base_url: String,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let store = FormStore::new();
        let revision_rx = store.subscribe();
        Self {
            cmd_tx,
            ui_rx,
            store,
            revision_rx,
            result_view: ResultView::default(),
            fading_result: ResultView::default(),
            alerts: AlertQueue::default(),
            required_hint: None,
            focus_request: None,
            prediction_base_url: startup.prediction_base_url,
            status: "Ready".to_string(),
            status_banner: None,
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    self.apply_error(err);
                }
                UiEvent::PredictionSettled(outcome) => {
                    self.status = if outcome.is_success() {
                        "Prediction received".to_string()
                    } else {
                        "Prediction failed".to_string()
                    };
                    self.store.settle(outcome, &self.alerts);
                }
            }
        }
        self.refresh_views();
    }

    /// Handles a submit event: runs the gate and, when it passes, queues the call.
    pub fn submit(&mut self) {
        let request = match self.store.begin_submission() {
            Ok(request) => request,
            Err(SubmitRejected::MissingField(field)) => {
                tracing::debug!(field = field.wire_name(), "submit blocked by empty field");
                self.required_hint = Some(field);
                self.focus_request = Some(field);
                return;
            }
            Err(SubmitRejected::AlreadyLoading) => {
                tracing::debug!("submit ignored while a prediction is loading");
                return;
            }
        };

        self.required_hint = None;
        self.status = "Predicting...".to_string();
        if let Err(description) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::Predict { request })
        {
            self.store.settle(
                SubmissionOutcome::TransportFailed(description),
                &self.alerts,
            );
            self.status = "Prediction failed".to_string();
        }
        self.refresh_views();
    }

    fn apply_error(&mut self, err: UiError) {
        tracing::warn!(category = ?err.category(), context = ?err.context(), "{}", err.message());
        self.status = format!("{}: {}", err_label(err.category()), err.message());
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: err.message().to_string(),
        });
    }

    /// Re-derives views from the store when it has changed since the last look.
    fn refresh_views(&mut self) {
        if self.revision_rx.has_changed().unwrap_or(false) {
            self.revision_rx.borrow_and_update();
            self.result_view = ResultView::from_result(self.store.result());
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let fill = match banner.severity {
                StatusBannerSeverity::Error => egui::Color32::from_rgb(111, 53, 53),
            };

            egui::Frame::group(ui.style())
                .fill(fill)
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.set_max_width(700.0);
                    ui.heading(egui::RichText::new("🌾 Crop Yield Predictor").size(26.0));
                    ui.add_space(16.0);

                    self.show_status_banner(ui);

                    let focus_request = self.focus_request.take();
                    let actions = form::show_form_fields(
                        ui,
                        &mut self.store,
                        self.required_hint,
                        focus_request,
                    );

                    ui.add_space(20.0);
                    let phase = self.store.phase();
                    let button = egui::Button::new(
                        egui::RichText::new(phase.submit_label()).strong().size(16.0),
                    )
                    .min_size(egui::vec2(ui.available_width(), 40.0));
                    let clicked = ui.add_enabled(!phase.is_loading(), button).clicked();

                    if clicked || actions.submit_requested {
                        self.submit();
                    }
                    self.refresh_views();

                    results::show_result_panels(ui, &self.result_view, &mut self.fading_result);

                    ui.add_space(16.0);
                    ui.separator();
                    ui.horizontal_wrapped(|ui| {
                        ui.small("Service:");
                        ui.small(egui::RichText::new(&self.prediction_base_url).weak());
                        ui.small("Status:");
                        ui.small(egui::RichText::new(&self.status).weak());
                    });
                });
            });
        });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        // Alerts block the form until dismissed.
        let alert_open = self.alerts.show(ctx);
        if alert_open {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.disable();
                ui.centered_and_justified(|ui| {
                    ui.weak("Dismiss the alert to continue.");
                });
            });
        } else {
            self.show_form(ctx);
        }

        if self.store.phase().is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
