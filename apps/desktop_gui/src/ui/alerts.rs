//! Blocking alerts: messages queue up and are shown one at a time in a modal window.

use std::{cell::RefCell, collections::VecDeque};

use client_core::Notifier;
use eframe::egui;

#[derive(Debug, Default)]
pub struct AlertQueue {
    pending: RefCell<VecDeque<String>>,
}

impl AlertQueue {
    pub fn current(&self) -> Option<String> {
        self.pending.borrow().front().cloned()
    }

    pub fn dismiss(&self) {
        self.pending.borrow_mut().pop_front();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Paints the oldest alert centred over the window. Returns `true` while one is open.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let Some(message) = self.current() else {
            return false;
        };

        let mut dismissed = false;
        egui::Window::new("Prediction")
            .id(egui::Id::new("prediction_alert"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(320.0);
                ui.label(egui::RichText::new(&message).size(15.0));
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    let ok = ui.add(egui::Button::new("OK").min_size(egui::vec2(80.0, 28.0)));
                    if ok.clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.dismiss();
        }
        true
    }
}

impl Notifier for AlertQueue {
    fn notify(&self, message: &str) {
        tracing::info!(%message, "showing alert");
        self.pending.borrow_mut().push_back(message.to_string());
    }
}
