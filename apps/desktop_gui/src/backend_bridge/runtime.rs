//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{
    ClientSettings, HttpPredictionClient, SubmissionController, SubmissionOutcome, TracingNotifier,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the worker thread. It keeps draining commands even when startup fails, so
/// every submitted prediction gets exactly one `PredictionSettled` back.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));

        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let startup_failure =
                    format!("backend worker startup failure: failed to build runtime: {err}");
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    startup_failure.clone(),
                )));
                reject_all(&cmd_rx, &ui_tx, &startup_failure);
                return;
            }
        };

        let controller = match HttpPredictionClient::new(&settings.prediction_base_url) {
            Ok(client) => SubmissionController::new(client, TracingNotifier),
            Err(err) => {
                tracing::error!(
                    base_url = %settings.prediction_base_url,
                    "invalid prediction service URL: {err}"
                );
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    err.to_string(),
                )));
                reject_all(&cmd_rx, &ui_tx, &err.to_string());
                return;
            }
        };

        tracing::info!(base_url = %controller.service().base_url(), "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Predict { request } => {
                        let outcome = controller.execute(&request).await;
                        deliver_settlement(&ui_tx, outcome);
                    }
                }
            }
        });
    });
}

fn reject_all(cmd_rx: &Receiver<BackendCommand>, ui_tx: &Sender<UiEvent>, description: &str) {
    while let Ok(cmd) = cmd_rx.recv() {
        tracing::warn!(command = cmd.name(), "backend unavailable; failing command");
        deliver_settlement(
            ui_tx,
            SubmissionOutcome::TransportFailed(description.to_string()),
        );
    }
}

/// Hands a settled outcome to the UI. The UI is stuck in Loading until this arrives, so
/// a full queue waits for room; a closed window just drops it.
fn deliver_settlement(ui_tx: &Sender<UiEvent>, outcome: SubmissionOutcome) {
    match ui_tx.try_send(UiEvent::PredictionSettled(outcome)) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            tracing::warn!("ui event queue is full; waiting to deliver prediction result");
            if ui_tx.send(event).is_err() {
                tracing::debug!("ui closed before prediction result was delivered");
            }
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui closed before prediction result was delivered");
        }
    }
}
