//! Form state holder: current field values plus the submission phase.

use shared::{
    domain::{FormField, FormInput},
    error::SubmitRejected,
    protocol::{PredictRequest, PredictionResult},
};
use tokio::sync::watch;
use tracing::debug;

use crate::submission::{Notifier, SubmissionOutcome};

pub const SUBMIT_LABEL_IDLE: &str = "Predict Yield";
pub const SUBMIT_LABEL_LOADING: &str = "Predicting...";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Loading,
    Succeeded(PredictionResult),
    Failed(String),
}

impl SubmissionPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionPhase::Loading)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            SubmissionPhase::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            SUBMIT_LABEL_LOADING
        } else {
            SUBMIT_LABEL_IDLE
        }
    }
}

/// Observable store behind the form.
///
/// Every mutation bumps a revision counter published on a `watch` channel so views
/// know to re-derive themselves.
#[derive(Debug)]
pub struct FormStore {
    input: FormInput,
    phase: SubmissionPhase,
    revision: watch::Sender<u64>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            input: FormInput::default(),
            phase: SubmissionPhase::Idle,
            revision,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub fn field(&self, field: FormField) -> &str {
        self.input.get(field)
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.phase.result()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.input.set(field, value);
        self.touch();
    }

    /// Gate for a submit event. On success the phase is `Loading`, any previous result
    /// is gone, and the returned request is the body captured at this instant.
    pub fn begin_submission(&mut self) -> Result<PredictRequest, SubmitRejected> {
        if self.phase.is_loading() {
            return Err(SubmitRejected::AlreadyLoading);
        }
        if let Some(field) = self.input.first_missing() {
            return Err(SubmitRejected::MissingField(field));
        }

        self.phase = SubmissionPhase::Loading;
        self.touch();
        Ok(PredictRequest::from_input(&self.input))
    }

    pub fn complete_submission(&mut self, result: PredictionResult) {
        self.phase = SubmissionPhase::Succeeded(result);
        self.touch();
    }

    pub fn fail_submission(&mut self, message: impl Into<String>) {
        self.phase = SubmissionPhase::Failed(message.into());
        self.touch();
    }

    /// Applies a settled call. Failures are reported through `notifier` first; either
    /// way the store leaves `Loading`.
    ///
    /// A settlement that arrives when nothing is loading is dropped.
    pub fn settle(&mut self, outcome: SubmissionOutcome, notifier: &dyn Notifier) {
        if !self.phase.is_loading() {
            debug!(?outcome, "ignoring settlement with no submission in flight");
            return;
        }

        match outcome {
            SubmissionOutcome::Succeeded(result) => self.complete_submission(result),
            failure => {
                let message = failure.notification().unwrap_or_default();
                notifier.notify(&message);
                self.fail_submission(message);
            }
        }
    }

    fn touch(&self) {
        self.revision.send_modify(|revision| *revision = revision.wrapping_add(1));
    }
}
