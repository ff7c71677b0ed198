//! Submission controller: one outbound prediction call per accepted submit event.

use serde_json::Value;
use shared::{
    error::{PredictionError, SubmitRejected},
    protocol::{PredictRequest, PredictionResult},
};
use tracing::{debug, info, warn};

use crate::{store::FormStore, PredictionService};

pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Prediction failed. Response format unexpected.";
pub const TRANSPORT_FAILURE_PREFIX: &str = "Prediction failed: ";
const INTERRUPTED_DESCRIPTION: &str = "submission was interrupted before the response settled";

/// Sink for blocking user-facing messages (a dialog in the GUI, stderr in the CLI).
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that only logs; used where no interactive surface exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        warn!(%message, "prediction notification");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Succeeded(PredictionResult),
    /// 2xx response without a usable `predicted_yield`.
    UnexpectedResponse,
    /// Network failure, non-2xx status or undecodable body.
    TransportFailed(String),
}

impl SubmissionOutcome {
    pub fn from_response(response: Result<Value, PredictionError>) -> Self {
        match response {
            Ok(body) => match PredictionResult::from_response_body(&body) {
                Ok(result) => SubmissionOutcome::Succeeded(result),
                Err(_) => SubmissionOutcome::UnexpectedResponse,
            },
            Err(err) => SubmissionOutcome::TransportFailed(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded(_))
    }

    /// Message shown to the user, `None` on success.
    pub fn notification(&self) -> Option<String> {
        match self {
            SubmissionOutcome::Succeeded(_) => None,
            SubmissionOutcome::UnexpectedResponse => Some(UNEXPECTED_RESPONSE_MESSAGE.to_string()),
            SubmissionOutcome::TransportFailed(description) => {
                Some(format!("{TRANSPORT_FAILURE_PREFIX}{description}"))
            }
        }
    }
}

/// Moves the store out of `Loading` if the submission is abandoned mid-flight.
struct LoadingGuard<'a> {
    store: &'a mut FormStore,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.store.phase().is_loading() {
            warn!("prediction submission dropped while loading");
            self.store
                .fail_submission(format!("{TRANSPORT_FAILURE_PREFIX}{INTERRUPTED_DESCRIPTION}"));
        }
    }
}

pub struct SubmissionController<S, N> {
    service: S,
    notifier: N,
}

impl<S, N> SubmissionController<S, N>
where
    S: PredictionService,
    N: Notifier,
{
    pub fn new(service: S, notifier: N) -> Self {
        Self { service, notifier }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Issues the call for an already captured request. Never fails: every error is
    /// folded into the returned outcome.
    pub async fn execute(&self, request: &PredictRequest) -> SubmissionOutcome {
        debug!(crop_type = %request.crop_type, state = %request.state, "requesting prediction");
        let outcome = SubmissionOutcome::from_response(self.service.predict(request).await);
        match &outcome {
            SubmissionOutcome::Succeeded(result) => info!(
                predicted_yield = ?result.predicted_yield,
                recommendations = result.recommendations.len(),
                "prediction settled"
            ),
            SubmissionOutcome::UnexpectedResponse => {
                warn!("prediction response lacked predicted_yield")
            }
            SubmissionOutcome::TransportFailed(description) => {
                warn!(%description, "prediction request failed")
            }
        }
        outcome
    }

    pub fn settle(&self, store: &mut FormStore, outcome: SubmissionOutcome) {
        store.settle(outcome, &self.notifier);
    }

    /// Full submit cycle: gate, call, settle. A rejected submit touches nothing.
    pub async fn submit(
        &self,
        store: &mut FormStore,
    ) -> Result<SubmissionOutcome, SubmitRejected> {
        let request = store.begin_submission()?;
        let guard = LoadingGuard { store };
        let outcome = self.execute(&request).await;
        self.settle(&mut *guard.store, outcome.clone());
        Ok(outcome)
    }
}
