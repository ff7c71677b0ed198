//! Backend commands queued from UI to backend worker.

use shared::protocol::PredictRequest;

pub enum BackendCommand {
    /// Run one prediction for a request captured when the form was submitted.
    Predict { request: PredictRequest },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict { .. } => "predict",
        }
    }
}
