use thiserror::Error;

use crate::domain::FormField;

/// Transport-level failure of a call to the prediction service.
///
/// `Display` yields only the underlying description; callers add their own prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    #[error("{0}")]
    Network(String),
    #[error("Request failed with status code {status}")]
    Status { status: u16 },
    #[error("{0}")]
    Decode(String),
    #[error("invalid prediction endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Reasons a submit event never reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("{0} is required")]
    MissingField(FormField),
    #[error("a prediction is already in progress")]
    AlreadyLoading,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_read_like_http_client_messages() {
        assert_eq!(
            PredictionError::Status { status: 500 }.to_string(),
            "Request failed with status code 500"
        );
        assert_eq!(
            PredictionError::Network("Network Error".into()).to_string(),
            "Network Error"
        );
    }

    #[test]
    fn missing_field_names_the_label() {
        assert_eq!(
            SubmitRejected::MissingField(FormField::CropType).to_string(),
            "Crop Type is required"
        );
    }
}
