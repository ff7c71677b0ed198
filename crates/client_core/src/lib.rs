use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use shared::{
    error::PredictionError,
    protocol::{PredictRequest, ServiceBanner},
};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod store;
pub mod submission;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use store::{FormStore, SubmissionPhase};
pub use submission::{Notifier, SubmissionController, SubmissionOutcome, TracingNotifier};
pub use view::ResultView;

const PREDICT_PATH: &str = "predict";

/// Remote service that turns a captured form into a prediction.
///
/// Implementations return the decoded JSON body of a successful (2xx) response; judging
/// whether that body is a usable prediction is left to the caller.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: &PredictRequest) -> Result<Value, PredictionError>;
}

#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: Client,
    base_url: Url,
}

impl HttpPredictionClient {
    pub fn new(base_url: &str) -> Result<Self, PredictionError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, PredictionError> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|err| PredictionError::InvalidEndpoint(format!("{base_url}: {err}")))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(PredictionError::InvalidEndpoint(format!(
                "{base_url}: expected an http(s) base URL"
            )));
        }
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `path` appended below the base URL's own path, keeping any prefix it carries.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            self.base_url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url.set_query(None);
        url
    }

    /// Greeting from the service root; a cheap reachability check.
    pub async fn service_banner(&self) -> Result<ServiceBanner, PredictionError> {
        let url = self.endpoint("");
        let body = self.read_json(self.http.get(url.clone()), &url).await?;
        serde_json::from_value(body).map_err(|err| {
            PredictionError::Decode(format!("unexpected banner payload from {url}: {err}"))
        })
    }

    async fn read_json(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<Value, PredictionError> {
        let response = request.send().await.map_err(|err| {
            warn!(%url, error = %err, "prediction service unreachable");
            PredictionError::Network(err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "prediction service returned error status");
            return Err(status_error(status));
        }

        let text = response
            .text()
            .await
            .map_err(|err| PredictionError::Network(err.to_string()))?;
        serde_json::from_str(&text).map_err(|err| {
            PredictionError::Decode(format!("invalid JSON in response from {url}: {err}"))
        })
    }
}

fn status_error(status: StatusCode) -> PredictionError {
    PredictionError::Status {
        status: status.as_u16(),
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, request: &PredictRequest) -> Result<Value, PredictionError> {
        let url = self.endpoint(PREDICT_PATH);
        debug!(%url, "posting prediction request");
        self.read_json(self.http.post(url.clone()).json(request), &url)
            .await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod submission_tests;
