use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{FormField, FormInput};

/// Measurement as it goes over the wire: a number when the text parses, else the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(f64),
    Text(String),
}

impl Measurement {
    pub fn coerce(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Measurement::Number(value),
            _ => Measurement::Text(raw.to_string()),
        }
    }
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub state: String,
    pub season: String,
    pub crop_type: String,
    pub rainfall: Measurement,
    pub avg_temp: Measurement,
    pub pesticide_usage: Measurement,
    pub fertilizer: Measurement,
    pub area: Measurement,
}

impl PredictRequest {
    pub fn from_input(input: &FormInput) -> Self {
        let measure = |field: FormField| Measurement::coerce(input.get(field));
        Self {
            state: input.state.clone(),
            season: input.season.clone(),
            crop_type: input.crop_type.clone(),
            rainfall: measure(FormField::Rainfall),
            avg_temp: measure(FormField::AvgTemp),
            pesticide_usage: measure(FormField::PesticideUsage),
            fertilizer: measure(FormField::Fertilizer),
            area: measure(FormField::Area),
        }
    }
}

/// The response body did not have the shape a successful prediction needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnexpectedResponse;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_yield: Option<f64>,
    pub recommendations: Vec<String>,
}

impl PredictionResult {
    /// Interprets a 2xx response body.
    ///
    /// `predicted_yield` must be present; `null` is accepted as "no value".
    /// `recommendations` may be missing or `null`, otherwise it must be a list of strings.
    pub fn from_response_body(body: &Value) -> Result<Self, UnexpectedResponse> {
        let object = body.as_object().ok_or(UnexpectedResponse)?;

        let predicted_yield = match object.get("predicted_yield") {
            None => return Err(UnexpectedResponse),
            Some(Value::Null) => None,
            Some(Value::Number(number)) => Some(number.as_f64().ok_or(UnexpectedResponse)?),
            Some(_) => return Err(UnexpectedResponse),
        };

        let recommendations = match object.get("recommendations") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or(UnexpectedResponse))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(UnexpectedResponse),
        };

        Ok(Self {
            predicted_yield,
            recommendations,
        })
    }
}

/// Greeting served at the prediction service root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBanner {
    pub message: String,
}
