use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_PREDICTION_BASE_URL: &str = "http://localhost:8000";
pub const SETTINGS_FILE: &str = "yield_predictor.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub prediction_base_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            prediction_base_url: DEFAULT_PREDICTION_BASE_URL.into(),
        }
    }
}

/// Defaults, then `yield_predictor.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();

    match read_settings_file(Path::new(SETTINGS_FILE)) {
        Ok(Some(file_cfg)) => apply_file_config(&mut settings, &file_cfg),
        Ok(None) => {}
        Err(err) => warn!("ignoring settings file: {err:#}"),
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// `APP__PREDICTION_BASE_URL` wins over `PREDICTION_BASE_URL`; blank values are skipped.
fn apply_env_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    for key in ["PREDICTION_BASE_URL", "APP__PREDICTION_BASE_URL"] {
        if let Some(v) = lookup(key) {
            let v = v.trim();
            if !v.is_empty() {
                settings.prediction_base_url = v.to_string();
            }
        }
    }
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<HashMap<String, String>>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let parsed = toml::from_str::<HashMap<String, String>>(&raw)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn apply_file_config(settings: &mut ClientSettings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("prediction_base_url") {
        let v = v.trim();
        if !v.is_empty() {
            settings.prediction_base_url = v.to_string();
        }
    }
}
