use anyhow::{bail, Context, Result};
use clap::{builder::PossibleValuesParser, Args as ClapArgs, Parser, Subcommand};
use client_core::{FormStore, HttpPredictionClient, Notifier, ResultView, SubmissionController};
use shared::domain::{FormField, CROP_TYPES, SEASONS, STATES};

#[derive(Parser, Debug)]
#[command(name = "yield-predict", about = "Submit crop parameters to the prediction service")]
struct Args {
    /// Base URL of the prediction service (overrides yield_predictor.toml and environment).
    #[arg(long, global = true)]
    server_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Request a yield prediction for one set of parameters.
    Predict(PredictArgs),
    /// Check that the prediction service is reachable.
    Ping,
}

#[derive(ClapArgs, Debug)]
struct PredictArgs {
    #[arg(long, value_parser = PossibleValuesParser::new(STATES))]
    state: String,
    #[arg(long, value_parser = PossibleValuesParser::new(SEASONS))]
    season: String,
    #[arg(long, value_parser = PossibleValuesParser::new(CROP_TYPES))]
    crop_type: String,
    /// Rainfall in mm.
    #[arg(long)]
    rainfall: String,
    /// Average temperature in °C.
    #[arg(long, allow_hyphen_values = true)]
    avg_temp: String,
    /// Pesticide usage in tonnes.
    #[arg(long)]
    pesticide_usage: String,
    /// Fertilizer in kg/ha.
    #[arg(long)]
    fertilizer: String,
    /// Area in hectares.
    #[arg(long)]
    area: String,
}

impl PredictArgs {
    fn field_values(&self) -> [(FormField, &str); 8] {
        [
            (FormField::State, self.state.as_str()),
            (FormField::Season, self.season.as_str()),
            (FormField::CropType, self.crop_type.as_str()),
            (FormField::Rainfall, self.rainfall.as_str()),
            (FormField::AvgTemp, self.avg_temp.as_str()),
            (FormField::PesticideUsage, self.pesticide_usage.as_str()),
            (FormField::Fertilizer, self.fertilizer.as_str()),
            (FormField::Area, self.area.as_str()),
        ]
    }
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = client_core::load_settings();
    if let Some(server_url) = args.server_url {
        settings.prediction_base_url = server_url;
    }
    let client = HttpPredictionClient::new(&settings.prediction_base_url)
        .context("prediction service URL is not usable")?;

    match args.command {
        Command::Ping => {
            let banner = client.service_banner().await.with_context(|| {
                format!("prediction service at {} did not answer", client.base_url())
            })?;
            println!("{}", banner.message);
        }
        Command::Predict(predict) => {
            let mut store = FormStore::new();
            for (field, value) in predict.field_values() {
                store.set_field(field, value);
            }

            let controller = SubmissionController::new(client, StderrNotifier);
            let outcome = controller.submit(&mut store).await?;
            if !outcome.is_success() {
                bail!("prediction did not succeed");
            }

            print_result(&ResultView::from_result(store.result()));
        }
    }

    Ok(())
}

fn print_result(view: &ResultView) {
    if view.is_empty() {
        println!("No prediction returned.");
        return;
    }
    if let Some(yield_text) = &view.yield_text {
        println!("Predicted Yield: {yield_text}");
    }
    if let Some(recommendations) = &view.recommendations {
        println!("Smart Recommendations:");
        for (index, recommendation) in recommendations.iter().enumerate() {
            println!("  {}. {recommendation}", index + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_flags_map_onto_every_form_field() {
        let args = Args::try_parse_from([
            "yield-predict",
            "--server-url",
            "http://127.0.0.1:9000",
            "predict",
            "--state",
            "Tamil Nadu",
            "--season",
            "Winter",
            "--crop-type",
            "Sugarcane",
            "--rainfall",
            "980",
            "--avg-temp",
            "24",
            "--pesticide-usage",
            "0.9",
            "--fertilizer",
            "150",
            "--area",
            "6",
        ])
        .expect("parse");

        assert_eq!(args.server_url.as_deref(), Some("http://127.0.0.1:9000"));
        let Command::Predict(predict) = args.command else {
            panic!("expected predict command");
        };
        let values = predict.field_values();
        let fields: Vec<FormField> = values.iter().map(|(field, _)| *field).collect();
        assert_eq!(fields, FormField::ALL.to_vec());
        assert_eq!(values[0].1, "Tamil Nadu");
        assert_eq!(values[7].1, "6");
    }

    fn predict_args<'a>(state: &'a str, season: &'a str, crop_type: &'a str) -> Vec<&'a str> {
        vec![
            "yield-predict",
            "predict",
            "--state",
            state,
            "--season",
            season,
            "--crop-type",
            crop_type,
            "--rainfall",
            "1100",
            "--avg-temp",
            "-2",
            "--pesticide-usage",
            "0.4",
            "--fertilizer",
            "80",
            "--area",
            "2",
        ]
    }

    #[test]
    fn choice_flags_only_accept_listed_values() {
        assert!(Args::try_parse_from(predict_args("Bihar", "Kharif", "Maize")).is_ok());

        for (state, season, crop_type) in [
            ("Atlantis", "Kharif", "Maize"),
            ("Bihar", "Dry", "Maize"),
            ("Bihar", "Kharif", "Banana"),
            ("bihar", "Kharif", "Maize"),
        ] {
            let parsed = Args::try_parse_from(predict_args(state, season, crop_type));
            let err = parsed.expect_err("value outside the closed list must be rejected");
            assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
        }
    }

    #[test]
    fn predict_requires_every_field() {
        let parsed = Args::try_parse_from(["yield-predict", "predict", "--state", "Goa"]);
        assert!(parsed.is_err());
    }
}
