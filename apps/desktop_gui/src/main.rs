mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{app::StartupConfig, DesktopGuiApp};

#[derive(Parser, Debug)]
#[command(name = "desktop_gui", about = "Crop yield prediction form")]
struct Args {
    /// Base URL of the prediction service (overrides yield_predictor.toml and environment).
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut settings = client_core::load_settings();
    if let Some(server_url) = args.server_url {
        settings.prediction_base_url = server_url;
    }
    tracing::info!(base_url = %settings.prediction_base_url, "starting yield predictor");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let startup = StartupConfig {
        prediction_base_url: settings.prediction_base_url.clone(),
    };
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Crop Yield Predictor")
            .with_inner_size([820.0, 760.0])
            .with_min_inner_size([560.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Crop Yield Predictor",
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, startup)))),
    )
}
