mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, SearchAddress, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{SearchApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "temu-search-gui", version, about = "TəmuSəarch desktop client")]
struct Args {
    /// Base URL of the search API; overrides settings file and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Shareable address to open on the results screen.
    #[arg(long)]
    address: Option<String>,
}

fn resolve_settings(api_url: Option<&str>) -> Settings {
    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!("{err}; falling back to default settings");
            Settings::default()
        }
    };
    match api_url {
        Some(api_url) => settings.with_api_base_url(api_url),
        None => settings,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = resolve_settings(args.api_url.as_deref());
    let startup = StartupConfig {
        address: args.address.as_deref().map(SearchAddress::parse),
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TəmuSəarch")
            .with_inner_size([1080.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "TəmuSəarch",
        options,
        Box::new(|_cc| Ok(Box::new(SearchApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run search GUI: {err}"))
}
