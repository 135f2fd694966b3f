//! Guest Check-in - desktop door station for the guest list.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eframe::egui;
use guest_checkin as app;

use app::client::CheckInClient;
use app::config::{AppConfig, ConfigLoadResult};
use app::ui::CheckInApp;

/// Guest-list check-in station with QR scanning.
#[derive(Parser)]
#[command(name = "guest-checkin")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Explicit config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the guest-list service URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    let _log_guard = app::logging::init(&AppConfig::log_dir());

    tracing::info!("Guest Check-in starting...");

    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => {
            tracing::info!("Dev mode: loading config from current directory");
            PathBuf::from("config.toml")
        }
        (None, false) => AppConfig::default_path(),
    };
    tracing::info!("Config path: {:?}", config_path);

    let mut config = load_config(&config_path);
    if let Some(url) = cli.base_url {
        config.service.base_url = url;
        if let Err(e) = config.validate() {
            tracing::warn!("Ignoring --base-url: {}", e);
            config.service = AppConfig::default().service;
        }
    }
    tracing::info!("Service: {}", config.service.base());

    let client = match CheckInClient::new(&config.service) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Guest Check-in")
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Guest Check-in",
        options,
        Box::new(move |cc| {
            let app = CheckInApp::new(&cc.egui_ctx, Arc::new(client), &config, rt)?;
            Ok(Box::new(app))
        }),
    )
}

/// Load config, falling back to defaults. Writes a default file on first run.
fn load_config(path: &std::path::Path) -> AppConfig {
    match AppConfig::try_load(path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to write default config: {}", e);
            }
            config
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid, using defaults: {}", e);
            AppConfig::default()
        }
    }
}
