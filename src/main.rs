//! Staff Admin - desktop console for staff management with OTP sign-in.

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use eframe::egui;
use staff_admin as app;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use app::client::ApiClient;
use app::config::{AppConfig, ConfigOrigin};
use app::session::{Session, TokenStore};
use app::ui::App;

/// Desktop console for staff management with OTP sign-in.
#[derive(Parser)]
#[command(name = "staff-admin")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Path to a config file
    #[arg(long, conflicts_with = "dev")]
    config: Option<PathBuf>,

    /// Override the API base URL from the config file
    #[arg(long)]
    api_url: Option<String>,
}

/// Install stderr logging plus an optional daily log file.
///
/// The returned guard flushes the file writer and must outlive the app.
fn init_logging(config: &AppConfig) -> (Option<WorkerGuard>, Option<String>) {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let mut file_error = None;
    let (file_layer, guard) = if config.logging.file_enabled {
        match RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("staff-admin")
            .filename_suffix("log")
            .build(config.log_dir())
        {
            Ok(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
            }
            Err(e) => {
                file_error = Some(e.to_string());
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    (guard, file_error)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else if let Some(path) = cli.config.clone() {
        path
    } else {
        AppConfig::default_path()
    };

    let (config, origin) = AppConfig::load_or_create(&config_path);
    let config = config.with_api_url(cli.api_url);

    let (_log_guard, log_file_error) = init_logging(&config);
    tracing::info!("Staff Admin starting...");
    if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
    }
    tracing::info!("Config path: {:?}", config_path);

    let mut initial_error = None;
    match origin {
        ConfigOrigin::Loaded => tracing::info!("Config loaded successfully"),
        ConfigOrigin::Created { save_error: None } => tracing::info!("Config missing, wrote defaults"),
        ConfigOrigin::Created { save_error: Some(e) } => {
            tracing::warn!("Failed to save default config: {}", e);
        }
        ConfigOrigin::Defaulted(e) => {
            tracing::warn!("Config invalid, using defaults: {}", e);
            initial_error = Some(format!("Configuration error: {e}"));
        }
    }
    if let Some(e) = log_file_error {
        tracing::warn!("File logging disabled: {}", e);
    }

    config.validate().context("Invalid --api-url")?;
    tracing::info!("API: {}", config.api.base_url);

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let client = ApiClient::new(&config.api).context("Failed to build HTTP client")?;

    let session = Session::restore(TokenStore::new(config.token_path()));
    if session.is_authenticated() {
        tracing::info!("Restored saved session");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Staff Admin")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Staff Admin",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(App::new(config, client, session, rt, initial_error)))
        }),
    )
    .map_err(|e| anyhow!("{e}"))
}
