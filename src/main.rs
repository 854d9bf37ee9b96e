#![allow(non_snake_case)]

mod app;
pub mod context;
mod pages;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use agora_core::logging::init_logging;
use agora_core::ContentConfig;
use anyhow::Context;
use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};

/// Global data directory, set from command line
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Content settings, loaded once before launch
static CONTENT_CONFIG: OnceLock<ContentConfig> = OnceLock::new();

/// Get the data directory (set from command line or default)
pub fn get_data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

/// Get the content settings (loaded from --config or defaults)
pub fn get_content_config() -> ContentConfig {
    CONTENT_CONFIG.get().cloned().unwrap_or_default()
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agora")
}

/// Agora - community landing page
#[derive(Parser, Debug)]
#[command(name = "agora-desktop")]
#[command(about = "Agora - community landing page with live gallery and events")]
struct Args {
    /// Data directory; the shared store lives in <DATA_DIR>/store
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// JSON file with content settings (keys, poll interval, limits)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => ContentConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ContentConfig::default(),
    };

    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
    let _ = DATA_DIR.set(data_dir.clone());
    let _ = CONTENT_CONFIG.set(config);

    tracing::info!("Starting Agora with data dir: {:?}", data_dir);

    let window = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Agora")
            .with_inner_size(dioxus::desktop::LogicalSize::new(1200.0, 900.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(window)
        .launch(app::App);

    Ok(())
}
