mod app;
mod config;
mod domain;
mod infra;
mod ui;
mod usecase;


use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::default_webview_data_dir;

const DEFAULT_LOG_FILTER: &str = "pacientes=info";

fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop_config())
        .launch(App);
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn desktop_config() -> dioxus::desktop::Config {
    let config = dioxus::desktop::Config::new().with_window(
        dioxus::desktop::WindowBuilder::new().with_title("Sistema de Pacientes"),
    );
    match default_webview_data_dir() {
        Ok(dir) => config.with_data_directory(dir),
        Err(err) => {
            warn!(error = %err, "falling back to the default webview data directory");
            config
        }
    }
}
