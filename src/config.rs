//! Application configuration.
//!
//! Credentials are never compiled in. Values come from `config.toml` in the
//! platform config directory (or the file named by `PACIENTES_CONFIG`), and
//! environment variables override the file. A `.env` next to the binary is
//! honoured as well.
//!
//! ```toml
//! [sheets]
//! spreadsheet_id = "1ckb..."
//! tab = "pacientes"
//! service_account_path = "/etc/pacientes/service-account.json"
//!
//! [firebase]
//! api_key = "..."
//!
//! [ui]
//! page_size = 10
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::view::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

pub const DEFAULT_TAB: &str = "pacientes";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub sheets: SheetsSection,
    pub firebase: FirebaseSection,
    pub ui: UiSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SheetsSection {
    pub spreadsheet_id: Option<String>,
    pub tab: Option<String>,
    pub service_account_path: Option<PathBuf>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FirebaseSection {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiSection {
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetsCredential {
    ServiceAccount(PathBuf),
    ApiKey(String),
}

/// Validated configuration the rest of the application runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub spreadsheet_id: String,
    pub tab: String,
    pub credential: SheetsCredential,
    pub firebase_api_key: String,
    pub page_size: usize,
}

pub fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("br", "sinapse", "pacientes").ok_or(ConfigError::NoConfigDir)
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn default_session_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_local_dir().join("session.json"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> anyhow::Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> anyhow::Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

impl AppConfig {
    /// Loads `.env`, the config file, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let path = match dotenvy::var("PACIENTES_CONFIG") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_config_path()?,
        };
        let file = read_file_config(&path)?;
        Self::resolve(file, |key| dotenvy::var(key).ok())
    }

    /// Merges file values with overrides from `env` and validates the result.
    pub fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let pick = |key: &str, fallback: Option<String>| {
            env(key)
                .filter(|value| !value.trim().is_empty())
                .or(fallback)
                .filter(|value| !value.trim().is_empty())
        };

        let spreadsheet_id = pick("PACIENTES_SPREADSHEET_ID", file.sheets.spreadsheet_id)
            .ok_or(ConfigError::Missing("sheets.spreadsheet_id"))?;
        let tab = pick("PACIENTES_SHEET_TAB", file.sheets.tab)
            .unwrap_or_else(|| DEFAULT_TAB.to_string());
        let firebase_api_key = pick("PACIENTES_FIREBASE_API_KEY", file.firebase.api_key)
            .ok_or(ConfigError::Missing("firebase.api_key"))?;

        let service_account = pick(
            "PACIENTES_SERVICE_ACCOUNT",
            file.sheets
                .service_account_path
                .map(|path| path.to_string_lossy().into_owned()),
        );
        let credential = match service_account {
            Some(path) => SheetsCredential::ServiceAccount(PathBuf::from(path)),
            None => pick("PACIENTES_SHEETS_API_KEY", file.sheets.api_key)
                .map(SheetsCredential::ApiKey)
                .ok_or(ConfigError::Missing(
                    "sheets.service_account_path or sheets.api_key",
                ))?,
        };

        let page_size = match env("PACIENTES_PAGE_SIZE") {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|_| {
                ConfigError::Invalid(format!("PACIENTES_PAGE_SIZE is not a number: {raw}"))
            })?),
            None => file.ui.page_size,
        }
        .unwrap_or(DEFAULT_PAGE_SIZE);
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(ConfigError::Invalid(format!(
                "page size must be one of {PAGE_SIZE_OPTIONS:?}, got {page_size}"
            )));
        }

        Ok(Self {
            spreadsheet_id,
            tab,
            credential,
            firebase_api_key,
            page_size,
        })
    }
}

/// A missing file is an empty configuration.
pub fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn file() -> FileConfig {
        toml::from_str(
            r#"
            [sheets]
            spreadsheet_id = "sheet-1"
            service_account_path = "/etc/pacientes/sa.json"

            [firebase]
            api_key = "fb-key"
            "#,
        )
        .expect("fixture should parse")
    }

    #[test]
    fn file_values_with_defaults() {
        let config = AppConfig::resolve(file(), env(&[])).expect("config should resolve");

        assert_eq!(config.spreadsheet_id, "sheet-1");
        assert_eq!(config.tab, "pacientes");
        assert_eq!(
            config.credential,
            SheetsCredential::ServiceAccount(PathBuf::from("/etc/pacientes/sa.json"))
        );
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn environment_overrides_file() {
        let config = AppConfig::resolve(
            file(),
            env(&[
                ("PACIENTES_SPREADSHEET_ID", "sheet-2"),
                ("PACIENTES_SHEET_TAB", "triagem"),
                ("PACIENTES_PAGE_SIZE", "20"),
            ]),
        )
        .expect("config should resolve");

        assert_eq!(config.spreadsheet_id, "sheet-2");
        assert_eq!(config.tab, "triagem");
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn api_key_is_the_fallback_credential() {
        let mut file = file();
        file.sheets.service_account_path = None;
        file.sheets.api_key = Some("read-key".to_string());

        let config = AppConfig::resolve(file, env(&[])).expect("config should resolve");

        assert_eq!(config.credential, SheetsCredential::ApiKey("read-key".to_string()));
    }

    #[test]
    fn missing_required_values_are_reported() {
        assert!(matches!(
            AppConfig::resolve(FileConfig::default(), env(&[])),
            Err(ConfigError::Missing("sheets.spreadsheet_id"))
        ));

        let mut no_credential = file();
        no_credential.sheets.service_account_path = None;
        assert!(matches!(
            AppConfig::resolve(no_credential, env(&[])),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn page_size_must_be_an_offered_option() {
        assert!(matches!(
            AppConfig::resolve(file(), env(&[("PACIENTES_PAGE_SIZE", "7")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::resolve(file(), env(&[("PACIENTES_PAGE_SIZE", "dez")])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn webview_dir_is_created_under_data_dir() {
        let dir = tempfile::tempdir().expect("should create temp dir");

        let webview_dir =
            ensure_webview_data_dir(dir.path()).expect("webview data dir should be created");

        assert_eq!(webview_dir, dir.path().join("webview2"));
        assert!(webview_dir.is_dir());
    }

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::tempdir().expect("should create temp dir");

        let config = read_file_config(&dir.path().join("absent.toml")).expect("should read");

        assert_eq!(config, FileConfig::default());
    }
}
