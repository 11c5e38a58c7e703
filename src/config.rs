use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Data files
    pub webstatus_file: PathBuf,
    pub sources_file: PathBuf,

    // Page
    pub history_url: String,
    pub assets_folder: String,
    pub default_locale: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Data files written by the collection scripts
            webstatus_file: std::env::var("WEBSTATUS_FILE")
                .unwrap_or_else(|_| "web_status.json".to_string())
                .into(),
            sources_file: std::env::var("SOURCES_FILE")
                .unwrap_or_else(|_| "sources.json".to_string())
                .into(),

            // Page
            history_url: std::env::var("HISTORY_URL").unwrap_or_else(|_| {
                "https://l10n.mozilla-community.org/~flod/webstatus_history/".to_string()
            }),
            assets_folder: std::env::var("ASSETS_FOLDER")
                .unwrap_or_else(|_| "/assets".to_string()),
            default_locale: std::env::var("DEFAULT_LOCALE")
                .unwrap_or_else(|_| "en-US".to_string()),

            // Server
            port: match std::env::var("PORT") {
                Ok(port) => port
                    .parse()
                    .with_context(|| format!("PORT must be a valid port number, got '{}'", port))?,
                Err(_) => 8080,
            },
        })
    }
}
