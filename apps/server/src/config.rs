//! Environment-driven server configuration.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Directory holding the SQLite database file.
    pub app_data_dir: String,
    /// Base URL of the upstream channel data API.
    pub data_api_url: String,
    /// API key for the upstream channel data API.
    pub data_api_key: String,
    /// Channel used when a request does not name one.
    pub default_channel_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            app_data_dir: env::var("APP_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            data_api_url: env::var("DATA_API_URL")
                .unwrap_or_else(|_| "https://api.example.com".to_string()),
            data_api_key: env::var("DATA_API_KEY").unwrap_or_default(),
            default_channel_id: env::var("DEFAULT_CHANNEL_ID").ok(),
        }
    }
}
