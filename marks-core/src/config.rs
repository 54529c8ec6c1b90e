//! Backend connection settings

use thiserror::Error;

pub const ENV_SUPABASE_URL: &str = "MARKS_SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "MARKS_SUPABASE_ANON_KEY";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing setting: {0}")]
    Missing(&'static str),
    #[error("invalid project url: {0}")]
    InvalidUrl(String),
}

/// Where the hosted backend lives and the public key used to reach it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Project base url without a trailing slash, e.g. `https://abc.supabase.co`
    pub supabase_url: String,
    pub anon_key: String,
}

impl ProviderConfig {
    /// Build from optional raw values.
    ///
    /// Both absent means no backend is configured (`Ok(None)`); exactly one
    /// absent is an error.
    pub fn from_values(url: Option<&str>, anon_key: Option<&str>) -> Result<Option<Self>, ConfigError> {
        let url = url.map(str::trim).filter(|s| !s.is_empty());
        let anon_key = anon_key.map(str::trim).filter(|s| !s.is_empty());

        match (url, anon_key) {
            (None, None) => Ok(None),
            (None, Some(_)) => Err(ConfigError::Missing(ENV_SUPABASE_URL)),
            (Some(_), None) => Err(ConfigError::Missing(ENV_SUPABASE_ANON_KEY)),
            (Some(url), Some(key)) => {
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(ConfigError::InvalidUrl(url.to_string()));
                }
                Ok(Some(Self {
                    supabase_url: url.trim_end_matches('/').to_string(),
                    anon_key: key.to_string(),
                }))
            }
        }
    }

    /// Read from the process environment, loading `.env` first if present
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        if dotenvy::dotenv().is_ok() {
            tracing::info!("Loaded settings from .env");
        }
        let url = std::env::var(ENV_SUPABASE_URL).ok();
        let key = std::env::var(ENV_SUPABASE_ANON_KEY).ok();
        Self::from_values(url.as_deref(), key.as_deref())
    }

    /// Websocket endpoint of the realtime service
    pub fn realtime_url(&self) -> String {
        let ws_base = if let Some(rest) = self.supabase_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.supabase_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.supabase_url.clone()
        };
        format!(
            "{ws_base}/realtime/v1/websocket?apikey={}&vsn=1.0.0",
            urlencoding::encode(&self.anon_key)
        )
    }
}
