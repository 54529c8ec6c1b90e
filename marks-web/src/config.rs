//! Backend settings baked in at build time

use marks_core::config::ProviderConfig;
use tracing::{error, info};

/// Read `MARKS_SUPABASE_URL` and `MARKS_SUPABASE_ANON_KEY` as they were when
/// the app was compiled. `None` selects demo mode.
pub fn build_config() -> Option<ProviderConfig> {
    let url = option_env!("MARKS_SUPABASE_URL");
    let anon_key = option_env!("MARKS_SUPABASE_ANON_KEY");
    match ProviderConfig::from_values(url, anon_key) {
        Ok(Some(config)) => {
            info!("Using backend at {}", config.supabase_url);
            Some(config)
        }
        Ok(None) => {
            info!("No backend configured, running in demo mode");
            None
        }
        Err(e) => {
            error!("Ignoring backend configuration: {e}");
            None
        }
    }
}
