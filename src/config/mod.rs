//! Configuration loading for the requestor.
//!
//! Settings are read from a JSON document under the `"strava"` key, merged
//! with defaults and validated. There is no global configuration; the result
//! is handed to the requestor explicitly.

pub mod schema;

pub use schema::{InvalidUrlPolicy, RequestorConfig, STRAVA_BASE_URL};

use log::warn;
use serde_json::Value;

/// Loads configuration from a JSON settings document.
///
/// Settings that fail to parse are logged and replaced by defaults. Missing
/// fields take their default values.
///
/// # Errors
///
/// Returns `Err` with a description if the resulting configuration is invalid.
///
/// # Example
///
/// ```
/// use stravakit::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "strava": {
///         "timeout": 60000
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout, Some(60000));
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<RequestorConfig, String> {
    let mut config = RequestorConfig::default();

    if let Some(settings) = settings_json {
        if let Some(strava_settings) = settings.get("strava") {
            match serde_json::from_value::<RequestorConfig>(strava_settings.clone()) {
                Ok(user_config) => config = user_config,
                Err(e) => {
                    warn!(
                        "Failed to parse strava settings: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    Ok(config)
}
