//! Configuration loader for the `airsense-backend` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable with a default value.
macro_rules! env_or {
    ($var_name:expr, $default:expr) => {
        env::var($var_name).unwrap_or_else(|_| $default.to_string())
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application. Every value has a default so
/// the service starts with zero configuration; without upstream credentials
/// the data-source layer serves synthetic readings instead.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Pollutant measurements API base URL (OpenAQ-compatible).
    pub air_api_url: String,

    /// Weather API base URL (OpenWeatherMap-compatible).
    pub weather_api_url: String,

    /// Weather API key; when unset, weather falls back to synthetic data.
    pub weather_api_key: Option<String>,

    /// Number of hours the trend forecast projects ahead.
    pub forecast_horizon_hours: u32,

    /// Timeout for upstream HTTP requests, in seconds.
    pub http_timeout_secs: u32,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `AIR_API_URL` – pollutant API base URL (default: OpenAQ v2)
/// - `WEATHER_API_URL` – weather API base URL (default: OpenWeatherMap 2.5)
/// - `WEATHER_API_KEY` – weather API key (default: unset, synthetic weather)
/// - `FORECAST_HORIZON_HOURS` – forecast horizon (default: 6)
/// - `HTTP_TIMEOUT_SECS` – upstream request timeout (default: 10)
///
/// Returns an error if any numeric variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let air_api_url = env_or!("AIR_API_URL", "https://api.openaq.org/v2");
    let weather_api_url = env_or!("WEATHER_API_URL", "https://api.openweathermap.org/data/2.5");
    let weather_api_key = env::var("WEATHER_API_KEY").ok();
    let forecast_horizon_hours = parse_env_u32!("FORECAST_HORIZON_HOURS", 6);
    let http_timeout_secs = parse_env_u32!("HTTP_TIMEOUT_SECS", 10);

    Ok(Config {
        air_api_url,
        weather_api_url,
        weather_api_key,
        forecast_horizon_hours,
        http_timeout_secs,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the weather API key while showing all configuration values
    /// that were loaded.
    pub fn log_config(&self) {
        // ---
        let masked_key = match &self.weather_api_key {
            Some(_) => "****",
            None => "(unset, using synthetic weather)",
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  AIR_API_URL            : {}", self.air_api_url);
        tracing::info!("  WEATHER_API_URL        : {}", self.weather_api_url);
        tracing::info!("  WEATHER_API_KEY        : {}", masked_key);
        tracing::info!("  FORECAST_HORIZON_HOURS : {}", self.forecast_horizon_hours);
        tracing::info!("  HTTP_TIMEOUT_SECS      : {}", self.http_timeout_secs);
    }
}
