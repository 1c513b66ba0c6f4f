use std::env;
use std::time::Duration;

use crate::domain::InfoWindowPolicy;
use crate::infrastructure::http_client::HttpPolicy;
use crate::modules::integrations::local_search;
use crate::services::visited_service::VISITED_LANDMARKS_KEY;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub profile: String,
    pub static_dir: String,
    /// Server-held key for the local search API
    pub local_search_api_key: Option<String>,
    pub local_search_url: String,
    /// Base URL of the quest backend
    pub backend_url: Option<String>,
    pub visited_storage_key: String,
    pub info_window_policy: InfoWindowPolicy,
    pub geofence_radius_m: f64,
    pub http_policy: HttpPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let profile = var("PROFILE").unwrap_or_else(|| "default".to_string());

        let database_url = var("DATABASE_URL").unwrap_or_else(|| {
            if profile == "default" {
                "sqlite://landmark_quest.db?mode=rwc".to_string()
            } else {
                format!("sqlite://landmark_quest_{}.db?mode=rwc", profile)
            }
        });

        let info_window_policy = match var("INFO_WINDOW_POLICY") {
            Some(raw) => raw.parse::<InfoWindowPolicy>().unwrap_or_else(|e| {
                tracing::warn!("{}, using default", e);
                InfoWindowPolicy::default()
            }),
            None => InfoWindowPolicy::default(),
        };

        let http_policy = HttpPolicy {
            timeout: var("HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            max_retries: var("HTTP_MAX_RETRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            retry_backoff: Duration::from_millis(
                var("HTTP_RETRY_BACKOFF_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0),
            ),
        };

        Self {
            database_url,
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(8000),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            profile,
            static_dir: var("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            local_search_api_key: var("YAHOO_LOCAL_SEARCH_API_KEY")
                .or_else(|| var("VITE_YAHOO_LOCAL_SEARCH_API_KEY")),
            local_search_url: var("YAHOO_LOCAL_SEARCH_URL")
                .unwrap_or_else(|| local_search::DEFAULT_ENDPOINT.to_string()),
            backend_url: var("BACKEND_URL").or_else(|| var("VITE_BACKEND_URL")),
            visited_storage_key: var("VISITED_STORAGE_KEY")
                .unwrap_or_else(|| VISITED_LANDMARKS_KEY.to_string()),
            info_window_policy,
            geofence_radius_m: var("GEOFENCE_RADIUS_METERS")
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|r| r.is_finite() && *r >= 0.0)
                .unwrap_or(100.0),
            http_policy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}
