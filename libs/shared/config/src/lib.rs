use std::env;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub refresh_timeout_secs: u64,
    pub credentials_path: Option<PathBuf>,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let config = Self {
            base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("API_BASE_URL not set, using local default");
                    "http://localhost:8000/api".to_string()
                }),
            request_timeout_secs: env::var("API_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            refresh_timeout_secs: env::var("API_REFRESH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            credentials_path: env::var("API_CREDENTIALS_PATH").ok().map(PathBuf::from),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    /// Config pointed at an explicit base URL, keeping the default timeouts.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_secs: 30,
            refresh_timeout_secs: 15,
            credentials_path: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_base_url_uses_defaults() {
        let config = ApiConfig::with_base_url("http://localhost:9999/api");
        assert_eq!(config.base_url, "http://localhost:9999/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.refresh_timeout_secs, 15);
        assert!(config.credentials_path.is_none());
        assert!(config.is_configured());
    }
}
