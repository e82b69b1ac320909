use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Hospital CMS";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default REST backend when `HOSPITAL_API_BASE_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "hospital_portal=info"
}

/// Get the application data directory.
/// Falls back to the working directory when the platform reports no data dir.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("HospitalPortal")
}

/// Where the persisted session lives by default.
pub fn default_session_file() -> PathBuf {
    app_data_dir().join("session.json")
}

/// Runtime configuration for the portal client.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL every REST path is resolved against.
    pub api_base_url: String,
    /// Whole-request timeout.
    pub request_timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Delay before a keystroke-driven search is issued. Zero disables debouncing.
    pub search_debounce: Duration,
    /// Backing file for `FileStore`.
    pub session_file: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            search_debounce: Duration::ZERO,
            session_file: default_session_file(),
        }
    }
}

impl PortalConfig {
    /// Build a config from `HOSPITAL_*` environment variables.
    ///
    /// Unparseable values are logged and replaced by the default; startup never fails
    /// because of a bad variable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base_url = lookup("HOSPITAL_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base_url);

        let secs = |key: &str, fallback: Duration| {
            parse_u64(&lookup, key).map(Duration::from_secs).unwrap_or(fallback)
        };
        let request_timeout = secs("HOSPITAL_REQUEST_TIMEOUT_SECS", defaults.request_timeout);
        let connect_timeout = secs("HOSPITAL_CONNECT_TIMEOUT_SECS", defaults.connect_timeout);

        let search_debounce = parse_u64(&lookup, "HOSPITAL_SEARCH_DEBOUNCE_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.search_debounce);

        let session_file = lookup("HOSPITAL_SESSION_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        Self {
            api_base_url,
            request_timeout,
            connect_timeout,
            search_debounce,
            session_file,
        }
    }

    /// Whether keystroke searches wait before hitting the network.
    pub fn debounce_enabled(&self) -> bool {
        !self.search_debounce.is_zero()
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid numeric setting");
            None
        }
    }
}
