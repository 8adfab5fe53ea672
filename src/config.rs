use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Velour";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address when VELOUR_BIND is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8350";

/// Get the application data directory
/// ~/Velour/ on all platforms (user-visible by design)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Velour")
}

/// Path of the SQLite database file
pub fn database_path() -> PathBuf {
    app_data_dir().join("velour.db")
}

/// Directory for uploaded employee photos
pub fn uploads_dir() -> PathBuf {
    app_data_dir().join("uploads")
}

pub fn default_log_filter() -> String {
    "velour=info,tower_http=warn".to_string()
}

/// Runtime settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the HTTP server binds to (VELOUR_BIND).
    pub bind_addr: String,
    /// Admin key required to register staff accounts
    /// (VELOUR_REGISTRATION_KEY). Registration is disabled when unset.
    pub registration_key: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("VELOUR_BIND")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            registration_key: std::env::var("VELOUR_REGISTRATION_KEY").ok(),
        }
    }
}
