//! Configuration model loaded from external sources.

use std::env;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
pub const DEFAULT_SESSION_DIR: &str = ".session";

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the gateway and the session store.
pub struct AppConfig {
    /// Origin of the dashboard backend.
    pub api_base_url: String,
    /// Directory holding the persisted session record.
    pub session_dir: PathBuf,
}

impl AppConfig {
    /// Loads `config/default`, then `config/{APP_ENV}` (default `local`), then
    /// `APP_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
        Self::load_from(Path::new("config"), &app_env)
    }

    pub fn load_from(dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("session_dir", DEFAULT_SESSION_DIR)?
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join(app_env)).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
