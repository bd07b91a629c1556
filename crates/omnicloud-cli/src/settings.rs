// Layered CLI configuration
//
// Sources, lowest to highest precedence:
//   1. built-in defaults
//   2. omnicloud.toml (or the file given with --config), optional
//   3. OMNICLOUD__* environment variables, e.g. OMNICLOUD__API__BASE_URL
//   4. OMNICLOUD_API_URL
//   5. command line flags

use std::path::PathBuf;

use config::{Config, Environment, File};
use omnicloud_client::config::BASE_URL_ENV;
use omnicloud_client::{ClientConfig, DEFAULT_BASE_URL, FileStore};

pub const API_BASE_URL: &str = "api.base_url";
pub const API_CONNECT_TIMEOUT_MS: &str = "api.connect_timeout_ms";
pub const API_REQUEST_TIMEOUT_MS: &str = "api.request_timeout_ms";
pub const LOG_LEVEL: &str = "log.level";
pub const STATE_PATH: &str = "state.path";

const DEFAULT_CONFIG_FILE: &str = "omnicloud";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Values the command line may override
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub api_url: Option<String>,
    pub log_level: Option<String>,
    pub state_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct Settings {
    config: Config,
}

impl Settings {
    pub fn load(overrides: &Overrides) -> anyhow::Result<Self> {
        let file = match &overrides.config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .set_default(API_BASE_URL, DEFAULT_BASE_URL)?
            .set_default(LOG_LEVEL, DEFAULT_LOG_LEVEL)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("OMNICLOUD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                API_BASE_URL,
                std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty()),
            )?
            .set_override_option(API_BASE_URL, overrides.api_url.clone())?
            .set_override_option(LOG_LEVEL, overrides.log_level.clone())?
            .set_override_option(
                STATE_PATH,
                overrides
                    .state_path
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()?;

        Ok(Self { config })
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn base_url(&self) -> String {
        self.config
            .get_string(API_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url().trim().to_string(),
            connect_timeout_ms: self.optional_u64(API_CONNECT_TIMEOUT_MS),
            request_timeout_ms: self.optional_u64(API_REQUEST_TIMEOUT_MS),
        }
    }

    pub fn log_level(&self) -> String {
        self.config
            .get_string(LOG_LEVEL)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
    }

    /// Where the token and platform selection are persisted
    pub fn state_path(&self) -> PathBuf {
        self.config
            .get_string(STATE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| FileStore::default_path())
    }

    fn optional_u64(&self, key: &str) -> Option<u64> {
        self.config
            .get_int(key)
            .ok()
            .and_then(|v| u64::try_from(v).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_values_and_flag_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("omnicloud.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://file.example/api/v1\"\nrequest_timeout_ms = 5000\n\n[log]\nlevel = \"debug\""
        )
        .unwrap();

        let settings = Settings::load(&Overrides {
            config_file: Some(path.clone()),
            ..Default::default()
        })
        .unwrap();
        let client = settings.client_config();
        assert_eq!(client.request_timeout_ms, Some(5000));
        assert!(client.connect_timeout_ms.is_none());
        assert_eq!(settings.log_level(), "debug");

        let settings = Settings::load(&Overrides {
            config_file: Some(path),
            api_url: Some("http://flag.example/api/v1".to_string()),
            state_path: Some(dir.path().join("state.json")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(settings.base_url(), "http://flag.example/api/v1");
        assert_eq!(settings.state_path(), dir.path().join("state.json"));
    }

    #[test]
    fn test_defaults_from_builder() {
        let config = Config::builder()
            .set_default(API_BASE_URL, DEFAULT_BASE_URL)
            .unwrap()
            .build()
            .unwrap();
        let settings = Settings::from_config(config);
        assert_eq!(settings.client_config().base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.log_level(), "warn");
        assert!(settings.client_config().request_timeout_ms.is_none());
    }
}
