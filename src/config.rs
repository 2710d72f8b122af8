use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Length of an OpenWeatherMap API key
const API_KEY_LENGTH: usize = 32;

/// Environment variable used by earlier deployments for the API key
const LEGACY_API_KEY_VAR: &str = "OPEN_WEATHER_MAP_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// OpenWeatherMap API key, injected as `appid` on every upstream call
    pub openweathermap_api_key: String,

    /// Base URL of the OpenWeatherMap data API
    #[serde(default = "default_base_url")]
    pub openweathermap_base_url: String,

    /// Outbound request timeout. Unset means no timeout.
    #[serde(default)]
    pub upstream_timeout_secs: Option<u64>,

    /// Allowed CORS origins (empty allows any origin)
    #[serde(default)]
    pub cors_allow_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = Config::builder()
            // Start with default values
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .set_default("openweathermap_base_url", default_base_url())?;

        if let Ok(key) = std::env::var(LEGACY_API_KEY_VAR) {
            builder = builder.set_default("openweathermap_api_key", key)?;
        }

        let config = builder
            // Load from config file if present
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with WEATHERGATE_)
            .add_source(
                Environment::with_prefix("WEATHERGATE")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allow_origins"),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configuration the gateway cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key_len = self.openweathermap_api_key.chars().count();
        if key_len != API_KEY_LENGTH {
            return Err(ConfigError::Message(format!(
                "openweathermap_api_key must be {} characters, got {}",
                API_KEY_LENGTH, key_len
            )));
        }

        if !self.openweathermap_base_url.starts_with("http://")
            && !self.openweathermap_base_url.starts_with("https://")
        {
            return Err(ConfigError::Message(format!(
                "openweathermap_base_url must be an http(s) URL, got {:?}",
                self.openweathermap_base_url
            )));
        }

        if self.upstream_timeout_secs == Some(0) {
            return Err(ConfigError::Message(
                "upstream_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
