use crate::humanize::HumanDuration;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub astro_api: AstroApiConfig,
    #[serde(default)]
    pub geocode: GeocodeConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Astrology calculation API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AstroApiConfig {
    #[serde(default = "default_astro_base_url")]
    pub base_url: String,
    #[serde(default = "default_astro_timeout")]
    pub request_timeout: HumanDuration,
    /// Pause between consecutive chart calls of one batch
    #[serde(default = "default_call_delay")]
    pub call_delay: HumanDuration,
    /// Loaded from environment, never from the config file
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for AstroApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_astro_base_url(),
            request_timeout: default_astro_timeout(),
            call_delay: default_call_delay(),
            api_key: None,
        }
    }
}

fn default_astro_base_url() -> String {
    "https://json.freeastrologyapi.com/".to_string()
}

fn default_astro_timeout() -> HumanDuration {
    HumanDuration::from_secs(15)
}

fn default_call_delay() -> HumanDuration {
    HumanDuration::from_secs(1)
}

/// Forward-geocoding service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocodeConfig {
    #[serde(default = "default_geocode_url")]
    pub url: String,
    #[serde(default = "default_geocode_timeout")]
    pub request_timeout: HumanDuration,
    /// Loaded from environment, never from the config file
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            url: default_geocode_url(),
            request_timeout: default_geocode_timeout(),
            api_key: None,
        }
    }
}

fn default_geocode_url() -> String {
    "https://geocode.maps.co/search".to_string()
}

fn default_geocode_timeout() -> HumanDuration {
    HumanDuration::from_secs(10)
}

/// HTTP surface
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

/// Where downloads are written
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.astro_api.base_url, "https://json.freeastrologyapi.com/");
        assert_eq!(config.astro_api.request_timeout.as_duration(), Duration::from_secs(15));
        assert_eq!(config.astro_api.call_delay.as_duration(), Duration::from_secs(1));
        assert_eq!(config.geocode.url, "https://geocode.maps.co/search");
        assert_eq!(config.geocode.request_timeout.as_duration(), Duration::from_secs(10));
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn test_secrets_are_not_serialized() {
        let mut config = Config::default();
        config.astro_api.api_key = Some("secret".to_string());

        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("call_delay = \"1s\""));
    }
}
