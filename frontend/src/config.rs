use leptos::logging;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Which [`Api`](crate::api::Api) implementation the app talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Http,
    Dummy,
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Backend::Dummy
        } else {
            Backend::Http
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub backend: Backend,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            backend: Backend::default(),
        }
    }
}

/// Whatever the build environment provided, before defaults are applied
#[derive(Debug, Deserialize)]
struct Settings {
    base_url: Option<String>,
    backend: Option<Backend>,
}

impl Settings {
    fn into_config(self) -> Result<Config, ConfigError> {
        // a deployed host means a real backend unless told otherwise
        let backend = match (self.backend, &self.base_url) {
            (Some(backend), _) => backend,
            (None, Some(_)) => Backend::Http,
            (None, None) => Backend::default(),
        };
        Config {
            base_url: self.base_url.unwrap_or_else(default_base_url),
            backend,
        }
        .normalized()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse the configuration as TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Unknown backend {0:?}, expected \"http\" or \"dummy\"")]
    UnknownBackend(String),

    #[error("Base url must not be empty")]
    EmptyBaseUrl,
}

impl Config {
    /// Configuration baked in at build time.
    ///
    /// `APP_CONFIG` holds a whole TOML document; otherwise `APP_HOST_URL` and
    /// `APP_BACKEND` are looked at, a host url alone selecting the http
    /// backend. Anything unusable falls back to defaults.
    pub fn load() -> Self {
        Self::resolve(
            option_env!("APP_CONFIG"),
            option_env!("APP_HOST_URL"),
            option_env!("APP_BACKEND"),
        )
        .unwrap_or_else(|err| {
            logging::warn!("{err}, using default configuration");
            Self::default()
        })
    }

    pub fn resolve(
        toml_source: Option<&str>,
        host_url: Option<&str>,
        backend: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(source) = toml_source {
            return Self::parse(source);
        }

        let backend = backend
            .map(|backend| match backend.trim() {
                "http" => Ok(Backend::Http),
                "dummy" => Ok(Backend::Dummy),
                other => Err(ConfigError::UnknownBackend(other.to_string())),
            })
            .transpose()?;
        Settings {
            base_url: host_url.map(str::to_string),
            backend,
        }
        .into_config()
    }

    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::de::from_str(source)?;
        settings.into_config()
    }

    fn normalized(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    /// Absolute url of an api path, `path` starting with `/`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
